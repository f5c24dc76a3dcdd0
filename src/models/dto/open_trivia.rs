use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::constants::NO_QUESTIONS_MESSAGE;
use crate::errors::{AppError, AppResult};
use crate::models::domain::question::{Difficulty, Question, QuestionType};

/// Response body of the Open Trivia DB `api.php` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenTriviaResponse {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<OpenTriviaQuestion>,
}

/// A question as sent on the wire, every text field RFC 3986 percent-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenTriviaQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl OpenTriviaResponse {
    /// Decodes every entry, rejecting non-zero response codes.
    pub fn into_questions(self) -> AppResult<Vec<Question>> {
        if self.response_code != 0 {
            log::warn!(
                "Question source answered with response code {}",
                self.response_code
            );
            return Err(unavailable());
        }
        self.results
            .into_iter()
            .map(OpenTriviaQuestion::into_question)
            .collect()
    }
}

impl OpenTriviaQuestion {
    pub fn into_question(self) -> AppResult<Question> {
        let question_type = QuestionType::parse(&decode(&self.question_type)?)
            .ok_or_else(|| malformed("type", &self.question_type))?;
        let difficulty = Difficulty::parse(&decode(&self.difficulty)?)
            .ok_or_else(|| malformed("difficulty", &self.difficulty))?;
        let incorrect_answers = self
            .incorrect_answers
            .iter()
            .map(|a| decode(a))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Question::new(
            &decode(&self.category)?,
            question_type,
            difficulty,
            &decode(&self.question)?,
            &decode(&self.correct_answer)?,
            incorrect_answers,
        ))
    }
}

fn decode(value: &str) -> AppResult<String> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|e| {
            log::warn!("Undecodable text from question source: {}", e);
            unavailable()
        })
}

fn malformed(field: &str, value: &str) -> AppError {
    log::warn!("Unexpected {} '{}' from question source", field, value);
    unavailable()
}

fn unavailable() -> AppError {
    AppError::QuestionsUnavailable(NO_QUESTIONS_MESSAGE.to_string())
}
