use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerRecord, Question};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizStatus {
    #[default]
    Idle,
    InProgress,
    Finished,
}

/// One run of the quiz, also the layout of the persisted session record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub user_answers: Vec<AnswerRecord>,
    pub time_left: u32,
    pub total_time: u32,
    pub status: QuizStatus,
    pub total_questions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in progress; nothing changed.
    Ignored,
    Running,
    /// The countdown reached zero and the session finished.
    Expired,
}

impl QuizSession {
    pub fn new(total_questions: usize, total_time: u32) -> Self {
        QuizSession {
            questions: Vec::new(),
            current_index: 0,
            user_answers: Vec::new(),
            time_left: total_time,
            total_time,
            status: QuizStatus::Idle,
            total_questions,
            saved_at: None,
        }
    }

    /// A fresh IN_PROGRESS session over `questions`.
    pub fn in_progress(questions: Vec<Question>, total_time: u32) -> Self {
        let total_questions = questions.len();
        QuizSession {
            questions,
            status: QuizStatus::InProgress,
            ..QuizSession::new(total_questions, total_time)
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    pub fn has_unfinished_quiz(&self) -> bool {
        self.status == QuizStatus::InProgress && !self.questions.is_empty()
    }

    pub fn elapsed(&self) -> u32 {
        self.total_time.saturating_sub(self.time_left)
    }

    pub fn correct_count(&self) -> usize {
        self.user_answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        self.user_answers
            .iter()
            .find(|a| a.question_id == question_id)
    }

    /// Records the answer to the current question and advances, or finishes on the last one.
    pub fn record_answer(&mut self, selected_answer: &str) -> AppResult<AnswerRecord> {
        if self.status != QuizStatus::InProgress {
            return Err(AppError::InvalidState(
                "No quiz is in progress".to_string(),
            ));
        }
        if self.user_answers.len() != self.current_index {
            return Err(AppError::InvalidState(format!(
                "Question {} was already answered",
                self.current_index + 1
            )));
        }
        let question = self.current_question().ok_or_else(|| {
            AppError::InvalidState(format!("No question at index {}", self.current_index))
        })?;

        let record = AnswerRecord::for_question(question, selected_answer, self.elapsed());
        self.user_answers.push(record.clone());

        if self.is_last_question() {
            self.status = QuizStatus::Finished;
        } else {
            self.current_index += 1;
        }

        Ok(record)
    }

    /// Advances the countdown by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != QuizStatus::InProgress {
            return TickOutcome::Ignored;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.status = QuizStatus::Finished;
            return TickOutcome::Expired;
        }
        self.time_left -= 1;
        TickOutcome::Running
    }

    /// Structural checks a restored IN_PROGRESS record must pass before adoption.
    pub fn is_resumable(&self) -> bool {
        self.status == QuizStatus::InProgress
            && !self.questions.is_empty()
            && self.current_index < self.questions.len()
            && self.user_answers.len() == self.current_index
            && self.time_left <= self.total_time
            && self.questions.iter().all(Question::answers_are_consistent)
    }
}
