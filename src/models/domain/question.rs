use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::shuffle::shuffle;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub all_answers: Vec<String>, // shuffled once at construction, never reordered
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Multiple,
    Boolean,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "multiple" => Some(QuestionType::Multiple),
            "boolean" => Some(QuestionType::Boolean),
            _ => None,
        }
    }
}

impl Difficulty {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl Question {
    /// Builds a question with a fresh id and a shuffled answer order.
    pub fn new(
        category: &str,
        question_type: QuestionType,
        difficulty: Difficulty,
        question: &str,
        correct_answer: &str,
        incorrect_answers: Vec<String>,
    ) -> Self {
        let mut answers = Vec::with_capacity(incorrect_answers.len() + 1);
        answers.push(correct_answer.to_string());
        answers.extend(incorrect_answers.iter().cloned());

        Question {
            id: Uuid::new_v4().to_string(),
            category: category.to_string(),
            question_type,
            difficulty,
            question: question.to_string(),
            correct_answer: correct_answer.to_string(),
            incorrect_answers,
            all_answers: shuffle(&answers),
        }
    }

    /// Exact string comparison against the correct answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    pub fn answer_at(&self, index: usize) -> Option<&str> {
        self.all_answers.get(index).map(String::as_str)
    }

    /// True when `all_answers` is a permutation of the correct and incorrect answers.
    pub fn answers_are_consistent(&self) -> bool {
        let mut expected: Vec<&str> = std::iter::once(self.correct_answer.as_str())
            .chain(self.incorrect_answers.iter().map(String::as_str))
            .collect();
        let mut actual: Vec<&str> = self.all_answers.iter().map(String::as_str).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        expected == actual
    }
}
