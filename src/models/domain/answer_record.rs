use serde::{Deserialize, Serialize};

use crate::models::domain::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_answer: String,
    pub is_correct: bool,
    pub time_spent: u32, // seconds since the quiz started
}

impl AnswerRecord {
    pub fn for_question(question: &Question, selected_answer: &str, time_spent: u32) -> Self {
        AnswerRecord {
            question_id: question.id.clone(),
            selected_answer: selected_answer.to_string(),
            is_correct: question.is_correct(selected_answer),
            time_spent,
        }
    }
}
