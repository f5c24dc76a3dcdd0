use std::fmt;

use crate::models::domain::{QuizSession, QuizStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 90 => Grade::A,
            p if p >= 75 => Grade::B,
            p if p >= 60 => Grade::C,
            p if p >= 50 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::A => "Excellent!",
            Grade::B => "Great job!",
            Grade::C => "Good effort!",
            Grade::D => "Keep practicing!",
            Grade::F => "Try again!",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItem {
    pub number: usize,
    pub question: String,
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
    pub review: Vec<ReviewItem>,
}

impl QuizResult {
    /// Scores a session. Unanswered questions count as wrong.
    pub fn from_session(session: &QuizSession) -> Self {
        if session.status != QuizStatus::Finished {
            log::debug!("Scoring a session with status {:?}", session.status);
        }

        let total = session.questions.len();
        let correct = session.correct_count();
        let percentage = percentage(correct, total);

        let review = session
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let answer = session.answer_for(&question.id);
                ReviewItem {
                    number: i + 1,
                    question: question.question.clone(),
                    selected_answer: answer.map(|a| a.selected_answer.clone()),
                    correct_answer: question.correct_answer.clone(),
                    is_correct: answer.map(|a| a.is_correct).unwrap_or(false),
                }
            })
            .collect();

        QuizResult {
            correct,
            wrong: total - correct,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            review,
        }
    }
}

/// `round(100 * correct / total)`, rounding halves up; zero when there are no questions.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * correct + total) / (2 * total)) as u32
}
