use crate::models::domain::{
    question::{Difficulty, QuestionType},
    Question,
};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::services::quiz_session_store::QuizSettings;

    /// A single question whose correct answer is `Answer {n}`.
    pub fn sample_question(n: usize) -> Question {
        Question::new(
            "General Knowledge",
            QuestionType::Multiple,
            Difficulty::Medium,
            &format!("Sample question {}?", n),
            &format!("Answer {}", n),
            vec![
                format!("Decoy {}-a", n),
                format!("Decoy {}-b", n),
                format!("Decoy {}-c", n),
            ],
        )
    }

    pub fn sample_questions(count: usize) -> Vec<Question> {
        (1..=count).map(sample_question).collect()
    }

    /// Ten questions, five minutes.
    pub fn test_settings() -> QuizSettings {
        QuizSettings {
            total_questions: 10,
            category: 9,
            question_type: "multiple".to_string(),
            total_time: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_questions() {
        let questions = sample_questions(3);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].correct_answer, "Answer 1");
        assert_eq!(questions[2].all_answers.len(), 4);
    }

    #[test]
    fn test_fixtures_test_settings() {
        let settings = test_settings();
        assert_eq!(settings.total_questions, 10);
        assert_eq!(settings.total_time, 300);
    }
}
