use std::{env, path::PathBuf, time::Duration};

use crate::constants::{
    DEFAULT_AUTO_SAVE_MILLIS, DEFAULT_TICK_MILLIS, DEFAULT_TOTAL_QUESTIONS,
    DEFAULT_TOTAL_TIME_SECS, GENERAL_KNOWLEDGE_CATEGORY, OPEN_TRIVIA_BASE_URL,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub api_base_url: String,
    pub total_questions: usize,
    pub category: u32,
    pub question_type: String,
    pub total_time_secs: u32,
    pub tick_interval: Duration,
    pub auto_save_interval: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }

        Self {
            data_dir: env::var("QUIZ_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".trivia-quiz")),
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| OPEN_TRIVIA_BASE_URL.to_string()),
            total_questions: positive_var("QUIZ_TOTAL_QUESTIONS")
                .unwrap_or(DEFAULT_TOTAL_QUESTIONS),
            category: positive_var("QUIZ_CATEGORY").unwrap_or(GENERAL_KNOWLEDGE_CATEGORY),
            question_type: env::var("QUIZ_QUESTION_TYPE")
                .unwrap_or_else(|_| "multiple".to_string()),
            total_time_secs: positive_var("QUIZ_TOTAL_TIME_SECS")
                .unwrap_or(DEFAULT_TOTAL_TIME_SECS),
            tick_interval: Duration::from_millis(
                positive_var("QUIZ_TICK_MILLIS").unwrap_or(DEFAULT_TICK_MILLIS),
            ),
            auto_save_interval: Duration::from_millis(
                positive_var("QUIZ_AUTO_SAVE_MILLIS").unwrap_or(DEFAULT_AUTO_SAVE_MILLIS),
            ),
            request_timeout: Duration::from_secs(
                positive_var("QUIZ_REQUEST_TIMEOUT_SECS").unwrap_or(15),
            ),
        }
    }

    pub fn test_config() -> Self {
        Self {
            data_dir: env::temp_dir().join("trivia-quiz-test"),
            api_base_url: "http://127.0.0.1:9/api.php".to_string(),
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            category: GENERAL_KNOWLEDGE_CATEGORY,
            question_type: "multiple".to_string(),
            total_time_secs: DEFAULT_TOTAL_TIME_SECS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
            auto_save_interval: Duration::from_millis(DEFAULT_AUTO_SAVE_MILLIS),
            request_timeout: Duration::from_secs(1),
        }
    }
}

/// Parses a numeric variable, ignoring missing, malformed and zero values.
fn positive_var<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .filter(|v| *v != T::default())
}
