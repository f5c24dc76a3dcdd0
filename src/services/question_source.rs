use std::time::Duration;

use async_trait::async_trait;

use crate::{
    config::Config,
    constants::FETCH_FAILED_MESSAGE,
    errors::{AppError, AppResult},
    models::{
        domain::Question,
        dto::{open_trivia::OpenTriviaResponse, request::QuestionRequest},
    },
};

/// Supplies batches of multiple-choice questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetches one batch with answers already shuffled per question.
    async fn fetch_questions(&self, request: &QuestionRequest) -> AppResult<Vec<Question>>;
}

pub struct OpenTriviaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenTriviaClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout)
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaClient {
    async fn fetch_questions(&self, request: &QuestionRequest) -> AppResult<Vec<Question>> {
        log::debug!(
            "Requesting {} questions (category {}, type {})",
            request.amount,
            request.category,
            request.question_type
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(request)
            .query(&[("encode", "url3986")])
            .send()
            .await
            .map_err(|e| {
                log::error!("Question source request failed: {}", e);
                AppError::from(e)
            })?;

        if !response.status().is_success() {
            log::error!("Question source returned HTTP {}", response.status());
            return Err(AppError::QuestionsUnavailable(
                FETCH_FAILED_MESSAGE.to_string(),
            ));
        }

        let body: OpenTriviaResponse = response.json().await.map_err(|e| {
            log::error!("Question source sent an unreadable body: {}", e);
            AppError::from(e)
        })?;
        body.into_questions()
    }
}
