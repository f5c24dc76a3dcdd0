use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{EMPTY_NAME_MESSAGE, SHORT_NAME_MESSAGE};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
}

impl LoginRequest {
    /// Trims the raw input; validation runs on the trimmed name.
    pub fn new(raw_name: &str) -> Self {
        LoginRequest {
            name: raw_name.trim().to_string(),
        }
    }

    pub fn check(&self) -> AppResult<()> {
        if self.name.is_empty() {
            return Err(AppError::ValidationError(EMPTY_NAME_MESSAGE.to_string()));
        }
        self.validate()?;
        Ok(())
    }
}

/// Query parameters sent to the question source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub amount: usize,
    pub category: u32,
    #[serde(rename = "type")]
    pub question_type: String,
}
