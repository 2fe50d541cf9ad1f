use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Body of `POST /api/check-answer`. Absent fields deserialize as empty so
/// they surface as `MissingField` rather than a payload error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequestDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_text: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub question: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub correct_answer: String,
}

/// Body of `POST /api/check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequestDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_text: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub current_problem: String,
}

impl GradingRequestDto {
    const FIELDS: [&'static str; 3] = ["user_text", "question", "correct_answer"];

    /// Trims every field and rejects the request if any is left empty.
    pub fn normalized(self) -> AppResult<Self> {
        let dto = Self {
            user_text: self.user_text.trim().to_string(),
            question: self.question.trim().to_string(),
            correct_answer: self.correct_answer.trim().to_string(),
        };
        dto.validate()
            .map_err(|e| AppError::from_validation(&e, &Self::FIELDS))?;
        Ok(dto)
    }
}

impl CorrectionRequestDto {
    const FIELDS: [&'static str; 2] = ["user_text", "current_problem"];

    pub fn normalized(self) -> AppResult<Self> {
        let dto = Self {
            user_text: self.user_text.trim().to_string(),
            current_problem: self.current_problem.trim().to_string(),
        };
        dto.validate()
            .map_err(|e| AppError::from_validation(&e, &Self::FIELDS))?;
        Ok(dto)
    }
}
