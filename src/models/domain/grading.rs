use serde::Serialize;

use crate::{
    constants::labels::{CORRECT_MARKER, INCORRECT_MARKER},
    errors::{AppError, AppResult},
    models::dto::request::GradingRequestDto,
};

/// A validated grading submission. Only constructible from a request whose
/// fields are all non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradingRequest {
    user_text: String,
    question: String,
    correct_answer: String,
}

impl GradingRequest {
    pub fn new(
        user_text: impl Into<String>,
        question: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> AppResult<Self> {
        GradingRequestDto {
            user_text: user_text.into(),
            question: question.into(),
            correct_answer: correct_answer.into(),
        }
        .try_into()
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}

impl TryFrom<GradingRequestDto> for GradingRequest {
    type Error = AppError;

    fn try_from(dto: GradingRequestDto) -> Result<Self, Self::Error> {
        let dto = dto.normalized()?;
        Ok(Self {
            user_text: dto.user_text,
            question: dto.question,
            correct_answer: dto.correct_answer,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GradingResult {
    pub correctness: String,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl GradingResult {
    /// Display heuristic over the free-text label. `不正解` contains `正解`,
    /// so both substrings are tested.
    pub fn verdict(&self) -> Verdict {
        if self.correctness.contains(CORRECT_MARKER) && !self.correctness.contains(INCORRECT_MARKER)
        {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}
