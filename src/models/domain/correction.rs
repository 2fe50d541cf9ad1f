use serde::{Serialize, Serializer};

use crate::{
    constants::labels::DEFAULT_SCORE,
    errors::{AppError, AppResult},
    models::dto::request::CorrectionRequestDto,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionRequest {
    user_text: String,
    source_sentence: String,
}

impl CorrectionRequest {
    pub fn new(user_text: impl Into<String>, source_sentence: impl Into<String>) -> AppResult<Self> {
        CorrectionRequestDto {
            user_text: user_text.into(),
            current_problem: source_sentence.into(),
        }
        .try_into()
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn source_sentence(&self) -> &str {
        &self.source_sentence
    }
}

impl TryFrom<CorrectionRequestDto> for CorrectionRequest {
    type Error = AppError;

    fn try_from(dto: CorrectionRequestDto) -> Result<Self, Self::Error> {
        let dto = dto.normalized()?;
        Ok(Self {
            user_text: dto.user_text,
            source_sentence: dto.current_problem,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub corrected_text: String,
    /// 0 to 100, or `None` when the completion carried no usable score.
    #[serde(serialize_with = "score_or_default")]
    pub score: Option<u8>,
    pub advice: String,
}

impl CorrectionResult {
    /// `"85 / 100"`, or empty when no score was extracted.
    pub fn score_label(&self) -> String {
        self.score
            .map(|score| format!("{} / 100", score))
            .unwrap_or_default()
    }
}

fn score_or_default<S: Serializer>(score: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(score.unwrap_or(DEFAULT_SCORE))
}
