use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::{
    config::{CallSettings, ModelConfig},
    constants::prompts::GENERATION_KEYWORDS,
    errors::{AppError, AppResult},
    models::domain::{
        CorrectionRequest, CorrectionResult, GradingRequest, GradingResult, ModelCompletion,
        QuizItem,
    },
    services::{
        completion_client::{CompletionClient, CompletionRequest},
        extractor::{extract_correction, extract_grading, extract_quiz_item},
        prompt_builder::{correction_prompt, grading_prompt, question_prompt, Prompt},
    },
    session::QuizBackend,
};

/// Prompt, complete, extract. One completion call per operation.
pub struct QuizService {
    client: Arc<dyn CompletionClient>,
    grading: CallSettings,
    correction: CallSettings,
    generation: CallSettings,
    timeout: Duration,
}

impl QuizService {
    pub fn new(client: Arc<dyn CompletionClient>, model: &ModelConfig, timeout: Duration) -> Self {
        Self {
            client,
            grading: model.grading,
            correction: model.correction,
            generation: model.generation,
            timeout,
        }
    }

    pub async fn grade(&self, request: &GradingRequest) -> AppResult<GradingResult> {
        let completion = self.dispatch(grading_prompt(request), self.grading).await?;
        let result = extract_grading(&completion);
        log::info!("Graded answer as '{}'", result.correctness);
        Ok(result)
    }

    pub async fn correct(&self, request: &CorrectionRequest) -> AppResult<CorrectionResult> {
        let completion = self
            .dispatch(correction_prompt(request), self.correction)
            .await?;
        let result = extract_correction(&completion);
        log::info!("Corrected sentence with score {:?}", result.score);
        Ok(result)
    }

    pub async fn generate_question(&self) -> AppResult<QuizItem> {
        self.generate_question_about(pick_keyword()).await
    }

    pub async fn generate_question_about(&self, keyword: &str) -> AppResult<QuizItem> {
        let completion = self
            .dispatch(question_prompt(keyword), self.generation)
            .await?;
        extract_quiz_item(&completion).inspect_err(|_| {
            log::warn!(
                "Could not extract question from completion: {:?}",
                completion.raw_text
            );
        })
    }

    /// The completion client imposes no deadline of its own; expiry here is
    /// reported like any other failure to reach the service.
    async fn dispatch(&self, prompt: Prompt, settings: CallSettings) -> AppResult<ModelCompletion> {
        let request = CompletionRequest {
            system: prompt.system.to_string(),
            prompt: prompt.user,
            settings,
        };

        match tokio::time::timeout(self.timeout, self.client.complete(request)).await {
            Ok(Ok(completion)) => Ok(completion),
            Ok(Err(err)) => {
                log::warn!("Completion failed ({}): {}", err.error_code(), err);
                Err(err)
            }
            Err(_) => {
                log::error!("Completion timed out after {:?}", self.timeout);
                Err(AppError::TransportError(format!(
                    "no response within {} seconds",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

fn pick_keyword() -> &'static str {
    GENERATION_KEYWORDS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GENERATION_KEYWORDS[0])
}

#[async_trait]
impl QuizBackend for QuizService {
    async fn grade(&self, request: GradingRequest) -> AppResult<GradingResult> {
        QuizService::grade(self, &request).await
    }

    async fn correct(&self, request: CorrectionRequest) -> AppResult<CorrectionResult> {
        QuizService::correct(self, &request).await
    }

    async fn generate_question(&self) -> AppResult<QuizItem> {
        QuizService::generate_question(self).await
    }
}
