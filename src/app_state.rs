use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{CompletionClient, HttpCompletionClient, ProblemBank, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub problem_bank: Arc<ProblemBank>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        let client = Arc::new(HttpCompletionClient::new(http, &config.model));

        let problem_bank = match ProblemBank::load(&config.problems_path).await {
            Ok(bank) => bank,
            Err(e) => {
                log::warn!("Starting without correction problems: {}", e);
                ProblemBank::default()
            }
        };

        Ok(Self::from_parts(config, client, problem_bank))
    }

    pub fn from_parts(
        config: Config,
        client: Arc<dyn CompletionClient>,
        problem_bank: ProblemBank,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            client,
            &config.model,
            config.model_timeout,
        ));

        Self {
            quiz_service,
            problem_bank: Arc::new(problem_bank),
            config: Arc::new(config),
        }
    }
}
