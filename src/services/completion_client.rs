use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::{CallSettings, ModelConfig},
    errors::{AppError, AppResult},
    models::domain::ModelCompletion,
};

/// One single-turn chat completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub settings: CallSettings,
}

/// Sends a system instruction and a user prompt to a chat-completion
/// service and returns the first choice's text. Implementations make exactly
/// one call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<ModelCompletion>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client authenticated with a bearer token.
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    credential: Option<SecretString>,
}

impl HttpCompletionClient {
    pub fn new(http: reqwest::Client, config: &ModelConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.trim().trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credential: config.credential.clone(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<ModelCompletion> {
        let credential = self.credential.as_ref().ok_or_else(|| {
            AppError::ConfigurationError("GITHUB_TOKEN is not set".to_string())
        })?;
        if self.endpoint.is_empty() {
            return Err(AppError::ConfigurationError(
                "MODEL_ENDPOINT is not set".to_string(),
            ));
        }

        let body = ChatCompletionBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.settings.temperature,
            max_tokens: request.settings.max_tokens,
        };

        log::info!(
            "Requesting completion from {} (model {}, temperature {}, max_tokens {})",
            self.endpoint,
            self.model,
            body.temperature,
            body.max_tokens
        );

        let response = self
            .http
            .post(self.url())
            .bearer_auth(credential.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach completion service: {}", e);
                AppError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::error!("Completion service rejected the credential ({})", status);
            return Err(AppError::AuthError(upstream_detail(&text, status)));
        }
        if !status.is_success() {
            log::error!("Completion service answered {}: {}", status, text);
            return Err(AppError::UpstreamError {
                status: status.as_u16(),
                detail: upstream_detail(&text, status),
            });
        }

        let payload: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| AppError::UpstreamError {
                status: status.as_u16(),
                detail: format!("Malformed completion payload: {}", e),
            })?;

        first_content(payload)
            .map(ModelCompletion::new)
            .ok_or_else(|| {
                log::warn!("Completion service returned no usable content");
                AppError::EmptyCompletion
            })
    }
}

fn first_content(payload: ChatCompletionResponse) -> Option<String> {
    payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Prefers `error.message` (or a bare string `error`) from a JSON error body,
/// falling back to the raw body and finally the status line.
fn upstream_detail(body: &str, status: StatusCode) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        value
            .pointer("/error/message")
            .or_else(|| value.get("error"))
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    });

    message
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.to_string())
}
