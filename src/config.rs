use std::{env, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_MODEL_ENDPOINT: &str = "https://models.github.ai/inference";
pub const DEFAULT_MODEL_NAME: &str = "mistral-ai/mistral-medium-2505";

/// Sampling settings fixed per call-site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CallSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CallSettings {
    pub const GRADING: CallSettings = CallSettings {
        temperature: 0.5,
        max_tokens: 300,
    };
    pub const CORRECTION: CallSettings = CallSettings {
        temperature: 0.3,
        max_tokens: 1000,
    };
    pub const GENERATION: CallSettings = CallSettings {
        temperature: 0.8,
        max_tokens: 200,
    };
}

/// Everything the completion pipeline needs to reach the model.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub endpoint: String,
    pub model: String,
    pub credential: Option<SecretString>,
    pub grading: CallSettings,
    pub correction: CallSettings,
    pub generation: CallSettings,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub model: ModelConfig,
    pub model_timeout: Duration,
    pub problems_path: String,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model: ModelConfig {
                endpoint: env::var("MODEL_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_MODEL_ENDPOINT.to_string()),
                model: env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string()),
                credential: env::var("GITHUB_TOKEN")
                    .ok()
                    .filter(|t| !t.trim().is_empty())
                    .map(SecretString::from),
                grading: CallSettings::GRADING,
                correction: CallSettings::CORRECTION,
                generation: CallSettings::GENERATION,
            },
            model_timeout: Duration::from_secs(
                env::var("MODEL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            problems_path: env::var("PROBLEMS_PATH")
                .unwrap_or_else(|_| "problems.csv".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
        }
    }

    /// Checks that the model endpoint and credential are present.
    pub fn validate(&self) -> AppResult<()> {
        self.model.validate()
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            model: ModelConfig {
                endpoint: "http://127.0.0.1:1".to_string(),
                model: "test-model".to_string(),
                credential: Some(SecretString::from("test_token".to_string())),
                grading: CallSettings::GRADING,
                correction: CallSettings::CORRECTION,
                generation: CallSettings::GENERATION,
            },
            model_timeout: Duration::from_secs(5),
            problems_path: "problems.csv".to_string(),
            cors_allowed_origin: None,
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "MODEL_ENDPOINT is not set".to_string(),
            ));
        }
        if self.credential.is_none() {
            return Err(AppError::ConfigurationError(
                "GITHUB_TOKEN is not set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.web_server_host.is_empty());
        assert!(!config.model.endpoint.is_empty());
        assert_eq!(config.model.grading, CallSettings::GRADING);
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = Config::test_config();

        assert!(config.validate().is_ok());
        assert_eq!(config.model.model, "test-model");
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let mut config = Config::test_config();
        config.model.credential = None;

        assert!(matches!(
            config.validate(),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_missing_endpoint_is_configuration_error() {
        let mut config = Config::test_config();
        config.model.endpoint = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_call_sites_order_temperatures() {
        assert!(CallSettings::CORRECTION.temperature < CallSettings::GRADING.temperature);
        assert!(CallSettings::GRADING.temperature < CallSettings::GENERATION.temperature);
    }
}
