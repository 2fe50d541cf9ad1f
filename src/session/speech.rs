use async_trait::async_trait;
use thiserror::Error;

/// Language used for both dictation and read-back of English answers.
pub const SPEECH_LANG: &str = "en-US";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("音声入力はこのブラウザでサポートされていません")]
    Unsupported,

    #[error("音声入力エラー: {0}")]
    Recognition(String),
}

/// Platform speech input and output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechCapability: Send + Sync {
    /// Listens once and returns the best transcript.
    async fn start_dictation(&self, lang: &str) -> Result<String, SpeechError>;

    fn speak(&self, text: &str, lang: &str) -> Result<(), SpeechError>;
}

/// For hosts without speech support.
pub struct NoSpeech;

#[async_trait]
impl SpeechCapability for NoSpeech {
    async fn start_dictation(&self, _lang: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unsupported)
    }

    fn speak(&self, _text: &str, _lang: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported)
    }
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
