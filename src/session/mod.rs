//! Per-tab quiz state driving the grading pipeline, independent of any UI toolkit.

pub mod controller;
pub mod speech;

pub use controller::{
    Control, CorrectionView, GradingView, QuizBackend, QuizSession, SessionOutcome,
};
pub use speech::{NoSpeech, SpeechCapability, SpeechError};
