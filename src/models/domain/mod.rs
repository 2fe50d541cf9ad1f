pub mod completion;
pub mod correction;
pub mod grading;
pub mod quiz_item;
pub use completion::ModelCompletion;
pub use correction::{CorrectionRequest, CorrectionResult};
pub use grading::{GradingRequest, GradingResult, Verdict};
pub use quiz_item::QuizItem;
