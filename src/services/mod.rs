pub mod completion_client;
pub mod extractor;
pub mod http_helpers;
pub mod problem_bank;
pub mod prompt_builder;
pub mod quiz_service;

pub use completion_client::{CompletionClient, CompletionRequest, HttpCompletionClient};
pub use problem_bank::ProblemBank;
pub use quiz_service::QuizService;
