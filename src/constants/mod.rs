pub mod labels;
pub mod prompts;
