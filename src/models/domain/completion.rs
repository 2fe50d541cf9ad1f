/// Free text returned by the model for one prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelCompletion {
    pub raw_text: String,
}

impl ModelCompletion {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw_text
    }
}
