use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizItem {
    pub question: String,
    pub answer: String,
}

impl QuizItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_item_serializes_with_plain_field_names() {
        let item = QuizItem::new("江戸幕府を開いた人物は？", "徳川家康");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["question"], "江戸幕府を開いた人物は？");
        assert_eq!(json["answer"], "徳川家康");
    }
}
