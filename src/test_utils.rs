use crate::models::domain::{CorrectionRequest, GradingRequest, ModelCompletion};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// The Tokugawa Ieyasu grading request used across tests.
    pub fn tokugawa_request(user_text: &str) -> GradingRequest {
        GradingRequest::new(user_text, "江戸幕府を開いた人物は？", "徳川家康")
            .expect("fixture fields are non-empty")
    }

    pub fn park_correction() -> CorrectionRequest {
        CorrectionRequest::new("I go to park yesterday.", "私は昨日公園に行きました。")
            .expect("fixture fields are non-empty")
    }

    pub fn correct_grading_completion() -> ModelCompletion {
        ModelCompletion::new("正誤: 正解\n解説: よくできました。")
    }

    pub fn park_correction_completion() -> ModelCompletion {
        ModelCompletion::new(
            "添削後: I went to the park yesterday.\nスコア: 85\nアドバイス: 文法は正確です。",
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test};
    use serde_json::Value;

    /// Checks an error response's status and `error` code, and that the body
    /// repeats the status in `code`. Returns the body for further checks.
    pub async fn read_error_body<B: MessageBody>(
        resp: ServiceResponse<B>,
        status: StatusCode,
        error: &str,
    ) -> Value {
        assert_eq!(resp.status(), status, "unexpected status");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], error, "unexpected error code in {}", body);
        assert_eq!(body["code"], status.as_u16());
        body
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::extractor::{extract_correction, extract_grading};

    #[test]
    fn test_fixtures_tokugawa_request() {
        let request = tokugawa_request("徳川家康");
        assert_eq!(request.correct_answer(), "徳川家康");
    }

    #[test]
    fn test_fixture_completions_follow_templates() {
        assert_eq!(extract_grading(&correct_grading_completion()).correctness, "正解");
        assert_eq!(extract_correction(&park_correction_completion()).score, Some(85));
        assert_eq!(park_correction().source_sentence(), "私は昨日公園に行きました。");
    }
}
