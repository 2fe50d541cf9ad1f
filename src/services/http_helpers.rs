use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::errors::AppError;

/// Creates a success JSON response
pub fn success_json<T: serde::Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(data)
}

/// JSON extractor settings shared by every endpoint. Bodies are parsed as JSON
/// whatever their `Content-Type`, and parse failures become `InvalidPayload`
/// so the client always receives a JSON error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(invalid_payload)
}

fn invalid_payload(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected malformed JSON on {}: {}", req.path(), err);
    AppError::InvalidPayload(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, post, test, App};

    #[post("/echo")]
    async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
        success_json(body.into_inner())
    }

    #[actix_web::test]
    async fn test_success_json() {
        let response = success_json(serde_json::json!({ "ok": true }));
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], br#"{"ok":true}"#);
    }

    #[actix_web::test]
    async fn test_malformed_json_becomes_invalid_payload() {
        let app = test::init_service(App::new().app_data(json_config()).service(echo)).await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INVALID_PAYLOAD");
    }

    #[actix_web::test]
    async fn test_json_accepted_without_content_type() {
        let app = test::init_service(App::new().app_data(json_config()).service(echo)).await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .set_payload(r#"{"a":1}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
