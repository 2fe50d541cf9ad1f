use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::{CorrectionRequest, GradingRequest},
        dto::{
            request::{CorrectionRequestDto, GradingRequestDto},
            response::ProblemResponse,
        },
    },
    services::http_helpers::success_json,
};

#[post("/api/check-answer")]
pub async fn check_answer(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GradingRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = GradingRequest::try_from(request.into_inner())?;
    log::info!("[{}] grading answer", request_tag(&req));
    let result = state.quiz_service.grade(&request).await?;
    Ok(success_json(result))
}

#[post("/api/check")]
pub async fn check_correction(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CorrectionRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = CorrectionRequest::try_from(request.into_inner())?;
    log::info!("[{}] correcting translation", request_tag(&req));
    let result = state.quiz_service.correct(&request).await?;
    Ok(success_json(result))
}

#[get("/api/generate-quiz")]
pub async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    log::info!("[{}] generating question", request_tag(&req));
    let item = state.quiz_service.generate_question().await?;
    Ok(success_json(item))
}

#[get("/api/problems/random")]
pub async fn random_problem(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let problem = state.problem_bank.random()?.to_string();
    Ok(success_json(ProblemResponse { problem }))
}

fn request_tag(req: &HttpRequest) -> String {
    get_request_id(req).unwrap_or_else(|| "-".to_string())
}
