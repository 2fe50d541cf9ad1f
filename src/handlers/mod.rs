pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

pub use health_handler::health_check;
pub use quiz_handler::{check_answer, check_correction, generate_quiz, random_problem};

use crate::services::http_helpers::json_config;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(check_answer)
        .service(check_correction)
        .service(generate_quiz)
        .service(random_problem);
}
