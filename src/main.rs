use actix_web::{middleware::Logger, web, App, HttpServer};
use sensei_server::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{cors, RequestIdMiddleware},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("{}; model-backed endpoints will fail until it is set", e);
    }

    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "starting HTTP server on {}:{} (model {})",
        config.web_server_host,
        config.web_server_port,
        config.model.model
    );

    let bind = (config.web_server_host.clone(), config.web_server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(RequestIdMiddleware)
            .wrap(cors(&config))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
