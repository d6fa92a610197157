mod config;
mod error;
mod inference;
mod routes;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use inference::SimulatedModel;
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = ServerConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if !config.frontend_dir.exists() {
        log::warn!(
            "Frontend directory {} does not exist; build it with `trunk build` first",
            config.frontend_dir.display()
        );
    }

    let model = web::Data::new(SimulatedModel);
    let bind_address = config.bind_address();
    let frontend_dir = config.frontend_dir.clone();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .expose_headers(vec!["x-analysis-id"])
                    .max_age(3600),
            )
            .app_data(model.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
