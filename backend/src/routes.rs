use crate::error::ApiError;
use crate::inference::SimulatedModel;
use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::info;
use serde_json::json;
use std::path::PathBuf;
use uuid::Uuid;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: PathBuf) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/inference").route(web::post().to(handle_inference)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_inference(
    model: web::Data<SimulatedModel>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let mut image_data = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        // other fields are drained and dropped
        let is_image = field.name() == Some("image");
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| ApiError::Upload(e.to_string()))?;
            if is_image {
                image_data.extend_from_slice(&data);
            }
        }
    }

    if image_data.is_empty() {
        return Err(ApiError::NoImage);
    }

    let analysis_id = Uuid::new_v4();
    info!("Analysis {}: received {} bytes", analysis_id, image_data.len());
    let result = model.analyze(&image_data);

    Ok(HttpResponse::Ok()
        .insert_header(("x-analysis-id", analysis_id.to_string()))
        .json(result))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
