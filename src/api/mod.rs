use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::food::analyzer::{AnalyzeError, FoodAnalyzer};

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<FoodAnalyzer>,
}

#[derive(Serialize)]
struct ApiMessage {
    message: String,
}

/// Create and configure the API router
pub fn create_api(analyzer: FoodAnalyzer) -> Router {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    // Fully permissive CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

async fn analyze_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }

        let declared_mime = field.content_type().map(|c| c.to_string());
        match field.bytes().await {
            Ok(bytes) => {
                let bytes = bytes.to_vec();
                let mime = declared_mime.unwrap_or_else(|| sniff_mime(&bytes).to_string());
                upload = Some((bytes, mime));
            }
            Err(e) => {
                error!("Failed to read uploaded image: {}", e);
            }
        }
        break;
    }

    let (bytes, mime) = match upload {
        Some(found) => found,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiMessage {
                    message: "No image provided".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.analyzer.analyze(&bytes, &mime).await {
        Ok(data) => Json(data).into_response(),
        Err(AnalyzeError::EmptyImage) => (
            StatusCode::BAD_REQUEST,
            Json(ApiMessage {
                message: "No image provided".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error analyzing food: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage {
                    message: "Failed to analyze food image".to_string(),
                }),
            )
                .into_response()
        }
    }
}

// Best-effort detection for uploads that omit a content type.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => "image/png",
        Ok(image::ImageFormat::Gif) => "image/gif",
        Ok(image::ImageFormat::WebP) => "image/webp",
        _ => "image/jpeg",
    }
}

async fn health_check() -> Response {
    Json(ApiMessage {
        message: "Server is running and healthy".to_string(),
    })
    .into_response()
}
