use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use reqwest::Client;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::aggregator::{self, results_list};
use crate::config::Settings;
use crate::property_client::{Category, fetch_category};
use crate::sanitize::scrub;
use crate::stats;

pub struct AppState {
    pub http: Client,
    pub settings: Settings,
}

pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.settings.server.static_dir);

    Router::new()
        .route(
            "/api/property/:property_id/complete",
            get(complete_property_data),
        )
        .route("/api/property/:property_id", get(property_history))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves the dashboard API until the
/// process is stopped.
pub async fn run(settings: Settings) -> Result<()> {
    let http = Client::builder()
        .timeout(Duration::from_secs(settings.api.timeout_seconds))
        .build()?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = Arc::new(AppState { http, settings });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Aggregate endpoint behind the dashboard: all four categories fetched
/// concurrently, summarized, and flattened into one envelope. Upstream
/// failures degrade to empty data per category, so this always answers 200.
async fn complete_property_data(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Json<Value> {
    let api = &state.settings.api;
    let data = aggregator::fetch_all(&state.http, api, &property_id).await;

    let history = results_list(&data.history);
    let schools = results_list(&data.schools);
    let ethnicity = results_list(&data.ethnicity);

    let price_stats = stats::property_summary(&history);
    let schools_summary = stats::schools_summary(&schools);
    let ethnicity_summary = stats::ethnicity_summary(&ethnicity);

    // Upstream school records are the one category known to carry NaN
    // distances; scrubbed here so the envelope stays valid JSON.
    let schools = scrub(Value::Array(schools));

    let summary_field = |key: &str| -> Value {
        data.summary.get(key).cloned().unwrap_or_else(|| json!(""))
    };

    Json(json!({
        "success": true,
        "property_id": property_id,
        "history": history,
        "price_stats": price_stats,
        "summary": summary_field("summary"),
        "summary_points": summary_field("summary_points"),
        "summary_short": summary_field("summary_short"),
        "schools": schools,
        "schools_summary": schools_summary,
        "ethnicity": ethnicity,
        "ethnicity_summary": ethnicity_summary,
    }))
}

/// Single-category endpoint kept for the existing frontend: unlike the
/// aggregate endpoint it distinguishes "upstream request failed" (500)
/// from "no sale history" (200 with success=false).
async fn property_history(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let api = &state.settings.api;

    match fetch_category(&state.http, api, Category::History, &property_id).await {
        Ok(body) => {
            let history = results_list(&body);
            if history.is_empty() {
                return (
                    StatusCode::OK,
                    Json(json!({
                        "success": false,
                        "error": "No history found for this property",
                        "history": [],
                        "summary": {},
                    })),
                );
            }

            let summary = stats::property_summary(&history);
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "property_id": property_id,
                    "history": history,
                    "summary": summary,
                })),
            )
        }
        Err(e) => {
            log::error!("History request failed for {}: {}", property_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "history": [],
                    "summary": {},
                })),
            )
        }
    }
}
