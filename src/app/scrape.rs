//! Placeholder price-lookup endpoint. Answers with the stub source until real market data exists.

use crate::app::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub model: Option<String>,
}

pub async fn quote(State(state): State<AppState>, Query(query): Query<ScrapeQuery>) -> Response {
    let Some(model) = query.model.filter(|m| !m.trim().is_empty()) else {
        tracing::warn!("⛔ Scrape request without a model");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "model is required" })),
        )
            .into_response();
    };

    match state.scrape_source.lookup_market_price(&model).await {
        Ok(quote) => match quote.average_price {
            Some(avg) => Json(json!({ "avg": avg })).into_response(),
            None => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "market price unavailable" })),
            )
                .into_response(),
        },
        Err(e) => {
            tracing::error!(model = %model, "💥 Scrape lookup failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": "market price unavailable" })),
            )
                .into_response()
        }
    }
}
