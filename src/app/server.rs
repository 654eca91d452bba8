use crate::adapters::{HttpQuoteClient, LineReplyClient, StaticQuoteSource};
use crate::app::{scrape, webhook};
use crate::config::{BotConfig, QuoteSourceKind};
use crate::core::engine::RecommendationEngine;
use crate::core::pipeline::DecisionPipeline;
use crate::domain::ports::{PriceLookup, ReplyDelivery};
use crate::utils::error::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const WEBHOOK_PATH: &str = "/api/webhook";
pub const SCRAPE_PATH: &str = "/api/scrape";
pub const HEALTH_PATH: &str = "/api/health";

/// Shared, immutable handles for every route.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: DecisionPipeline,
    pub replies: Arc<dyn ReplyDelivery>,
    /// Backs the scrape placeholder endpoint.
    pub scrape_source: Arc<dyn PriceLookup>,
}

impl AppState {
    pub fn new(
        pipeline: DecisionPipeline,
        replies: Arc<dyn ReplyDelivery>,
        scrape_source: Arc<dyn PriceLookup>,
    ) -> Self {
        Self {
            pipeline,
            replies,
            scrape_source,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        let quotes: Arc<dyn PriceLookup> = match config.quote.source {
            QuoteSourceKind::Http => Arc::new(HttpQuoteClient::new(config.quote.endpoint.clone())),
            QuoteSourceKind::Static => Arc::new(StaticQuoteSource::new(config.quote.stub_price)),
        };
        let engine = RecommendationEngine::new(config.engine.clone());

        Self::new(
            DecisionPipeline::new(engine, quotes),
            Arc::new(LineReplyClient::new(&config.line)),
            Arc::new(StaticQuoteSource::new(config.quote.stub_price)),
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook::receive))
        .route(SCRAPE_PATH, get(scrape::quote))
        .route(HEALTH_PATH, get(health_check))
        .with_state(state)
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn serve(config: &BotConfig) -> Result<()> {
    let app = build_router(AppState::from_config(config));
    let listener = TcpListener::bind(config.server.bind.as_str()).await?;

    tracing::info!(
        policy = ?config.engine.profit_policy,
        quote_source = ?config.quote.source,
        "Server is listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}
