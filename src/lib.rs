pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{HttpQuoteClient, LineReplyClient, StaticQuoteSource};
pub use app::{build_router, AppState};
pub use config::{BotConfig, EngineConfig, ProfitPolicy};
pub use crate::core::{engine::RecommendationEngine, parser::parse, pipeline::DecisionPipeline};
pub use domain::model::{
    Decision, InboundMessage, MarketQuote, PipelineOutcome, Recommendation, Verdict,
};
pub use utils::error::{BotError, Result};
