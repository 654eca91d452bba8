use crate::core::engine::RecommendationEngine;
use crate::core::parser;
use crate::domain::model::{MarketQuote, PipelineOutcome};
use crate::domain::ports::{PriceLookup, ReplyDelivery};
use crate::utils::error::BotError;
use std::sync::Arc;

/// parse -> price lookup -> evaluate, with every domain failure folded into a fallback reply.
#[derive(Clone)]
pub struct DecisionPipeline {
    engine: RecommendationEngine,
    quotes: Arc<dyn PriceLookup>,
}

impl DecisionPipeline {
    pub fn new(engine: RecommendationEngine, quotes: Arc<dyn PriceLookup>) -> Self {
        Self { engine, quotes }
    }

    pub async fn handle_inbound_message(&self, raw_text: &str) -> PipelineOutcome {
        let message = match parser::parse(raw_text) {
            Ok(message) => message,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("⛔ Invalid message format ({}): {:?}", e, raw_text);
                return PipelineOutcome::error(e.fallback_reply());
            }
            Err(e) => {
                tracing::error!("💥 Message parsing failed: {}", e);
                return PipelineOutcome::error(e.fallback_reply());
            }
        };

        tracing::info!(
            product_id = %message.product_id,
            declared_cost = message.declared_cost,
            "🟡 Looking up market price"
        );

        let quote = match self.quotes.lookup_market_price(&message.product_id).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::error!(
                    product_id = %message.product_id,
                    "💥 Market price lookup failed: {}",
                    e
                );
                MarketQuote::unavailable()
            }
        };

        match self.engine.evaluate(&message, quote) {
            Ok(recommendation) => {
                tracing::info!(
                    product_id = %recommendation.product_id,
                    decision = %recommendation.decision,
                    profit = recommendation.profit,
                    "✅ Recommendation ready"
                );
                recommendation.into()
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!("❌ {}", e);
                PipelineOutcome::error(e.fallback_reply())
            }
            Err(e) => {
                tracing::error!("💥 Evaluation failed: {}", e);
                PipelineOutcome::error(e.fallback_reply())
            }
        }
    }

    /// Runs the pipeline and sends the report back. Delivery failures are logged, not retried.
    pub async fn respond(
        &self,
        replies: &dyn ReplyDelivery,
        reply_token: &str,
        raw_text: &str,
    ) -> PipelineOutcome {
        let outcome = self.handle_inbound_message(raw_text).await;

        if let Err(e) = replies.deliver_reply(reply_token, &outcome.report).await {
            let e = match e {
                failure @ BotError::DeliveryFailure { .. } => failure,
                other => BotError::DeliveryFailure {
                    message: other.to_string(),
                },
            };
            tracing::error!(verdict = ?outcome.verdict, "💥 {}", e);
        }

        outcome
    }
}
