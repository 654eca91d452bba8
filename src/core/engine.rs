use crate::config::{EngineConfig, ProfitPolicy};
use crate::core::report::{self, ReportFields};
use crate::domain::model::{Decision, InboundMessage, MarketQuote, Recommendation};
use crate::utils::error::{BotError, Result};

/// Turns a declared cost and a market quote into a Go / No-Go recommendation.
///
/// The engine holds only its configuration; `evaluate` is a pure function of its
/// arguments, so the same inputs always yield the same recommendation.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, message: &InboundMessage, quote: MarketQuote) -> Result<Recommendation> {
        let market_price = quote
            .average_price
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or_else(|| BotError::QuoteUnavailable {
                product_id: message.product_id.clone(),
            })?;

        let total_cost = self.total_cost(message.declared_cost);
        if !total_cost.is_finite() {
            return Err(BotError::malformed(format!(
                "cost {} overflows once fees are applied",
                message.declared_cost
            )));
        }
        let profit = self.profit(market_price, total_cost);
        let profit_rate = if total_cost > 0.0 {
            profit / total_cost
        } else {
            0.0
        };
        let decision = self.decide(profit, profit_rate);

        tracing::debug!(
            product_id = %message.product_id,
            total_cost,
            market_price,
            profit,
            profit_rate,
            %decision,
            "Evaluated purchase"
        );

        let report = report::render(&ReportFields {
            product_id: &message.product_id,
            total_cost,
            market_price,
            profit_rate,
            profit,
            decision,
            currency: &self.config.currency,
        });

        Ok(Recommendation {
            product_id: message.product_id.clone(),
            total_cost,
            market_price,
            profit,
            profit_rate,
            decision,
            report,
        })
    }

    /// Declared cost plus fees, rounded to whole currency units.
    pub fn total_cost(&self, declared_cost: f64) -> f64 {
        (declared_cost * self.config.fee_multiplier).round()
    }

    fn profit(&self, market_price: f64, total_cost: f64) -> f64 {
        match self.config.profit_policy {
            ProfitPolicy::GrossQuote => market_price - total_cost,
            ProfitPolicy::NetOfResaleFee { resale_net_factor } => {
                market_price * resale_net_factor - total_cost
            }
        }
    }

    fn decide(&self, profit: f64, profit_rate: f64) -> Decision {
        if profit >= self.config.profit_threshold
            || profit_rate >= self.config.profit_rate_threshold
        {
            Decision::Go
        } else {
            Decision::NoGo
        }
    }
}
