use serde::{Deserialize, Serialize};
use std::fmt;

/// A purchase request as typed by the user: `"<product-id> <cost>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub product_id: String,
    pub declared_cost: f64,
}

/// Market price for a product. `None` means the lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketQuote {
    pub average_price: Option<f64>,
}

impl MarketQuote {
    /// Non-finite and non-positive prices count as a failed lookup.
    pub fn new(average_price: f64) -> Self {
        if average_price.is_finite() && average_price > 0.0 {
            Self {
                average_price: Some(average_price),
            }
        } else {
            Self::unavailable()
        }
    }

    pub fn unavailable() -> Self {
        Self { average_price: None }
    }

    pub fn is_available(&self) -> bool {
        self.average_price.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Go,
    NoGo,
}

impl Decision {
    pub fn marker(&self) -> &'static str {
        match self {
            Decision::Go => "✅ Go",
            Decision::NoGo => "❌ NoGo",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Go => write!(f, "Go"),
            Decision::NoGo => write!(f, "NoGo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product_id: String,
    pub total_cost: f64,
    pub market_price: f64,
    pub profit: f64,
    pub profit_rate: f64,
    pub decision: Decision,
    pub report: String,
}

/// What the pipeline hands back to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Go,
    NoGo,
    Error,
}

impl From<Decision> for Verdict {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Go => Verdict::Go,
            Decision::NoGo => Verdict::NoGo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub verdict: Verdict,
    pub report: String,
}

impl PipelineOutcome {
    pub fn error(report: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Error,
            report: report.into(),
        }
    }
}

impl From<Recommendation> for PipelineOutcome {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            verdict: recommendation.decision.into(),
            report: recommendation.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_quote_rejects_non_positive_prices() {
        assert_eq!(MarketQuote::new(63000.0).average_price, Some(63000.0));
        assert!(!MarketQuote::new(0.0).is_available());
        assert!(!MarketQuote::new(-5.0).is_available());
        assert!(!MarketQuote::new(f64::NAN).is_available());
    }

    #[test]
    fn test_outcome_from_recommendation_keeps_report() {
        let recommendation = Recommendation {
            product_id: "ABC".to_string(),
            total_cost: 46000.0,
            market_price: 63000.0,
            profit: 17000.0,
            profit_rate: 17000.0 / 46000.0,
            decision: Decision::Go,
            report: "report".to_string(),
        };

        let outcome = PipelineOutcome::from(recommendation);
        assert_eq!(outcome.verdict, Verdict::Go);
        assert_eq!(outcome.report, "report");
    }
}
