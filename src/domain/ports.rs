use crate::domain::model::MarketQuote;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of market prices keyed by product identifier.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn lookup_market_price(&self, product_id: &str) -> Result<MarketQuote>;
}

/// Messaging-platform reply call. `destination` is the platform's reply token.
#[async_trait]
pub trait ReplyDelivery: Send + Sync {
    async fn deliver_reply(&self, destination: &str, text: &str) -> Result<()>;
}
