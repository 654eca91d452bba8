use crate::domain::model::MarketQuote;
use crate::domain::ports::PriceLookup;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Placeholder market data: every product is quoted at the same price.
#[derive(Debug, Clone, Copy)]
pub struct StaticQuoteSource {
    price: f64,
}

impl StaticQuoteSource {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

#[async_trait]
impl PriceLookup for StaticQuoteSource {
    async fn lookup_market_price(&self, product_id: &str) -> Result<MarketQuote> {
        tracing::debug!(product_id, price = self.price, "Serving stub quote");
        Ok(MarketQuote::new(self.price))
    }
}
