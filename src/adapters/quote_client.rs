use crate::domain::model::MarketQuote;
use crate::domain::ports::PriceLookup;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Body served by the scrape endpoint.
#[derive(Debug, Deserialize)]
pub struct ScrapeResponse {
    pub avg: Option<f64>,
}

/// Fetches quotes from the scrape endpoint: `GET <endpoint>?model=<product_id>`.
#[derive(Debug, Clone)]
pub struct HttpQuoteClient {
    client: Client,
    endpoint: String,
}

impl HttpQuoteClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn quote_url(&self, product_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| BotError::ConfigError {
            message: format!("invalid quote endpoint '{}': {}", self.endpoint, e),
        })?;
        url.query_pairs_mut().append_pair("model", product_id);
        Ok(url)
    }
}

#[async_trait]
impl PriceLookup for HttpQuoteClient {
    async fn lookup_market_price(&self, product_id: &str) -> Result<MarketQuote> {
        let url = self.quote_url(product_id)?;
        tracing::debug!("Making quote request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("📡 Quote response status: {}", status);

        if !status.is_success() {
            tracing::warn!(product_id, %status, "Quote endpoint returned an error status");
            return Ok(MarketQuote::unavailable());
        }

        let body: ScrapeResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(product_id, "Quote response could not be decoded: {}", e);
                return Ok(MarketQuote::unavailable());
            }
        };
        tracing::debug!("📡 Quote data: {:?}", body);

        Ok(body.avg.map(MarketQuote::new).unwrap_or_default())
    }
}
