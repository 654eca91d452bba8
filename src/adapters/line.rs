use crate::config::LineConfig;
use crate::domain::ports::ReplyDelivery;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Sends replies through the LINE Messaging API reply endpoint.
#[derive(Clone)]
pub struct LineReplyClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

impl LineReplyClient {
    pub fn new(config: &LineConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &LineConfig) -> Self {
        Self {
            client,
            endpoint: config.reply_endpoint.clone(),
            access_token: config.channel_access_token.clone(),
        }
    }
}

#[async_trait]
impl ReplyDelivery for LineReplyClient {
    async fn deliver_reply(&self, destination: &str, text: &str) -> Result<()> {
        let body = ReplyRequest {
            reply_token: destination,
            messages: [TextMessage { kind: "text", text }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::DeliveryFailure {
                message: format!("request to {} failed: {}", self.endpoint, e),
            })?;

        let status = response.status();
        let response_text = response.text().await.unwrap_or_default();
        tracing::info!("📤 LINE reply status: {}", status);
        tracing::debug!("📤 LINE response: {}", response_text);

        if !status.is_success() {
            return Err(BotError::DeliveryFailure {
                message: format!("LINE replied with {}: {}", status, response_text),
            });
        }

        Ok(())
    }
}
