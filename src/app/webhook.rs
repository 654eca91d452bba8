//! LINE webhook receiver.
//!
//! The body is read raw and decoded here so that a broken payload surfaces as a
//! transport error (500) instead of being rejected by an extractor.

use crate::app::server::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub reply_token: Option<String>,
    pub message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

impl WebhookEvent {
    /// `(reply_token, text)` for text-message events; everything else is ignored.
    pub fn text_message(&self) -> Option<(&str, &str)> {
        if self.event_type != "message" {
            return None;
        }
        let message = self.message.as_ref().filter(|m| m.kind == "text")?;
        Some((self.reply_token.as_deref()?, message.text.as_deref()?))
    }
}

#[tracing::instrument(skip_all)]
pub async fn receive(State(state): State<AppState>, body: Bytes) -> (StatusCode, &'static str) {
    let payload: WebhookBody = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("💥 Webhook body could not be decoded: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };
    tracing::info!("✅ Received webhook with {} event(s)", payload.events.len());
    tracing::debug!("Webhook body: {}", String::from_utf8_lossy(&body));

    let mut handled = 0usize;
    for event in &payload.events {
        let Some((reply_token, text)) = event.text_message() else {
            tracing::info!("⛔ Ignoring '{}' event", event.event_type);
            continue;
        };

        let outcome = state
            .pipeline
            .respond(state.replies.as_ref(), reply_token, text)
            .await;
        tracing::info!(verdict = ?outcome.verdict, "Handled message event");
        handled += 1;
    }

    if handled == 0 {
        return (StatusCode::OK, "Ignored");
    }
    (StatusCode::OK, "OK")
}
