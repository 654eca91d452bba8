use crate::domain::model::InboundMessage;
use crate::utils::error::{BotError, Result};

/// Parses `"<product-id> <cost>"`. Exactly two whitespace-separated tokens are accepted;
/// the cost must be a finite, non-negative number.
pub fn parse(text: &str) -> Result<InboundMessage> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [product_id, raw_cost] = tokens.as_slice() else {
        return Err(BotError::malformed(format!(
            "expected 2 tokens, got {}",
            tokens.len()
        )));
    };

    let declared_cost: f64 = raw_cost
        .parse()
        .map_err(|_| BotError::malformed(format!("cost '{}' is not a number", raw_cost)))?;

    if !declared_cost.is_finite() || declared_cost < 0.0 {
        return Err(BotError::malformed(format!(
            "cost '{}' must be a finite, non-negative number",
            raw_cost
        )));
    }

    Ok(InboundMessage {
        product_id: product_id.to_string(),
        declared_cost,
    })
}
