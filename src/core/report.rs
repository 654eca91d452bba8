//! Text rendering for recommendations.

use crate::domain::model::Decision;

pub struct ReportFields<'a> {
    pub product_id: &'a str,
    pub total_cost: f64,
    pub market_price: f64,
    pub profit_rate: f64,
    pub profit: f64,
    pub decision: Decision,
    pub currency: &'a str,
}

/// Fixed line order: product, total cost, market price, profit rate, profit, blank, decision.
pub fn render(fields: &ReportFields<'_>) -> String {
    format!(
        "📦 Product: {}\n\
         💴 Total cost (incl. fees): {} {currency}\n\
         📊 Market price: {} {currency}\n\
         📈 Profit rate: {}\n\
         💰 Profit: {} {currency}\n\
         \n\
         {}",
        fields.product_id,
        format_amount(fields.total_cost),
        format_amount(fields.market_price),
        format_percent(fields.profit_rate),
        format_amount(fields.profit),
        fields.decision.marker(),
        currency = fields.currency,
    )
}

/// Whole currency units. Adding 0.0 turns a rounded -0 into 0.
pub fn format_amount(value: f64) -> String {
    format!("{:.0}", value.round() + 0.0)
}

/// Ratio rendered as a two-decimal percentage.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
