pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{InboundMessage, MarketQuote, PipelineOutcome, Recommendation};
pub use crate::domain::ports::{PriceLookup, ReplyDelivery};
pub use crate::utils::error::Result;
