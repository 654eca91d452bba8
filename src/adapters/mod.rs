// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod line;
pub mod quote_client;
pub mod static_quote;

pub use line::LineReplyClient;
pub use quote_client::HttpQuoteClient;
pub use static_quote::StaticQuoteSource;
