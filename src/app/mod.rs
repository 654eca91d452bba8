// Application layer: HTTP transport around the decision pipeline.

pub mod scrape;
pub mod server;
pub mod webhook;

pub use server::{build_router, serve, AppState};
