use clap::Parser;
use go_nogo_bot::config::QuoteSourceKind;
use go_nogo_bot::domain::ports::PriceLookup;
use go_nogo_bot::utils::{logger, validation::Validate};
use go_nogo_bot::{
    BotConfig, DecisionPipeline, HttpQuoteClient, RecommendationEngine, StaticQuoteSource,
    Verdict,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "go-nogo-eval")]
#[command(about = "Evaluate a single \"<product-id> <cost>\" message and print the report")]
struct EvalArgs {
    /// Message text, e.g. "ABC-123 40000"
    message: String,

    #[arg(long, help = "Market price to use instead of the configured quote source")]
    price: Option<f64>,

    #[arg(long, short, help = "Path to a TOML configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = EvalArgs::parse();
    logger::init_cli_logger(args.verbose);

    let config = BotConfig::load(args.config.as_deref())?;
    if let Err(e) = config.engine.validate().and_then(|_| config.quote.validate()) {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let quotes: Arc<dyn PriceLookup> = match (args.price, config.quote.source) {
        (Some(price), _) => Arc::new(StaticQuoteSource::new(price)),
        (None, QuoteSourceKind::Static) => {
            Arc::new(StaticQuoteSource::new(config.quote.stub_price))
        }
        (None, QuoteSourceKind::Http) => {
            Arc::new(HttpQuoteClient::new(config.quote.endpoint.clone()))
        }
    };

    let pipeline = DecisionPipeline::new(RecommendationEngine::new(config.engine.clone()), quotes);
    let outcome = pipeline.handle_inbound_message(&args.message).await;

    println!("{}", outcome.report);

    if outcome.verdict == Verdict::Error {
        std::process::exit(2);
    }
    Ok(())
}
