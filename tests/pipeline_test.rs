use async_trait::async_trait;
use go_nogo_bot::config::{EngineConfig, ProfitPolicy};
use go_nogo_bot::domain::ports::{PriceLookup, ReplyDelivery};
use go_nogo_bot::utils::error::{MALFORMED_INPUT_REPLY, QUOTE_UNAVAILABLE_REPLY};
use go_nogo_bot::{
    BotError, DecisionPipeline, MarketQuote, RecommendationEngine, Result, StaticQuoteSource,
    Verdict,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Records which products were looked up and answers with a fixed quote.
struct MockQuotes {
    quote: Option<f64>,
    fail: bool,
    lookups: Mutex<Vec<String>>,
}

impl MockQuotes {
    fn with_price(price: f64) -> Self {
        Self {
            quote: Some(price),
            fail: false,
            lookups: Mutex::new(Vec::new()),
        }
    }

    fn unavailable() -> Self {
        Self {
            quote: None,
            fail: false,
            lookups: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            quote: None,
            fail: true,
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PriceLookup for MockQuotes {
    async fn lookup_market_price(&self, product_id: &str) -> Result<MarketQuote> {
        self.lookups.lock().await.push(product_id.to_string());
        if self.fail {
            return Err(BotError::ConfigError {
                message: "quote backend down".to_string(),
            });
        }
        Ok(self.quote.map(MarketQuote::new).unwrap_or_default())
    }
}

#[derive(Default)]
struct MockReplies {
    fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ReplyDelivery for MockReplies {
    async fn deliver_reply(&self, destination: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .await
            .push((destination.to_string(), text.to_string()));
        if self.fail {
            return Err(BotError::DeliveryFailure {
                message: "503 from platform".to_string(),
            });
        }
        Ok(())
    }
}

fn gross_pipeline(quotes: Arc<dyn PriceLookup>) -> DecisionPipeline {
    DecisionPipeline::new(RecommendationEngine::default(), quotes)
}

#[tokio::test]
async fn test_go_recommendation_end_to_end() {
    let quotes = Arc::new(MockQuotes::with_price(63_000.0));
    let pipeline = gross_pipeline(quotes.clone());

    let outcome = pipeline.handle_inbound_message("ABC-123 40000").await;

    assert_eq!(outcome.verdict, Verdict::Go);
    assert!(outcome.report.contains("ABC-123"));
    assert!(outcome.report.contains("46000"));
    assert!(outcome.report.contains("63000"));
    assert!(outcome.report.contains("36.96%"));
    assert!(outcome.report.ends_with("✅ Go"));
    assert_eq!(*quotes.lookups.lock().await, vec!["ABC-123".to_string()]);
}

#[tokio::test]
async fn test_no_go_recommendation() {
    let pipeline = gross_pipeline(Arc::new(StaticQuoteSource::new(63_000.0)));

    let outcome = pipeline.handle_inbound_message("ABC-123 50000").await;

    assert_eq!(outcome.verdict, Verdict::NoGo);
    assert!(outcome.report.contains("57500"));
    assert!(outcome.report.contains("9.57%"));
}

#[tokio::test]
async fn test_net_policy_pipeline() {
    let engine = RecommendationEngine::new(EngineConfig {
        profit_policy: ProfitPolicy::NetOfResaleFee {
            resale_net_factor: 0.9,
        },
        ..EngineConfig::default()
    });
    let pipeline = DecisionPipeline::new(engine, Arc::new(StaticQuoteSource::new(63_000.0)));

    let outcome = pipeline.handle_inbound_message("ABC-123 40000").await;

    assert_eq!(outcome.verdict, Verdict::Go);
    assert!(outcome.report.contains("10700"));
}

#[tokio::test]
async fn test_malformed_input_skips_lookup() {
    let quotes = Arc::new(MockQuotes::with_price(63_000.0));
    let pipeline = gross_pipeline(quotes.clone());

    for text in ["", "onlyonetoken", "id notanumber", "a b c"] {
        let outcome = pipeline.handle_inbound_message(text).await;
        assert_eq!(outcome.verdict, Verdict::Error);
        assert_eq!(outcome.report, MALFORMED_INPUT_REPLY);
    }

    assert!(quotes.lookups.lock().await.is_empty());
}

#[tokio::test]
async fn test_cost_overflowing_after_fees_yields_malformed_reply() {
    let pipeline = gross_pipeline(Arc::new(StaticQuoteSource::new(63_000.0)));

    let outcome = pipeline.handle_inbound_message("A 1.7e308").await;

    assert_eq!(outcome.verdict, Verdict::Error);
    assert_eq!(outcome.report, MALFORMED_INPUT_REPLY);
    assert!(!outcome.report.contains("inf"));
}

#[tokio::test]
async fn test_zero_price_from_lookup_yields_fallback() {
    struct ZeroQuotes;

    #[async_trait]
    impl PriceLookup for ZeroQuotes {
        async fn lookup_market_price(&self, _product_id: &str) -> Result<MarketQuote> {
            Ok(MarketQuote {
                average_price: Some(0.0),
            })
        }
    }

    let pipeline = gross_pipeline(Arc::new(ZeroQuotes));

    let outcome = pipeline.handle_inbound_message("ABC-123 40000").await;

    assert_eq!(outcome.verdict, Verdict::Error);
    assert_eq!(outcome.report, QUOTE_UNAVAILABLE_REPLY);
}

#[tokio::test]
async fn test_absent_quote_yields_fallback() {
    let pipeline = gross_pipeline(Arc::new(MockQuotes::unavailable()));

    let outcome = pipeline.handle_inbound_message("ABC-123 10000").await;

    assert_eq!(outcome.verdict, Verdict::Error);
    assert_eq!(outcome.report, QUOTE_UNAVAILABLE_REPLY);
}

#[tokio::test]
async fn test_lookup_error_is_treated_as_absent_quote() {
    let pipeline = gross_pipeline(Arc::new(MockQuotes::failing()));

    let outcome = pipeline.handle_inbound_message("ABC-123 10000").await;

    assert_eq!(outcome.verdict, Verdict::Error);
    assert_eq!(outcome.report, QUOTE_UNAVAILABLE_REPLY);
}

#[tokio::test]
async fn test_respond_delivers_report_to_reply_token() {
    let pipeline = gross_pipeline(Arc::new(StaticQuoteSource::new(63_000.0)));
    let replies = MockReplies::default();

    let outcome = pipeline.respond(&replies, "reply-token-1", "ABC-123 40000").await;

    let sent = replies.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "reply-token-1");
    assert_eq!(sent[0].1, outcome.report);
}

#[tokio::test]
async fn test_respond_delivers_fallback_for_malformed_input() {
    let pipeline = gross_pipeline(Arc::new(StaticQuoteSource::new(63_000.0)));
    let replies = MockReplies::default();

    let outcome = pipeline.respond(&replies, "reply-token-2", "hello").await;

    assert_eq!(outcome.verdict, Verdict::Error);
    let sent = replies.sent.lock().await;
    assert_eq!(sent[0].1, MALFORMED_INPUT_REPLY);
}

#[tokio::test]
async fn test_delivery_failure_does_not_change_outcome() {
    let pipeline = gross_pipeline(Arc::new(StaticQuoteSource::new(63_000.0)));
    let replies = MockReplies {
        fail: true,
        ..MockReplies::default()
    };

    let outcome = pipeline.respond(&replies, "reply-token-3", "ABC-123 40000").await;

    assert_eq!(outcome.verdict, Verdict::Go);
    // attempted exactly once, no retry
    assert_eq!(replies.sent.lock().await.len(), 1);
}
