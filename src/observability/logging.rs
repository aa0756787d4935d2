//! Structured logging.
//!
//! Uses the tracing crate. `RUST_LOG` wins over the configured filter;
//! `json_logs` switches the fmt layer to JSON lines.

use std::borrow::Cow;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Longest response preview written to the log, in characters.
pub const PREVIEW_CHARS: usize = 200;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// First `PREVIEW_CHARS` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Log a truncated view of a response body.
pub fn log_body_preview(body: &[u8]) {
    let text = String::from_utf8_lossy(body);
    tracing::info!(len = body.len(), preview = %preview(&text), "Response body");
}
