//! Tracing setup
//!
//! `RUST_LOG` takes precedence; otherwise `vouch=<level>,info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

fn filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vouch={},info", log_level).into())
}

/// Install the global subscriber
pub fn init(log_level: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(filter(log_level));

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init(),
    }
}
