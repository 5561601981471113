//! Storefront configuration

use std::time::Duration;

use clap::Args;

use crate::media::MediaConfig;

/// Runtime settings for the storefront, from flags, environment, or
/// `.env`.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Media host settings.
    #[command(flatten)]
    pub media: MediaConfig,

    /// Simulated payment processing delay in milliseconds.
    #[arg(long, env = "PAYMENT_DELAY_MS", default_value_t = 2_000)]
    pub payment_delay_ms: u64,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl StorefrontConfig {
    /// The simulated payment delay as a [`Duration`].
    #[must_use]
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}
