/// Factory: build the `TokenResolver` from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::oauth::{RestTokenResolver, TokenResolver};

pub fn build_token_resolver(config: &Config) -> Result<Arc<dyn TokenResolver>, reqwest::Error> {
    let resolver = RestTokenResolver::new(config.oauth_base_url.clone(), config.oauth_timeout)?;

    tracing::info!(
        base_url = %config.oauth_base_url,
        timeout_ms = millis(config.oauth_timeout),
        "token resolver configured"
    );

    Ok(Arc::new(resolver))
}

// Saturates instead of truncating.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
