//! Basic usage example for birdeye-client
//!
//! Reads `BIRDEYE_API_KEY` (and optional `BIRDEYE_*` overrides) from the
//! environment. Set `RUST_LOG=birdeye_client=debug` to see request logging.

use anyhow::Context;
use birdeye_client::{ApiError, CancellationToken, Client, ClientConfig, TracingLogger, as_api_error};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SOL: &str = "So11111111111111111111111111111111111111112";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("BIRDEYE_API_KEY").context("BIRDEYE_API_KEY is not set")?;
    let client = Client::builder(api_key)
        .config(ClientConfig::from_env())
        .logger(TracingLogger)
        .build()?;
    info!("Created client for {}", client.base_url());

    // Cancel everything after 30 seconds
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        deadline.cancel();
    });

    let price = client
        .get_price(&cancel, SOL)
        .await
        .context("fetching SOL price")?;
    info!("SOL: ${:.4} ({:.2}% 24h)", price.value, price.price_change_24h);

    let prices = client.get_multiple_prices(&cancel, &[SOL, USDC]).await?;
    for (address, value) in &prices {
        info!("  {}: ${:.4}", address, value);
    }

    match client.get_token_overview(&cancel, USDC).await {
        Ok(overview) => info!(
            "{} ({}): liquidity ${:.0}, {} holders",
            overview.name, overview.symbol, overview.liquidity, overview.holder
        ),
        Err(e) => {
            let api = as_api_error(&e);
            if api.is_some_and(ApiError::is_not_found) {
                warn!("USDC unknown to birdeye");
            } else if api.is_some_and(ApiError::is_rate_limited) {
                warn!("Rate limited, try again later");
            } else {
                return Err(e.into());
            }
        }
    }

    let security = client.get_token_security(&cancel, USDC).await?;
    info!(
        "USDC mint authority: {}, freeze authority: {}, top 10 hold {}%",
        security.has_mint_authority(),
        security.has_freeze_authority(),
        security.top10_holder_percent
    );

    Ok(())
}
