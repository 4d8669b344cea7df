//! skillgate gate server entry point.

use std::sync::Arc;
use std::time::Duration;

use skillgate_api::{
    config::GateConfig,
    router::{build_router, GateState},
};
use skillgate_verify::fetcher::HttpChainFetcher;
use skillgate_verify::verifier::RequestVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = GateConfig::from_env()?;
    let fetcher = HttpChainFetcher::new(Duration::from_secs(config.chain_fetch_timeout_secs))?;
    let verifier = RequestVerifier::with_fetcher(config.trust.clone(), Arc::new(fetcher));
    let state = GateState {
        verifier: Arc::new(verifier),
        max_body_bytes: config.max_body_bytes,
    };
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
