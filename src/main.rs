use anyhow::Result;
use soilfood::{config::Config, server, view::Dashboard};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) configuration ────────────────────────────────────────────
    let cfg = Config::from_env()?;

    // ─── 2) init logging ─────────────────────────────────────────────
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    // ─── 3) load + aggregate, fatal on any failure ───────────────────
    let start = Instant::now();
    info!(
        trade = %cfg.trade_path().display(),
        soil = %cfg.soil_path().display(),
        "loading data"
    );
    let dash = tokio::task::spawn_blocking({
        let cfg = cfg.clone();
        move || Dashboard::load(&cfg)
    })
    .await??;
    info!(elapsed = ?start.elapsed(), "data loaded");

    // ─── 4) serve ────────────────────────────────────────────────────
    server::serve(Arc::new(dash), cfg.addr()).await;

    Ok(())
}
