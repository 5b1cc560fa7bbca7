use anyhow::{Context, Result};
use partylogos::{run, Config, HttpFetcher};
use std::{env, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status when the run finished but some logos failed.
const PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    // ─── 2) load config ──────────────────────────────────────────────
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var("PARTY_LOGOS_CONFIG").ok())
        .map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("loading configuration")?;
    info!(
        out_dir = %config.out_dir.display(),
        size = config.size,
        concurrency = config.concurrency,
        "startup"
    );

    // ─── 3) resolve names + fetch logos ──────────────────────────────
    let fetcher = HttpFetcher::new(&config).context("building HTTP client")?;
    let summary = run(&fetcher, &config).await?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("{} of {} logos failed", summary.failed(), summary.total());
        Ok(ExitCode::from(PARTIAL_FAILURE))
    }
}
