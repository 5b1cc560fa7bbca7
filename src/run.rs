// src/run.rs

use std::path::PathBuf;

use futures::{stream, StreamExt};
use tokio::{fs, time::Instant};
use tracing::{error, info};

use crate::{
    config::Config,
    error::{LogoError, RunError},
    fetch::Fetcher,
    logo::download_one,
    sheet::fetch_party_names,
};

/// Result for one party.
#[derive(Debug)]
pub struct Outcome {
    pub name: String,
    pub result: Result<PathBuf, LogoError>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub out_dir: PathBuf,
    /// In the order the names were resolved.
    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &LogoError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Resolve party names, then fetch every logo. Per-name failures are logged
/// and collected; only resolution and output-directory errors abort.
pub async fn run<F: Fetcher>(fetcher: &F, config: &Config) -> Result<RunSummary, RunError> {
    let start = Instant::now();
    fs::create_dir_all(&config.out_dir)
        .await
        .map_err(|source| RunError::OutputDir {
            path: config.out_dir.clone(),
            source,
        })?;

    let names = fetch_party_names(fetcher, config).await?;
    let mut summary = RunSummary {
        out_dir: config.out_dir.clone(),
        outcomes: Vec::with_capacity(names.len()),
    };

    if names.is_empty() {
        info!("No party names found in sheet");
        return Ok(summary);
    }
    info!("Found {} parties.", names.len());

    summary.outcomes = fetch_logos(fetcher, config, names).await;

    info!(
        elapsed = ?start.elapsed(),
        "Processed {} parties: {} ok, {} failed",
        summary.total(),
        summary.succeeded(),
        summary.failed()
    );
    info!("Done: {}", config.out_dir.display());
    Ok(summary)
}

/// Process `names` with at most `config.concurrency` in flight, keeping
/// input order in the returned outcomes.
pub async fn fetch_logos<F: Fetcher>(
    fetcher: &F,
    config: &Config,
    names: Vec<String>,
) -> Vec<Outcome> {
    stream::iter(names)
        .map(|name| async move {
            let result = download_one(fetcher, config, &name).await;
            match &result {
                Ok(_) => info!("OK: {}", name),
                Err(e) => error!("FAIL: {} {}", name, e),
            }
            Outcome { name, result }
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await
}
