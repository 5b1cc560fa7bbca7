// src/sheet/mod.rs

use std::collections::HashSet;

use csv::ReaderBuilder;
use tracing::{info, instrument, warn};
use url::Url;

use crate::{
    config::{ColumnRules, Config},
    error::ResolveError,
    fetch::{urls::sheet_csv_url, Fetcher},
};

pub mod column;

pub use column::{select_party_column, ColumnChoice, MatchRule};

/// Fetch the sheet's CSV export and return its unique party names.
#[instrument(level = "info", skip_all)]
pub async fn fetch_party_names<F: Fetcher>(
    fetcher: &F,
    config: &Config,
) -> Result<Vec<String>, ResolveError> {
    let raw = sheet_csv_url(config);
    let url = Url::parse(&raw).map_err(|source| ResolveError::InvalidSourceUrl {
        url: raw.clone(),
        source,
    })?;
    let bytes = fetcher
        .get_bytes(&url)
        .await
        .map_err(|source| ResolveError::SourceUnavailable {
            url: raw.clone(),
            source,
        })?;

    let text = decode_utf8(bytes)?;
    parse_party_names(&text, &config.columns)
}

/// Decode as UTF-8, dropping a leading byte-order mark.
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, ResolveError> {
    let mut text = String::from_utf8(bytes).map_err(ResolveError::InvalidEncoding)?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

/// Parse CSV text (first row = header) into unique, trimmed party names in
/// first-seen order. Blank input yields an empty list.
pub fn parse_party_names(text: &str, rules: &ColumnRules) -> Result<Vec<String>, ResolveError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let choice = select_party_column(&headers, rules)?;
    if choice.rule == MatchRule::Fallback {
        warn!("Using fallback column: {}", choice.header);
    }
    info!("Using party column: {}", choice.header);

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let name = record.get(choice.index).map(str::trim).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
