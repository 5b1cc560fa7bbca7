// src/logo/mod.rs

use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{ImageFormat, RgbaImage};
use tokio::{fs, task};
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::LogoError,
    fetch::{urls::logo_url, Fetcher},
};

pub mod circle;

pub use circle::{circle_crop, circle_mask};

/// Decode image bytes, circle-crop to `size` and encode as PNG.
pub fn process_logo_bytes(bytes: &[u8], size: u32) -> Result<Vec<u8>, LogoError> {
    let img = image::load_from_memory(bytes).map_err(LogoError::DecodeFailed)?;
    let out = circle_crop(&img, size)?;
    encode_png(&out)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, LogoError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(LogoError::EncodeFailed)?;
    Ok(buf)
}

/// `<out_dir>/<party>.png`, refusing names that would leave `out_dir` or
/// are not a single path component.
pub fn output_path(out_dir: &Path, party: &str) -> Result<PathBuf, LogoError> {
    let bad = party.is_empty()
        || party == "."
        || party == ".."
        || party.contains(['/', '\\', '\0']);
    if bad {
        return Err(LogoError::InvalidFileName {
            name: party.to_string(),
        });
    }
    Ok(out_dir.join(format!("{}.png", party)))
}

/// Fetch, transform and write one party's logo. Returns the written path.
///
/// Nothing is written unless every earlier step succeeded.
#[instrument(level = "debug", skip(fetcher, config))]
pub async fn download_one<F: Fetcher>(
    fetcher: &F,
    config: &Config,
    party: &str,
) -> Result<PathBuf, LogoError> {
    let dest = output_path(&config.out_dir, party)?;
    let url = logo_url(config, party)?;

    let bytes = fetcher
        .get_bytes(&url)
        .await
        .map_err(LogoError::FetchFailed)?;
    debug!(%url, len = bytes.len(), "fetched logo");

    // decode + resample + encode is CPU bound
    let size = config.size;
    let png = task::spawn_blocking(move || process_logo_bytes(&bytes, size)).await??;

    fs::write(&dest, &png)
        .await
        .map_err(|source| LogoError::WriteFailed {
            path: dest.clone(),
            source,
        })?;
    Ok(dest)
}
