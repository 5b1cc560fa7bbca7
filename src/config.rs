// src/config.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

/// Browser-like request headers the logo host expects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestHeaders {
    pub user_agent: String,
    pub referer: String,
    pub accept: String,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            referer: "https://www.vote62.com/".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
        }
    }
}

/// Header matching rules used to pick the party column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnRules {
    /// Lower-case labels that identify the column exactly.
    pub exact_labels: Vec<String>,
    /// Election-cycle year that appears in the party column's header.
    pub year_token: String,
    /// The locale word for "party".
    pub party_word: String,
    /// Column used when no header matches.
    pub fallback_index: usize,
}

impl Default for ColumnRules {
    fn default() -> Self {
        Self {
            exact_labels: vec![
                "พรรค 2569".to_string(),
                "พรรค".to_string(),
                "party".to_string(),
            ],
            year_token: "2569".to_string(),
            party_word: "พรรค".to_string(),
            fallback_index: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logo URLs are `<logo_base_url><encoded name>.png?<cache_bust>`.
    pub logo_base_url: String,
    pub cache_bust: String,
    pub out_dir: PathBuf,
    /// Edge length of the square output PNG.
    pub size: u32,
    pub sheet_id: String,
    pub sheet_gid: String,
    pub timeout_secs: u64,
    /// Number of logos processed at once.
    pub concurrency: usize,
    pub headers: RequestHeaders,
    pub columns: ColumnRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logo_base_url: "https://www.vote62.com/img/election69/party/".to_string(),
            cache_bust: "t=1".to_string(),
            out_dir: PathBuf::from("party_logos_circle"),
            size: 512,
            sheet_id: "19cLkQfXtcwbnVFR6ilNd7ZeqRTUYU2jrmCCRsyFJ61w".to_string(),
            sheet_gid: "0".to_string(),
            timeout_secs: 30,
            concurrency: 1,
            headers: RequestHeaders::default(),
            columns: ColumnRules::default(),
        }
    }
}

impl Config {
    /// Defaults, then the optional YAML file, then `PARTY_LOGOS_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply overrides from `lookup`, which maps an env var name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PARTY_LOGOS_BASE_URL") {
            self.logo_base_url = v;
        }
        if let Some(v) = lookup("PARTY_LOGOS_OUT_DIR") {
            self.out_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("PARTY_LOGOS_SHEET_ID") {
            self.sheet_id = v;
        }
        if let Some(v) = lookup("PARTY_LOGOS_SHEET_GID") {
            self.sheet_gid = v;
        }
        if let Some(v) = lookup("PARTY_LOGOS_SIZE") {
            self.size = v
                .trim()
                .parse()
                .with_context(|| format!("PARTY_LOGOS_SIZE={v:?} is not a number"))?;
        }
        if let Some(v) = lookup("PARTY_LOGOS_TIMEOUT_SECS") {
            self.timeout_secs = v
                .trim()
                .parse()
                .with_context(|| format!("PARTY_LOGOS_TIMEOUT_SECS={v:?} is not a number"))?;
        }
        if let Some(v) = lookup("PARTY_LOGOS_CONCURRENCY") {
            self.concurrency = v
                .trim()
                .parse()
                .with_context(|| format!("PARTY_LOGOS_CONCURRENCY={v:?} is not a number"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            bail!("size must be at least 1");
        }
        if self.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        Url::parse(&self.logo_base_url)
            .with_context(|| format!("logo_base_url {:?} is not a URL", self.logo_base_url))?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_upstream_site() {
        let c = Config::default();
        assert_eq!(c.size, 512);
        assert_eq!(c.cache_bust, "t=1");
        assert_eq!(c.out_dir, PathBuf::from("party_logos_circle"));
        assert_eq!(c.columns.fallback_index, 4);
        assert_eq!(c.timeout(), Duration::from_secs(30));
        c.validate().unwrap();
    }

    #[test]
    fn yaml_overrides_only_named_fields() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "size: 128\nout_dir: logos\nheaders:\n  referer: https://example.com/")?;

        let c = Config::from_yaml_file(tmp.path())?;
        assert_eq!(c.size, 128);
        assert_eq!(c.out_dir, PathBuf::from("logos"));
        assert_eq!(c.headers.referer, "https://example.com/");
        assert_eq!(c.headers.user_agent, RequestHeaders::default().user_agent);
        assert_eq!(c.sheet_gid, "0");
        Ok(())
    }

    #[test]
    fn env_overrides_apply() -> Result<()> {
        let vars: HashMap<&str, &str> = [
            ("PARTY_LOGOS_SIZE", "64"),
            ("PARTY_LOGOS_CONCURRENCY", " 4 "),
            ("PARTY_LOGOS_BASE_URL", "http://127.0.0.1:9/img/"),
        ]
        .into_iter()
        .collect();

        let mut c = Config::default();
        c.apply_overrides(|k| vars.get(k).map(|v| v.to_string()))?;
        assert_eq!(c.size, 64);
        assert_eq!(c.concurrency, 4);
        assert_eq!(c.logo_base_url, "http://127.0.0.1:9/img/");
        Ok(())
    }

    #[test]
    fn bad_numeric_override_is_an_error() {
        let mut c = Config::default();
        let err = c
            .apply_overrides(|k| (k == "PARTY_LOGOS_SIZE").then(|| "big".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PARTY_LOGOS_SIZE"));
    }

    #[test]
    fn validate_rejects_zero_size_and_bad_url() {
        let c = Config {
            size: 0,
            ..Config::default()
        };
        assert!(c.validate().is_err());

        let c = Config {
            logo_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(c.validate().is_err());
    }
}
