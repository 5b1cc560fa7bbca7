// src/fetch/urls.rs

use url::Url;

use crate::{config::Config, error::LogoError};

static SHEET_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d/";

/// CSV export URL for the configured sheet tab.
pub fn sheet_csv_url(config: &Config) -> String {
    format!(
        "{}{}/export?format=csv&gid={}",
        SHEET_EXPORT_BASE,
        urlencoding::encode(&config.sheet_id),
        urlencoding::encode(&config.sheet_gid)
    )
}

/// Logo URL for one party: `<base><encoded name>.png?<cache_bust>`.
///
/// Every byte outside `A-Za-z0-9-_.~` is percent-encoded, so a `/` in the
/// name stays inside a single path segment.
pub fn logo_url(config: &Config, party: &str) -> Result<Url, LogoError> {
    let raw = format!(
        "{}{}.png?{}",
        config.logo_base_url,
        urlencoding::encode(party),
        config.cache_bust
    );
    Url::parse(&raw).map_err(|source| LogoError::InvalidUrl { url: raw, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_url_uses_id_and_gid() {
        let config = Config {
            sheet_id: "abc123".to_string(),
            sheet_gid: "42".to_string(),
            ..Config::default()
        };
        assert_eq!(
            sheet_csv_url(&config),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42"
        );
    }

    #[test]
    fn logo_url_percent_encodes_thai_name() {
        let url = logo_url(&Config::default(), "ก ข").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.vote62.com/img/election69/party/%E0%B8%81%20%E0%B8%82.png?t=1"
        );
    }

    #[test]
    fn logo_url_keeps_slash_inside_one_segment() {
        let url = logo_url(&Config::default(), "a/b").unwrap();
        assert_eq!(url.path(), "/img/election69/party/a%2Fb.png");
        assert_eq!(url.query(), Some("t=1"));
    }

    #[test]
    fn unreserved_characters_are_left_alone() {
        let url = logo_url(&Config::default(), "Party-1_x.y~z").unwrap();
        assert!(url.path().ends_with("/Party-1_x.y~z.png"));
    }
}
