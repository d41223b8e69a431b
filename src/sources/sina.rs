//! 新浪新闻 (Sina news ranking) adapter
//!
//! This source has two quirks, both kept local to this module:
//!
//! - The configured URL is not fetched directly. Its `top_cat` query
//!   parameter is extracted and substituted into a ranking endpoint on a
//!   different host together with today's date (`YYYYMMDD`) and a page
//!   size slightly above `show_count`.
//! - The response body is not plain JSON: it carries a literal
//!   `var data = ` prefix and a trailing semicolon that must be stripped
//!   before parsing.
//!
//! Items are an array of `title` / `top_num`, where `top_num` is a
//! comma-grouped numeric string.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::{parse_lenient, HotItem};

use super::{collect_ranked, get_text, HotSource};

/// Canonical label for items from this source
pub const LABEL: &str = "新浪新闻";

/// Host serving the ranking data
const RANKING_HOST: &str = "https://top.sina.com.cn";

/// Extra items requested beyond `show_count`, headroom for dropped entries
const PAGE_HEADROOM: u32 = 5;

/// Sina news-ranking adapter
pub struct SinaRanking {
    /// Ranking host, overridable for tests against a mock server
    host: String,
}

#[derive(Debug, Deserialize)]
struct SinaResponse {
    data: Option<Vec<SinaEntry>>,
}

#[derive(Debug, Deserialize)]
struct SinaEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    top_num: String,
}

impl SinaRanking {
    /// Create an adapter against the production ranking host
    pub fn new() -> Self {
        Self {
            host: RANKING_HOST.to_string(),
        }
    }

    /// Create an adapter against a custom host (mock server tests)
    pub fn with_host(host: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
        }
    }

    /// Derive the ranking URL from the configured endpoint URL
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the configured URL cannot be
    /// parsed or carries no `top_cat` parameter.
    fn ranking_url(
        &self,
        configured_url: &str,
        show_count: u32,
        date: NaiveDate,
    ) -> Result<String, FetchError> {
        let parsed = Url::parse(configured_url)
            .map_err(|_| FetchError::InvalidUrl(configured_url.to_string()))?;
        let top_cat = parsed
            .query_pairs()
            .find(|(key, _)| key == "top_cat")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                FetchError::InvalidUrl(format!("missing top_cat parameter: {configured_url}"))
            })?;

        Ok(format!(
            "{}/ws/GetTopDataList.php?top_type=day&top_cat={}&top_time={}&top_show_num={}",
            self.host,
            top_cat,
            date.format("%Y%m%d"),
            show_count + PAGE_HEADROOM,
        ))
    }

    /// Strip the `var data = ` prefix and trailing semicolon
    fn strip_payload(body: &str) -> &str {
        let trimmed = body.trim();
        let trimmed = trimmed.strip_prefix("var data = ").unwrap_or(trimmed);
        trimmed.trim_end().trim_end_matches(';')
    }

    fn normalize(body: &str, show_count: u32) -> Result<Vec<HotItem>, FetchError> {
        let response: SinaResponse = serde_json::from_str(Self::strip_payload(body))?;
        let entries = response.data.ok_or(FetchError::Schema("missing data"))?;

        Ok(collect_ranked(
            LABEL,
            show_count,
            entries
                .into_iter()
                .map(|e| (e.title, parse_lenient(&e.top_num))),
        ))
    }
}

impl Default for SinaRanking {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HotSource for SinaRanking {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn fetch(
        &self,
        client: &Client,
        endpoint: &ApiEndpoint,
    ) -> Result<Vec<HotItem>, FetchError> {
        let url = self.ranking_url(
            &endpoint.url,
            endpoint.show_count,
            Local::now().date_naive(),
        )?;
        let body = get_text(client, &url).await?;
        Self::normalize(&body, endpoint.show_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_url_substitutes_category_and_date() {
        let adapter = SinaRanking::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let url = adapter
            .ranking_url(
                "https://top.news.sina.com.cn/ws/GetTopDataList.php?top_cat=news_china_suda",
                10,
                date,
            )
            .unwrap();
        assert_eq!(
            url,
            "https://top.sina.com.cn/ws/GetTopDataList.php?top_type=day&top_cat=news_china_suda&top_time=20250309&top_show_num=15"
        );
    }

    #[test]
    fn test_ranking_url_requires_top_cat() {
        let adapter = SinaRanking::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let result = adapter.ranking_url("https://top.news.sina.com.cn/ws/x.php", 10, date);
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_strip_payload() {
        assert_eq!(
            SinaRanking::strip_payload("var data = {\"data\":[]};"),
            "{\"data\":[]}"
        );
        // Plain JSON passes through untouched
        assert_eq!(SinaRanking::strip_payload("{\"data\":[]}"), "{\"data\":[]}");
    }

    #[test]
    fn test_normalize_parses_comma_grouped_top_num() {
        let body = r#"var data = {
            "data": [
                {"title": "要闻一", "top_num": "1,234,567"},
                {"title": "要闻二", "top_num": "98,765"}
            ]
        };"#;
        let items = SinaRanking::normalize(body, 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].hot, 1_234_567);
        assert_eq!(items[1].hot, 98_765);
        assert_eq!(items[0].source, LABEL);
    }

    #[test]
    fn test_normalize_unparsable_top_num_defaults_to_zero() {
        let body = r#"var data = {"data": [{"title": "要闻", "top_num": "约两万"}]};"#;
        let items = SinaRanking::normalize(body, 10).unwrap();
        assert_eq!(items[0].hot, 0);
    }

    #[test]
    fn test_normalize_missing_data_is_schema_error() {
        let body = r#"var data = {"top_time": "20250309"};"#;
        assert!(matches!(
            SinaRanking::normalize(body, 10),
            Err(FetchError::Schema(_))
        ));
    }
}
