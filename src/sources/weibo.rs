//! 微博热搜 (Weibo hot search) adapter
//!
//! Schema: items nested under `data.realtime[]` with `word` (title) and
//! `num` (popularity score).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::HotItem;

use super::{collect_ranked, get_text, HotSource};

/// Canonical label for items from this source
pub const LABEL: &str = "微博";

/// Weibo hot-search adapter
pub struct WeiboHotSearch;

#[derive(Debug, Deserialize)]
struct WeiboResponse {
    data: Option<WeiboData>,
}

#[derive(Debug, Deserialize)]
struct WeiboData {
    realtime: Option<Vec<RealtimeEntry>>,
}

#[derive(Debug, Deserialize)]
struct RealtimeEntry {
    #[serde(default)]
    word: String,
    #[serde(default)]
    num: i64,
}

impl WeiboHotSearch {
    fn normalize(body: &str, show_count: u32) -> Result<Vec<HotItem>, FetchError> {
        let response: WeiboResponse = serde_json::from_str(body)?;
        let realtime = response
            .data
            .and_then(|d| d.realtime)
            .ok_or(FetchError::Schema("missing data.realtime"))?;

        Ok(collect_ranked(
            LABEL,
            show_count,
            realtime.into_iter().map(|e| (e.word, e.num)),
        ))
    }
}

#[async_trait]
impl HotSource for WeiboHotSearch {
    fn label(&self) -> &'static str {
        LABEL
    }

    async fn fetch(
        &self,
        client: &Client,
        endpoint: &ApiEndpoint,
    ) -> Result<Vec<HotItem>, FetchError> {
        let body = get_text(client, &endpoint.url).await?;
        Self::normalize(&body, endpoint.show_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "data": {
            "realtime": [
                {"word": "话题一", "num": 2000000},
                {"word": "", "num": 999},
                {"word": "话题二", "num": 500000}
            ]
        }
    }"#;

    #[test]
    fn test_normalize_maps_word_and_num() {
        let items = WeiboHotSearch::normalize(BODY, 10).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "话题一");
        assert_eq!(items[0].hot, 2_000_000);
        assert_eq!(items[0].rank, 1);
        assert_eq!(items[0].source, LABEL);
        assert_eq!(items[1].title, "话题二");
        assert_eq!(items[1].rank, 2);
    }

    #[test]
    fn test_normalize_truncates() {
        let items = WeiboHotSearch::normalize(BODY, 1).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_normalize_missing_num_defaults_to_zero() {
        let body = r#"{"data": {"realtime": [{"word": "话题"}]}}"#;
        let items = WeiboHotSearch::normalize(body, 10).unwrap();
        assert_eq!(items[0].hot, 0);
    }

    #[test]
    fn test_normalize_missing_container_is_schema_error() {
        let body = r#"{"data": {}}"#;
        assert!(matches!(
            WeiboHotSearch::normalize(body, 10),
            Err(FetchError::Schema(_))
        ));
    }

    #[test]
    fn test_normalize_malformed_json_is_parse_error() {
        assert!(matches!(
            WeiboHotSearch::normalize("not json", 10),
            Err(FetchError::Json(_))
        ));
    }
}
