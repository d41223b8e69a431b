//! 今日头条 (Toutiao hot board) adapter
//!
//! Schema: items under `data[]` with string fields `Title` and `HotValue`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::{parse_lenient, HotItem};

use super::{collect_ranked, get_text, HotSource};

/// Canonical label for items from this source
pub const LABEL: &str = "今日头条";

/// Toutiao hot-board adapter
pub struct ToutiaoHotBoard;

#[derive(Debug, Deserialize)]
struct ToutiaoResponse {
    data: Option<Vec<ToutiaoEntry>>,
}

#[derive(Debug, Deserialize)]
struct ToutiaoEntry {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "HotValue", default)]
    hot_value: String,
}

impl ToutiaoHotBoard {
    fn normalize(body: &str, show_count: u32) -> Result<Vec<HotItem>, FetchError> {
        let response: ToutiaoResponse = serde_json::from_str(body)?;
        let entries = response.data.ok_or(FetchError::Schema("missing data"))?;

        Ok(collect_ranked(
            LABEL,
            show_count,
            entries
                .into_iter()
                .map(|e| (e.title, parse_lenient(&e.hot_value))),
        ))
    }
}

#[async_trait]
impl HotSource for ToutiaoHotBoard {
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
