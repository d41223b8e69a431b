//! 腾讯新闻 (QQ News hot ranking) adapter
//!
//! Schema: items nested under `idlist[0].newslist[]` with `title` and
//! `hotEvent.hotScore`. The first `newslist` element is a pinned,
//! non-ranked entry and is skipped before ranking.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::HotItem;

use super::{collect_ranked, get_text, HotSource};

/// Canonical label for items from this source
pub const LABEL: &str = "腾讯新闻";

/// QQ News hot-ranking adapter
pub struct QqNewsRanking;

#[derive(Debug, Deserialize)]
struct QqNewsResponse {
    #[serde(default)]
    idlist: Vec<IdListEntry>,
}

#[derive(Debug, Deserialize)]
struct IdListEntry {
    #[serde(default)]
    newslist: Vec<NewsEntry>,
}

#[derive(Debug, Deserialize)]
struct NewsEntry {
    #[serde(default)]
    title: String,
    #[serde(rename = "hotEvent")]
    hot_event: Option<HotEvent>,
}

#[derive(Debug, Deserialize)]
struct HotEvent {
    #[serde(rename = "hotScore", default)]
    hot_score: i64,
}

impl QqNewsRanking {
    fn normalize(body: &str, show_count: u32) -> Result<Vec<HotItem>, FetchError> {
        let mut response: QqNewsResponse = serde_json::from_str(body)?;
        if response.idlist.is_empty() {
            return Err(FetchError::Schema("missing idlist"));
        }
        let newslist = std::mem::take(&mut response.idlist[0].newslist);

        // First element is the pinned entry, not part of the ranking
        Ok(collect_ranked(
            LABEL,
            show_count,
            newslist.into_iter().skip(1).map(|n| {
                let hot = n.hot_event.map(|e| e.hot_score).unwrap_or(0);
                (n.title, hot)
            }),
        ))
    }
}

#[async_trait]
impl HotSource for QqNewsRanking {
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
