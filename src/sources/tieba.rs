//! 贴吧热议 (Tieba hot topics) adapter
//!
//! Schema: items nested under `data.bang_topic.topic_list[]` with
//! `topic_name` (title) and `discuss_num` (popularity score).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::HotItem;

use super::{collect_ranked, get_text, HotSource};

/// Canonical label for items from this source
pub const LABEL: &str = "贴吧";

/// Tieba hot-topics adapter
pub struct TiebaHotTopics;

#[derive(Debug, Deserialize)]
struct TiebaResponse {
    data: Option<TiebaData>,
}

#[derive(Debug, Deserialize)]
struct TiebaData {
    bang_topic: Option<BangTopic>,
}

#[derive(Debug, Deserialize)]
struct BangTopic {
    topic_list: Option<Vec<TopicEntry>>,
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    #[serde(default)]
    topic_name: String,
    #[serde(default)]
    discuss_num: i64,
}

impl TiebaHotTopics {
    fn normalize(body: &str, show_count: u32) -> Result<Vec<HotItem>, FetchError> {
        let response: TiebaResponse = serde_json::from_str(body)?;
        let topics = response
            .data
            .and_then(|d| d.bang_topic)
            .and_then(|b| b.topic_list)
            .ok_or(FetchError::Schema("missing data.bang_topic.topic_list"))?;

        Ok(collect_ranked(
            LABEL,
            show_count,
            topics.into_iter().map(|t| (t.topic_name, t.discuss_num)),
        ))
    }
}

#[async_trait]
impl HotSource for TiebaHotTopics {
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
