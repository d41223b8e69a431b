//! Source adapters for the trending feeds
//!
//! Each submodule knows how to fetch and normalize exactly one external
//! JSON schema. Per-source quirks (a pinned first entry, a rewritten URL)
//! live inside the adapter that owns them; the orchestrator stays
//! schema-agnostic.
//!
//! Adapters either return a fully normalized item list or a [`FetchError`];
//! partial results are never produced.

pub mod qqnews;
pub mod sina;
pub mod tieba;
pub mod toutiao;
pub mod weibo;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ApiEndpoint;
use crate::error::FetchError;
use crate::models::HotItem;

pub use qqnews::QqNewsRanking;
pub use sina::SinaRanking;
pub use tieba::TiebaHotTopics;
pub use toutiao::ToutiaoHotBoard;
pub use weibo::WeiboHotSearch;

/// Outbound identification header sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Per-request timeout; a hung source degrades to its own placeholder
/// without blocking the other sources
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A trending-feed adapter for one fixed external schema
#[async_trait]
pub trait HotSource: Send + Sync {
    /// Canonical label stamped on every item this adapter produces,
    /// independent of the configured endpoint name
    fn label(&self) -> &'static str;

    /// Fetch the feed and normalize it
    ///
    /// Returns items in response order with 1-based ranks, empty titles
    /// dropped, truncated to `endpoint.show_count`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on network failure, timeout, non-2xx status,
    /// malformed JSON, or an unexpected schema shape.
    async fn fetch(
        &self,
        client: &Client,
        endpoint: &ApiEndpoint,
    ) -> Result<Vec<HotItem>, FetchError>;
}

/// Build the shared pooled HTTP client
///
/// One client serves all adapters so connection pooling bounds socket
/// usage across concurrent fetches.
///
/// # Errors
///
/// Returns `FetchError::Http` if the client cannot be constructed.
pub fn build_client() -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Immutable registry mapping configured endpoint names to adapters
///
/// Built once at startup. Unknown names resolve to `None`, which the
/// orchestrator treats as zero items rather than an error.
pub struct SourceRegistry {
    adapters: HashMap<&'static str, Box<dyn HotSource>>,
}

impl SourceRegistry {
    /// Build the registry with all known adapters
    pub fn new() -> Self {
        let mut adapters: HashMap<&'static str, Box<dyn HotSource>> = HashMap::new();
        adapters.insert("微博热搜", Box::new(WeiboHotSearch));
        adapters.insert("贴吧热议", Box::new(TiebaHotTopics));
        adapters.insert("腾讯新闻", Box::new(QqNewsRanking));
        // The two Sina categories share one adapter; the category comes
        // from the configured URL's top_cat parameter
        adapters.insert("新浪国内", Box::new(SinaRanking::new()));
        adapters.insert("新浪国际", Box::new(SinaRanking::new()));
        adapters.insert("今日头条", Box::new(ToutiaoHotBoard));
        Self { adapters }
    }

    /// An empty registry, for assembling custom adapter sets in tests
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Register an adapter under a configured endpoint name
    pub fn register(&mut self, name: &'static str, adapter: Box<dyn HotSource>) {
        self.adapters.insert(name, adapter);
    }

    /// Look up the adapter for a configured endpoint name
    pub fn resolve(&self, name: &str) -> Option<&dyn HotSource> {
        self.adapters.get(name).map(Box::as_ref)
    }

    /// Configured names with a registered adapter, for diagnostics
    pub fn known_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.keys().copied()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Issue one GET and return the body text
///
/// Shared by all adapters: maps timeouts and non-2xx statuses to the
/// corresponding `FetchError` variants before the body is read.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Normalize raw (title, hot) pairs into ranked canonical items
///
/// Drops empty titles, assigns 1-based ranks after the drop, clamps
/// negative scores to zero, and truncates to `show_count`.
pub(crate) fn collect_ranked<I>(label: &'static str, show_count: u32, raw: I) -> Vec<HotItem>
where
    I: IntoIterator<Item = (String, i64)>,
{
    raw.into_iter()
        .filter(|(title, _)| !title.trim().is_empty())
        .take(show_count as usize)
        .enumerate()
        .map(|(i, (title, hot))| HotItem {
            rank: (i + 1) as u32,
            title,
            hot: hot.max(0),
            source: label.to_string(),
        })
        .collect()
}
