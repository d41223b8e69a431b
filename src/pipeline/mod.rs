//! Hot-topic aggregation pipeline
//!
//! One cycle fans out over every enabled endpoint, runs each adapter as an
//! independent task, and joins the results back into a single marquee
//! string. Failures are isolated per source: a broken or hung feed costs
//! only its own slot in the output, never the cycle.
//!
//! Source order in the output always matches the configured endpoint
//! order, regardless of fetch completion order.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;

use crate::config::{ApiEndpoint, AppConfig};
use crate::error::FetchError;
use crate::models::HotItem;
use crate::sources::{build_client, SourceRegistry};

/// Separator between display strings; also appended once at the end
pub const SEPARATOR: &str = "    ";

/// Whole-cycle fallback when no source produced anything
pub const EMPTY_FALLBACK: &str = "没有启用的数据源或所有数据源加载失败。请检查配置。";

/// Placeholder line substituted for a source that failed this cycle
pub fn load_failure_line(name: &str) -> String {
    format!("[{name}数据加载失败]")
}

/// Drop items whose title contains a blacklisted keyword
///
/// Matching is case-insensitive substring containment. Order is preserved
/// and the operation is idempotent. Empty blacklist entries are ignored.
pub fn filter_items(items: Vec<HotItem>, blacklist: &[String]) -> Vec<HotItem> {
    items
        .into_iter()
        .filter(|item| {
            let title = item.title.to_lowercase();
            !blacklist
                .iter()
                .filter(|word| !word.is_empty())
                .any(|word| title.contains(&word.to_lowercase()))
        })
        .collect()
}

/// Render one item to its display string
///
/// `source_name` is the configured endpoint name, which is what the
/// marquee shows; the item's canonical `source` label stays available to
/// other consumers.
pub fn render(item: &HotItem, source_name: &str) -> String {
    format!("[{source_name}] {} ({})", item.title, item.formatted_hot())
}

/// Join per-source display lines into the final marquee text
///
/// Empty input yields the fixed fallback message, never an empty string.
pub fn assemble(lines: &[String]) -> String {
    if lines.is_empty() {
        EMPTY_FALLBACK.to_string()
    } else {
        format!("{}{}", lines.join(SEPARATOR), SEPARATOR)
    }
}

/// The aggregation pipeline: registry + shared HTTP client
pub struct Pipeline {
    registry: Arc<SourceRegistry>,
    client: Client,
}

impl Pipeline {
    /// Create a pipeline with the default adapter registry
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_registry(SourceRegistry::new(), build_client()?))
    }

    /// Create a pipeline with a custom registry and client (tests)
    pub fn with_registry(registry: SourceRegistry, client: Client) -> Self {
        Self {
            registry: Arc::new(registry),
            client,
        }
    }

    /// Run one full aggregation cycle
    ///
    /// Fetches all enabled sources concurrently, waits for every task,
    /// then assembles the display lines in configured endpoint order.
    pub async fn run_cycle(&self, config: &AppConfig) -> String {
        let enabled: Vec<&ApiEndpoint> = config.enabled_endpoints().collect();
        tracing::info!(sources = enabled.len(), "starting refresh cycle");

        let mut tasks = Vec::with_capacity(enabled.len());
        for endpoint in enabled {
            let registry = Arc::clone(&self.registry);
            let client = self.client.clone();
            let endpoint = endpoint.clone();
            let blacklist = config.keyword_blacklist.clone();
            let name = endpoint.name.clone();

            let handle = tokio::spawn(async move {
                process_endpoint(&registry, &client, &endpoint, &blacklist).await
            });
            tasks.push((name, handle));
        }

        // Join barrier: join_all yields results in spawn order, which
        // restores the configured ordering no matter when each fetch
        // completed
        let (names, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        let mut lines = Vec::new();
        for (name, joined) in names.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(slot) => lines.extend(slot),
                Err(err) => {
                    tracing::error!(source = %name, error = %err, "source task panicked");
                    lines.push(load_failure_line(&name));
                }
            }
        }

        let text = assemble(&lines);
        tracing::info!(lines = lines.len(), chars = text.chars().count(), "cycle complete");
        text
    }
}

/// Fetch, filter, and format one endpoint
///
/// Never fails: an unknown name contributes nothing, a fetch or parse
/// error contributes the placeholder line.
async fn process_endpoint(
    registry: &SourceRegistry,
    client: &Client,
    endpoint: &ApiEndpoint,
    blacklist: &[String],
) -> Vec<String> {
    let Some(source) = registry.resolve(&endpoint.name) else {
        tracing::warn!(source = %endpoint.name, "no adapter registered, skipping");
        return Vec::new();
    };

    match source.fetch(client, endpoint).await {
        Ok(items) => {
            tracing::debug!(source = %endpoint.name, items = items.len(), "fetched");
            filter_items(items, blacklist)
                .iter()
                .map(|item| render(item, &endpoint.name))
                .collect()
        }
        Err(err) => {
            tracing::warn!(source = %endpoint.name, error = %err, "source failed");
            vec![load_failure_line(&endpoint.name)]
        }
    }
}
