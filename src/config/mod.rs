//! Configuration management for the rebang aggregator
//!
//! The configuration is a JSON document stored in the per-user application
//! data directory. The pipeline reads a full snapshot at the start of each
//! refresh cycle and never writes it back; only first-run bootstrap and the
//! (external) settings UI persist changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "REBANG_CONFIG";

/// Directory name under the per-user application data path
const CONFIG_DIR_NAME: &str = "DesktopNews";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.json";

/// One configured external feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoint {
    /// Key into the adapter registry; unknown names are silently skipped
    pub name: String,

    /// Feed URL; one adapter derives a different URL from this (see sina)
    pub url: String,

    /// Display color, opaque to the pipeline
    #[serde(default = "default_color")]
    pub color: String,

    /// Display category, opaque to the pipeline
    #[serde(default = "default_category")]
    pub category: String,

    /// Disabled endpoints are skipped entirely during a cycle
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items kept for this source
    #[serde(default = "default_show_count")]
    pub show_count: u32,
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_category() -> String {
    "综合".to_string()
}

fn default_true() -> bool {
    true
}

fn default_show_count() -> u32 {
    20
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minutes between refresh cycles
    pub refresh_interval_minutes: u64,

    /// Ordered feed list; output order follows this order
    pub api_endpoints: Vec<ApiEndpoint>,

    /// Items whose title contains any of these (case-insensitive) are dropped
    pub keyword_blacklist: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_minutes: 10,
            api_endpoints: vec![
                ApiEndpoint {
                    name: "微博热搜".to_string(),
                    url: "https://weibo.com/ajax/side/hotSearch".to_string(),
                    color: "#FF0000".to_string(),
                    category: "社交".to_string(),
                    enabled: true,
                    show_count: 1,
                },
                ApiEndpoint {
                    name: "贴吧热议".to_string(),
                    url: "https://tieba.baidu.com/hottopic/browse/topicList".to_string(),
                    color: "#1E90FF".to_string(),
                    category: "社区".to_string(),
                    enabled: true,
                    show_count: 1,
                },
                ApiEndpoint {
                    name: "腾讯新闻".to_string(),
                    url: "https://r.inews.qq.com/gw/event/hot_ranking_list?page_size=50"
                        .to_string(),
                    color: "#32CD32".to_string(),
                    category: "新闻".to_string(),
                    enabled: true,
                    show_count: 1,
                },
                ApiEndpoint {
                    name: "新浪国内".to_string(),
                    url: "https://top.news.sina.com.cn/ws/GetTopDataList.php?top_cat=news_china_suda"
                        .to_string(),
                    color: "#FF8C00".to_string(),
                    category: "新闻".to_string(),
                    enabled: false,
                    show_count: 0,
                },
                ApiEndpoint {
                    name: "新浪国际".to_string(),
                    url: "https://top.news.sina.com.cn/ws/GetTopDataList.php?top_cat=news_world_suda"
                        .to_string(),
                    color: "#FF6347".to_string(),
                    category: "新闻".to_string(),
                    enabled: false,
                    show_count: 0,
                },
                ApiEndpoint {
                    name: "今日头条".to_string(),
                    url: "https://www.toutiao.com/hot-event/hot-board/?origin=toutiao_pc"
                        .to_string(),
                    color: "#FF4500".to_string(),
                    category: "资讯".to_string(),
                    enabled: true,
                    show_count: 1,
                },
            ],
            keyword_blacklist: vec![
                "明星".to_string(),
                "广告".to_string(),
                "推广".to_string(),
                "八卦".to_string(),
                "代言".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Validate invariants the pipeline relies on
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the refresh interval is zero or an
    /// endpoint carries an empty name or URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_minutes must be greater than zero".to_string(),
            ));
        }

        for endpoint in &self.api_endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "endpoint name cannot be empty".to_string(),
                ));
            }
            if endpoint.url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "endpoint '{}' has an empty URL",
                    endpoint.name
                )));
            }
        }

        Ok(())
    }

    /// Enabled endpoints in configured order
    pub fn enabled_endpoints(&self) -> impl Iterator<Item = &ApiEndpoint> {
        self.api_endpoints.iter().filter(|e| e.enabled)
    }
}

/// Resolve the per-user config file path
///
/// Honors `REBANG_CONFIG` first, then the platform application data
/// directory (`APPDATA` on Windows, `XDG_CONFIG_HOME` or `~/.config`
/// elsewhere).
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` when no base directory can be found.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or(ConfigError::NoConfigDir)?;

    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the configuration, falling back to defaults
///
/// A missing file bootstraps the default config to disk; a corrupt or
/// invalid file is left alone and the defaults are used for this run.
/// This function never fails: the aggregator always starts.
pub fn load_or_default(path: &Path) -> AppConfig {
    match load(path) {
        Ok(config) => config,
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            if let Err(err) = save(path, &config) {
                tracing::warn!(path = %path.display(), error = %err, "failed to write default config");
            }
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "config unusable, using defaults");
            AppConfig::default()
        }
    }
}

/// Load and validate the configuration document
///
/// # Errors
///
/// Returns `ConfigError` on I/O failure, malformed JSON, or failed
/// validation.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// Persist the configuration document, creating parent directories
///
/// # Errors
///
/// Returns `ConfigError` on I/O or serialization failure.
pub fn save(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    std::fs::write(path, raw)?;
    Ok(())
}
