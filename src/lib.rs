//! rebang - Chinese hot-topic aggregator
//!
//! Aggregates trending-topic feeds from several independent public JSON
//! endpoints, normalizes them into one canonical item shape, filters them
//! through a keyword blacklist, and joins the results into a single
//! marquee text stream refreshed on a timer.
//!
//! # Architecture
//!
//! - [`config`] - Configuration document (endpoints, blacklist, interval)
//! - [`models`] - Canonical item model and popularity formatting
//! - [`sources`] - One adapter per external schema plus the registry
//! - [`pipeline`] - Concurrent fetch orchestration, filtering, assembly
//! - [`scheduler`] - Periodic refresh with an overlap guard
//! - [`error`] - Fetch and config error types
//!
//! # Example
//!
//! ```no_run
//! use rebang::config::AppConfig;
//! use rebang::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = Pipeline::new()?;
//!     let text = pipeline.run_cycle(&AppConfig::default()).await;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod scheduler;
pub mod sources;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ApiEndpoint, AppConfig};
    pub use crate::error::{ConfigError, FetchError};
    pub use crate::models::{format_hot, parse_lenient, HotItem};
    pub use crate::pipeline::Pipeline;
    pub use crate::scheduler::{CycleDriver, PipelineDriver, RefreshScheduler};
    pub use crate::sources::{HotSource, SourceRegistry};
}

pub use models::HotItem;
