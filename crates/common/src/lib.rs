//! PaperLens Common Library
//!
//! Shared code for the PaperLens service:
//! - Domain model (records, query specifications)
//! - Corpus store (load-once, read-only snapshot)
//! - Query engine (filter, sort, paginate, statistics)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use engine::{run_query, QueryOutcome};
pub use errors::{AppError, Result};
pub use model::{PaperRecord, QuerySpec, SortKey, Source, Statistics};
pub use store::Corpus;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
