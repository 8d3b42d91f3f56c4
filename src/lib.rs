//! localepack - per-locale translation fragment aggregator
//!
//! localepack collects JSON translation fragments scattered across a source
//! tree (named like `en.json`, `common.en.json`, `menu-de.json`) and merges
//! them into one consolidated file per language. It runs a full aggregation
//! pass at build start and, in watch mode, recomputes only the affected
//! language's output when a fragment changes.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
mod paths;
pub mod scanner;
pub mod updater;
pub mod watcher;

// Re-exports for convenience
pub use classify::{classify, matches_language};
pub use config::{Config, ConfigWarning, DEFAULT_CONFIG_FILE};
pub use engine::{Aggregator, BuildEntry, BuildReport};
pub use error::{CollectorError, CollectorResult};
pub use merge::deep_merge;
pub use scanner::{scan, scan_language, FragmentTree};
pub use updater::{UpdateOutcome, UpdateStrategy, Updater};
pub use watcher::{watch, WatchEvent};
