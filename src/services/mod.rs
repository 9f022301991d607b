//! Collaborators around the engine: persistence, progress, parent
//! settings, analytics counters and the build version descriptor.
//!
//! None of these ever propagate a storage failure to the game; they log it
//! and fall back to defaults.

pub mod analytics;
pub mod parental;
pub mod progress;
pub mod store;
pub mod version;

pub use analytics::{Analytics, AnalyticsConfig, AnalyticsMode};
pub use parental::{ParentSettings, ParentSettingsStore};
pub use progress::{Progress, ProgressStore};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use version::VersionInfo;
