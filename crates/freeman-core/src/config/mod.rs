//! User-facing configuration for the directory core.

pub mod settings;

pub use settings::{Config, GeneralConfig, WatcherConfig};
