//! Bubble Stitch Settings Crate
//!
//! Configuration file handling: where patterns live and how logs are
//! written.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, default_data_dir, Config, LoggingSettings, StorageSettings,
};
pub use error::{SettingsError, SettingsResult};
