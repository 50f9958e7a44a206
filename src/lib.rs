//! # Bubble Stitch
//!
//! Design and follow bubble crochet patterns on a fixed hexagonal grid:
//! paint bubbles in design mode, then step through the rows in work mode
//! while tracking progress.
//!
//! ## Architecture
//!
//! Bubble Stitch is organized as a workspace with multiple crates:
//!
//! 1. **bubblestitch-core** - Grid geometry, pattern model, errors, events
//! 2. **bubblestitch-state** - Actions, bounded undo/redo, the reducer and views
//! 3. **bubblestitch-storage** - `PatternStore` with file and memory backends
//! 4. **bubblestitch-settings** - Configuration files
//! 5. **bubblestitch-session** - `StateHost`, the owner of the live session
//! 6. **bubblestitch** - This facade, plus logging setup
//!
//! A presentation shell reads [`ApplicationState`] and its views and changes
//! it only by dispatching [`Action`]s to a [`StateHost`].

use std::sync::Arc;

use anyhow::Context;

pub use bubblestitch_core::{
    default_palette, geometry, is_valid_cell, neighbors, row_length, total_cell_count, AppEvent,
    Cell, CellCoord, ColorId, Error, EventBus, EventCategory, EventFilter, Grid, PaletteColor,
    Pattern, PatternError, Progress, Result, StateEvent, StorageEvent, SubscriptionId,
    MAX_ROW_LENGTH, TOTAL_ROWS,
};
pub use bubblestitch_session::StateHost;
pub use bubblestitch_settings::{Config, LoggingSettings, SettingsError, StorageSettings};
pub use bubblestitch_state::{
    reduce, reduce_at, Action, AppMode, ApplicationState, History, RowSummary, MAX_HISTORY_DEPTH,
};
pub use bubblestitch_storage::{
    FilePatternStore, MemoryPatternStore, PatternStore, StorageError, StorageResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Human readable output on stdout at INFO, overridable through `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(&LoggingSettings::default())
}

/// Initialize logging from configuration.
///
/// `RUST_LOG` takes precedence over `settings.level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_logging_with(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.level.trim()))
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_thread_ids(true)
            .json();
        registry
            .with(fmt_layer)
            .try_init()
            .context("failed to install JSON log subscriber")?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true);
        registry
            .with(fmt_layer)
            .try_init()
            .context("failed to install log subscriber")?;
    }

    Ok(())
}

/// Open a session on the file store described by `config`.
pub async fn open_session(config: &Config) -> anyhow::Result<StateHost> {
    config.validate().context("invalid configuration")?;
    let data_dir = config
        .data_dir()
        .context("could not resolve the pattern data directory")?;
    tracing::info!("Opening pattern data directory {}", data_dir.display());

    let store: Arc<dyn PatternStore> = Arc::new(FilePatternStore::new(data_dir));
    Ok(StateHost::open(store).await)
}
