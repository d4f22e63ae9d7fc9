pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::core::{engine::ScreenEngine, screener::Screener, source::HttpSource};
pub use crate::domain::model::{ScreenSummary, StockRecord};
pub use crate::domain::ports::{ExportFormat, ScreenSettings, StockSource};
pub use crate::utils::error::{Result, ScreenerError};
