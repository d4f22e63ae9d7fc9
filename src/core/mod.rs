pub mod engine;
pub mod export;
pub mod filters;
pub mod screener;
pub mod source;

pub use crate::domain::model::{ScreenSummary, StockRecord};
pub use crate::domain::ports::{ExportFormat, ScreenSettings, StockSource};
pub use crate::utils::error::Result;
