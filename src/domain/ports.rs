use crate::domain::model::StockRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[async_trait]
pub trait StockSource: Send + Sync {
    /// Fetch the full list of stocks published at `location`.
    async fn fetch(&self, location: &str) -> Result<Vec<StockRecord>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unsupported export format '{}' (expected json or csv)", other)),
        }
    }
}

/// Everything a screening run needs to know, whatever it was read from.
pub trait ScreenSettings: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn min_pe(&self) -> Option<f64>;
    fn max_pe(&self) -> Option<f64>;
    fn sector(&self) -> Option<&str>;
    fn min_yield(&self) -> Option<f64>;
    fn enforce_zero_bounds(&self) -> bool;
    fn output_path(&self) -> &str;
    fn export_format(&self) -> ExportFormat;
    fn request_timeout(&self) -> Option<Duration>;
}
