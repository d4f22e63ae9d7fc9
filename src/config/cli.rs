use crate::config::{DEFAULT_API_ENDPOINT, DEFAULT_OUTPUT_PATH};
use crate::core::filters::ZeroBound;
use crate::core::{ExportFormat, ScreenSettings};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

/// Run with no arguments to load the default endpoint, keep stocks with a
/// P/E between 5 and 15, and write them to `pe_stocks.json`.
#[derive(Debug, Clone, Parser)]
#[command(name = "stock-screener")]
#[command(about = "Screen stocks from a JSON API by P/E ratio, sector and dividend yield")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    /// Lower P/E bound (a bound of 0 is ignored unless --enforce-zero-bounds)
    #[arg(long, default_value = "5", allow_negative_numbers = true)]
    pub min_pe: Option<f64>,

    /// Upper P/E bound
    #[arg(long, default_value = "15", allow_negative_numbers = true)]
    pub max_pe: Option<f64>,

    /// Keep only this sector (exact, case-sensitive)
    #[arg(long)]
    pub sector: Option<String>,

    /// Keep only stocks whose dividend yield is at least this fraction
    #[arg(long)]
    pub min_yield: Option<f64>,

    #[arg(long, help = "Treat a P/E bound of 0 as a real bound")]
    pub enforce_zero_bounds: bool,

    /// Output file; `{timestamp}` is replaced with the current UTC time
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    #[arg(long, default_value = "json")]
    pub format: ExportFormat,

    /// HTTP timeout; no timeout when omitted
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Read source, filter and export settings from a TOML file instead
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,
}

impl ScreenSettings for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn min_pe(&self) -> Option<f64> {
        self.min_pe
    }

    fn max_pe(&self) -> Option<f64> {
        self.max_pe
    }

    fn sector(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    fn min_yield(&self) -> Option<f64> {
        self.min_yield
    }

    fn enforce_zero_bounds(&self) -> bool {
        self.enforce_zero_bounds
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn export_format(&self) -> ExportFormat {
        self.format
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_ratio_bounds(
            "min_pe/max_pe",
            self.min_pe,
            self.max_pe,
            ZeroBound::from_flag(self.enforce_zero_bounds),
        )?;
        validation::validate_finite("min_yield", self.min_yield)?;
        if let Some(sector) = &self.sector {
            validation::validate_non_empty_string("sector", sector)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        validation::validate_path("output", &self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_fixed_run() {
        let config = CliConfig::parse_from(["stock-screener"]);

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.min_pe(), Some(5.0));
        assert_eq!(config.max_pe(), Some(15.0));
        assert_eq!(config.sector(), None);
        assert_eq!(config.min_yield(), None);
        assert!(!config.enforce_zero_bounds());
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.export_format(), ExportFormat::Json);
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flag_overrides() {
        let config = CliConfig::parse_from([
            "stock-screener",
            "--min-pe",
            "-2",
            "--sector",
            "Tech",
            "--min-yield",
            "0.04",
            "--format",
            "csv",
            "--timeout-seconds",
            "10",
            "-o",
            "tech.csv",
        ]);

        assert_eq!(config.min_pe(), Some(-2.0));
        assert_eq!(config.sector(), Some("Tech"));
        assert_eq!(config.min_yield(), Some(0.04));
        assert_eq!(config.export_format(), ExportFormat::Csv);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.output_path(), "tech.csv");
    }

    #[test]
    fn test_inverted_range_fails_validation() {
        let config =
            CliConfig::parse_from(["stock-screener", "--min-pe", "20", "--max-pe", "10"]);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_pe_drops_upper_bound() {
        let config = CliConfig::parse_from(["stock-screener", "--max-pe", "0"]);

        assert_eq!(config.max_pe(), Some(0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enforced_zero_max_pe_below_min_fails_validation() {
        let config = CliConfig::parse_from([
            "stock-screener",
            "--max-pe",
            "0",
            "--enforce-zero-bounds",
        ]);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, crate::utils::error::ScreenerError::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_unknown_format_rejected_by_parser() {
        assert!(CliConfig::try_parse_from(["stock-screener", "--format", "xml"]).is_err());
    }
}
