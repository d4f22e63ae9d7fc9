use crate::core::filters::ZeroBound;
use crate::core::{ExportFormat, ScreenSettings};
use crate::utils::error::{Result, ScreenerError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_pe: Option<f64>,
    pub max_pe: Option<f64>,
    pub sector: Option<String>,
    pub min_yield: Option<f64>,
    pub enforce_zero_bounds: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub path: String,
    pub format: Option<ExportFormat>,
}

impl TomlConfig {
    /// Load settings from a TOML file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ScreenerError::config(format!(
                "cannot read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| ScreenerError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ScreenerError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ScreenSettings for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn min_pe(&self) -> Option<f64> {
        self.filters.min_pe
    }

    fn max_pe(&self) -> Option<f64> {
        self.filters.max_pe
    }

    fn sector(&self) -> Option<&str> {
        self.filters.sector.as_deref()
    }

    fn min_yield(&self) -> Option<f64> {
        self.filters.min_yield
    }

    fn enforce_zero_bounds(&self) -> bool {
        self.filters.enforce_zero_bounds.unwrap_or(false)
    }

    fn output_path(&self) -> &str {
        &self.export.path
    }

    fn export_format(&self) -> ExportFormat {
        self.export.format.unwrap_or_default()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        validation::validate_ratio_bounds(
            "filters.min_pe/max_pe",
            self.filters.min_pe,
            self.filters.max_pe,
            ZeroBound::from_flag(self.enforce_zero_bounds()),
        )?;
        validation::validate_finite("filters.min_yield", self.filters.min_yield)?;
        if let Some(sector) = &self.filters.sector {
            validation::validate_non_empty_string("filters.sector", sector)?;
        }
        validation::validate_path("export.path", &self.export.path)
    }
}
