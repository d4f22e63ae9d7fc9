use crate::core::filters::ZeroBound;
use crate::utils::error::{Result, ScreenerError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ScreenerError {
    ScreenerError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(invalid(field_name, v, "Value must be a finite number")),
        _ => Ok(()),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// A range with both ends set must not be inverted. Open ends are always fine.
pub fn validate_bounds(field_name: &str, min: Option<f64>, max: Option<f64>) -> Result<()> {
    validate_finite(field_name, min)?;
    validate_finite(field_name, max)?;

    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(invalid(
                field_name,
                format!("{}..{}", lo, hi),
                "Lower bound is greater than upper bound",
            ));
        }
    }
    Ok(())
}

/// Like [`validate_bounds`], but a bound the filter ignores is not compared.
pub fn validate_ratio_bounds(
    field_name: &str,
    min: Option<f64>,
    max: Option<f64>,
    zero_bound: ZeroBound,
) -> Result<()> {
    validate_bounds(field_name, zero_bound.effective(min), zero_bound.effective(max))
}
