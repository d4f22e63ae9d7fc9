use crate::domain::model::StockRecord;
use crate::domain::ports::ExportFormat;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const JSON_INDENT: &[u8] = b"   ";
const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

/// JSON array, three-space indent, non-ASCII text left as is.
pub fn to_json_bytes(stocks: &[StockRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    stocks.serialize(&mut ser)?;
    Ok(buf)
}

pub fn write_json(stocks: &[StockRecord], path: &Path) -> Result<()> {
    let data = to_json_bytes(stocks)?;
    let mut file = File::create(path)?;
    file.write_all(&data)?;
    file.flush()?;
    Ok(())
}

/// Column names in the order they are first seen across all records.
pub fn csv_columns(stocks: &[StockRecord]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for stock in stocks {
        for key in stock.data.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }
    columns
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => nested.to_string(),
    }
}

pub fn write_csv(stocks: &[StockRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let columns = csv_columns(stocks);
    if !columns.is_empty() {
        writer.write_record(&columns)?;
    }
    for stock in stocks {
        writer.write_record(columns.iter().map(|c| csv_cell(stock.get(c))))?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write(stocks: &[StockRecord], path: &Path, format: ExportFormat) -> Result<()> {
    tracing::debug!(
        "Writing {} records as {} to {}",
        stocks.len(),
        format,
        path.display()
    );
    match format {
        ExportFormat::Json => write_json(stocks, path),
        ExportFormat::Csv => write_csv(stocks, path),
    }
}

/// Expand `{timestamp}` in an output path template.
pub fn resolve_output_path(template: &str, now: DateTime<Utc>) -> String {
    if template.contains(TIMESTAMP_PLACEHOLDER) {
        template.replace(
            TIMESTAMP_PLACEHOLDER,
            &now.format("%Y%m%d_%H%M%S").to_string(),
        )
    } else {
        template.to_string()
    }
}
