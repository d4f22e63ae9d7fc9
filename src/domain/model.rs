use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_PE: &str = "pe";
pub const FIELD_SECTOR: &str = "sector";
pub const FIELD_DIV_YIELD: &str = "div_yield";

/// One stock as returned by the API.
///
/// Kept as a field map rather than a struct so that records missing a field,
/// or carrying fields the screener never looks at, pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockRecord {
    pub data: Map<String, Value>,
}

impl StockRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Price/earnings ratio. `None` when absent, null, or not a number.
    pub fn pe(&self) -> Option<f64> {
        self.get(FIELD_PE).and_then(Value::as_f64)
    }

    pub fn sector(&self) -> Option<&str> {
        self.get(FIELD_SECTOR).and_then(Value::as_str)
    }

    /// Dividend yield fraction, 0 when the field is missing or unusable.
    pub fn div_yield(&self) -> f64 {
        self.get(FIELD_DIV_YIELD)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSummary {
    pub loaded: usize,
    pub kept: usize,
    pub output_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> StockRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accessors_on_full_record() {
        let stock = record(json!({
            "ticker": "ACME",
            "pe": 12.5,
            "sector": "Tech",
            "div_yield": 0.02
        }));

        assert_eq!(stock.pe(), Some(12.5));
        assert_eq!(stock.sector(), Some("Tech"));
        assert_eq!(stock.div_yield(), 0.02);
        assert_eq!(stock.get("ticker"), Some(&json!("ACME")));
    }

    #[test]
    fn test_missing_and_mistyped_fields() {
        let stock = record(json!({"pe": null, "sector": 7, "div_yield": "high"}));

        assert_eq!(stock.pe(), None);
        assert_eq!(stock.sector(), None);
        assert_eq!(stock.div_yield(), 0.0);

        let empty = StockRecord::default();
        assert_eq!(empty.pe(), None);
        assert_eq!(empty.div_yield(), 0.0);
    }

    #[test]
    fn test_integer_pe_is_numeric() {
        let stock = record(json!({"pe": 8}));
        assert_eq!(stock.pe(), Some(8.0));
    }

    #[test]
    fn test_unknown_fields_round_trip_in_order() {
        let raw = r#"{"z":1,"name":"Société Générale","a":[1,2]}"#;
        let stock: StockRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(serde_json::to_string(&stock).unwrap(), raw);
    }
}
