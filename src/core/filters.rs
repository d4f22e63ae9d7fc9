use crate::domain::model::StockRecord;

pub const DEFAULT_MIN_YIELD: f64 = 0.05;

pub trait StockFilter: Send + Sync {
    fn accepts(&self, stock: &StockRecord) -> bool;

    /// Short human-readable form for log lines.
    fn describe(&self) -> String;
}

/// How a ratio bound of exactly 0 is interpreted.
///
/// `Ignore` keeps the long-standing behavior where a zero bound counts as
/// "no bound". `Enforce` applies it like any other value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroBound {
    #[default]
    Ignore,
    Enforce,
}

impl ZeroBound {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            ZeroBound::Enforce
        } else {
            ZeroBound::Ignore
        }
    }

    /// The bound as the filter will actually apply it.
    pub fn effective(self, bound: Option<f64>) -> Option<f64> {
        match self {
            ZeroBound::Ignore => bound.filter(|b| *b != 0.0),
            ZeroBound::Enforce => bound,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatioRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub zero_bound: ZeroBound,
}

impl RatioRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            zero_bound: ZeroBound::default(),
        }
    }

    pub fn with_zero_bound(mut self, zero_bound: ZeroBound) -> Self {
        self.zero_bound = zero_bound;
        self
    }
}

impl StockFilter for RatioRange {
    fn accepts(&self, stock: &StockRecord) -> bool {
        let Some(pe) = stock.pe() else {
            return false;
        };

        if let Some(min) = self.zero_bound.effective(self.min) {
            if pe < min {
                return false;
            }
        }
        if let Some(max) = self.zero_bound.effective(self.max) {
            if pe > max {
                return false;
            }
        }
        true
    }

    fn describe(&self) -> String {
        let fmt_bound = |b: Option<f64>| b.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        format!("P/E in [{}, {}]", fmt_bound(self.min), fmt_bound(self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMatch(pub String);

impl SectorMatch {
    pub fn new(sector: impl Into<String>) -> Self {
        Self(sector.into())
    }
}

impl StockFilter for SectorMatch {
    fn accepts(&self, stock: &StockRecord) -> bool {
        stock.sector() == Some(self.0.as_str())
    }

    fn describe(&self) -> String {
        format!("sector == {:?}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinDividendYield(pub f64);

impl Default for MinDividendYield {
    fn default() -> Self {
        Self(DEFAULT_MIN_YIELD)
    }
}

impl StockFilter for MinDividendYield {
    fn accepts(&self, stock: &StockRecord) -> bool {
        stock.div_yield() >= self.0
    }

    fn describe(&self) -> String {
        format!("dividend yield >= {}", self.0)
    }
}
