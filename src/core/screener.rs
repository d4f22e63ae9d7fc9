use crate::core::export;
use crate::core::filters::{MinDividendYield, RatioRange, SectorMatch, StockFilter, DEFAULT_MIN_YIELD};
use crate::core::source::HttpSource;
use crate::domain::model::StockRecord;
use crate::domain::ports::{ExportFormat, StockSource};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Holds the most recently loaded stock list and answers filter queries on it.
///
/// Filters never touch the stored list; each returns a fresh `Vec` in the
/// original order. Only `load` replaces the list, and only on success.
pub struct Screener<S: StockSource = HttpSource> {
    source: S,
    stocks: Vec<StockRecord>,
}

impl Screener<HttpSource> {
    pub fn new() -> Self {
        Self::with_source(HttpSource::new())
    }
}

impl Default for Screener<HttpSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StockSource> Screener<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            stocks: Vec::new(),
        }
    }

    /// Replace the stored list with whatever `location` serves. Returns the count loaded.
    pub async fn load(&mut self, location: &str) -> Result<usize> {
        let stocks = self.source.fetch(location).await?;
        self.stocks = stocks;
        tracing::info!("Loaded {} stocks", self.stocks.len());
        Ok(self.stocks.len())
    }

    pub fn stocks(&self) -> &[StockRecord] {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn apply(&self, filter: &dyn StockFilter) -> Vec<StockRecord> {
        self.stocks
            .iter()
            .filter(|stock| filter.accepts(stock))
            .cloned()
            .collect()
    }

    /// Keep stocks accepted by every filter. An empty filter list keeps everything.
    pub fn apply_all(&self, filters: &[Box<dyn StockFilter>]) -> Vec<StockRecord> {
        let kept: Vec<StockRecord> = self
            .stocks
            .iter()
            .filter(|stock| filters.iter().all(|f| f.accepts(stock)))
            .cloned()
            .collect();

        for filter in filters {
            tracing::debug!("Criterion: {}", filter.describe());
        }
        tracing::info!("Screened {} of {} stocks", kept.len(), self.stocks.len());
        kept
    }

    /// A bound of exactly 0 counts as no bound here; use [`Screener::apply`]
    /// with a [`RatioRange`] set to `ZeroBound::Enforce` to apply it.
    pub fn filter_by_ratio_range(&self, min: Option<f64>, max: Option<f64>) -> Vec<StockRecord> {
        let filtered = self.apply(&RatioRange::new(min, max));
        tracing::info!("P/E filter kept {} stocks", filtered.len());
        filtered
    }

    pub fn filter_by_sector(&self, sector: &str) -> Vec<StockRecord> {
        let filtered = self.apply(&SectorMatch::new(sector));
        tracing::info!("Sector {}: found {} stocks", sector, filtered.len());
        filtered
    }

    /// `None` uses the default threshold of 5%.
    pub fn top_dividend_stocks(&self, min_yield: Option<f64>) -> Vec<StockRecord> {
        let filtered = self.apply(&MinDividendYield(min_yield.unwrap_or(DEFAULT_MIN_YIELD)));
        tracing::info!("Dividend filter found {} stocks", filtered.len());
        filtered
    }

    pub fn export_filtered(&self, stocks: &[StockRecord], path: impl AsRef<Path>) -> Result<PathBuf> {
        self.export_as(stocks, path, ExportFormat::Json)
    }

    pub fn export_as(
        &self,
        stocks: &[StockRecord],
        path: impl AsRef<Path>,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        export::write(stocks, path, format)?;
        tracing::info!("Results saved to {}", path.display());
        Ok(path.to_path_buf())
    }
}
