use crate::core::export::resolve_output_path;
use crate::core::filters::{MinDividendYield, RatioRange, SectorMatch, StockFilter, ZeroBound};
use crate::core::screener::Screener;
use crate::core::source::HttpSource;
use crate::domain::model::ScreenSummary;
use crate::domain::ports::{ScreenSettings, StockSource};
use crate::utils::error::Result;

/// Criteria in application order: ratio range first, then the optional ones.
pub fn build_criteria<C: ScreenSettings + ?Sized>(settings: &C) -> Vec<Box<dyn StockFilter>> {
    let zero_bound = ZeroBound::from_flag(settings.enforce_zero_bounds());

    let mut criteria: Vec<Box<dyn StockFilter>> = vec![Box::new(
        RatioRange::new(settings.min_pe(), settings.max_pe()).with_zero_bound(zero_bound),
    )];

    if let Some(sector) = settings.sector() {
        criteria.push(Box::new(SectorMatch::new(sector)));
    }
    if let Some(min_yield) = settings.min_yield() {
        criteria.push(Box::new(MinDividendYield(min_yield)));
    }
    criteria
}

/// One load, screen, export pass driven by a settings provider.
pub struct ScreenEngine<C: ScreenSettings, S: StockSource = HttpSource> {
    settings: C,
    screener: Screener<S>,
}

impl<C: ScreenSettings> ScreenEngine<C, HttpSource> {
    pub fn new(settings: C) -> Result<Self> {
        let source = match settings.request_timeout() {
            Some(timeout) => HttpSource::with_timeout(timeout)?,
            None => HttpSource::new(),
        };
        Ok(Self::with_source(settings, source))
    }
}

impl<C: ScreenSettings, S: StockSource> ScreenEngine<C, S> {
    pub fn with_source(settings: C, source: S) -> Self {
        Self {
            settings,
            screener: Screener::with_source(source),
        }
    }

    pub fn screener(&self) -> &Screener<S> {
        &self.screener
    }

    pub async fn run(&mut self) -> Result<ScreenSummary> {
        tracing::info!("Starting screening run");

        tracing::info!("Loading stocks from {}", self.settings.api_endpoint());
        let loaded = self.screener.load(self.settings.api_endpoint()).await?;

        let criteria = build_criteria(&self.settings);
        let kept = self.screener.apply_all(&criteria);

        let output_path = resolve_output_path(self.settings.output_path(), chrono::Utc::now());
        self.screener
            .export_as(&kept, &output_path, self.settings.export_format())?;

        Ok(ScreenSummary {
            loaded,
            kept: kept.len(),
            output_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StockRecord;
    use crate::domain::ports::ExportFormat;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::TempDir;

    struct TestSettings {
        min_pe: Option<f64>,
        max_pe: Option<f64>,
        sector: Option<String>,
        min_yield: Option<f64>,
        enforce_zero_bounds: bool,
        output_path: String,
    }

    impl TestSettings {
        fn new(output_path: String) -> Self {
            Self {
                min_pe: Some(5.0),
                max_pe: Some(15.0),
                sector: None,
                min_yield: None,
                enforce_zero_bounds: false,
                output_path,
            }
        }
    }

    impl ScreenSettings for TestSettings {
        fn api_endpoint(&self) -> &str {
            "stub://stocks"
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
            &self.output_path
        }
        fn export_format(&self) -> ExportFormat {
            ExportFormat::Json
        }
        fn request_timeout(&self) -> Option<Duration> {
            None
        }
    }

    struct FixedSource(Vec<StockRecord>);

    #[async_trait::async_trait]
    impl StockSource for FixedSource {
        async fn fetch(&self, _location: &str) -> Result<Vec<StockRecord>> {
            Ok(self.0.clone())
        }
    }

    fn source() -> FixedSource {
        FixedSource(
            serde_json::from_value(json!([
                {"id": 1, "pe": -1.0, "sector": "Tech", "div_yield": 0.09},
                {"id": 2, "pe": 9.0, "sector": "Tech", "div_yield": 0.02},
                {"id": 3, "pe": 12.0, "sector": "Energy", "div_yield": 0.07},
                {"id": 4, "pe": 30.0, "sector": "Tech"}
            ]))
            .unwrap(),
        )
    }

    #[test]
    fn test_default_criteria_is_ratio_range_only() {
        let criteria = build_criteria(&TestSettings::new("out.json".into()));

        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].describe(), "P/E in [5, 15]");
    }

    #[test]
    fn test_optional_criteria_appended_in_order() {
        let mut settings = TestSettings::new("out.json".into());
        settings.sector = Some("Tech".into());
        settings.min_yield = Some(0.03);

        let described: Vec<String> = build_criteria(&settings)
            .iter()
            .map(|c| c.describe())
            .collect();

        assert_eq!(
            described,
            vec!["P/E in [5, 15]", "sector == \"Tech\"", "dividend yield >= 0.03"]
        );
    }

    #[tokio::test]
    async fn test_run_writes_screened_stocks() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("pe_stocks.json");
        let settings = TestSettings::new(output.to_str().unwrap().to_string());

        let mut engine = ScreenEngine::with_source(settings, source());
        let summary = engine.run().await.unwrap();

        assert_eq!(summary.loaded, 4);
        assert_eq!(summary.kept, 2);
        assert_eq!(engine.screener().len(), 4);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let ids: Vec<i64> = written
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_zero_bound_setting_reaches_filter() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.json");

        let mut settings = TestSettings::new(output.to_str().unwrap().to_string());
        settings.min_pe = Some(0.0);
        settings.max_pe = None;
        settings.sector = Some("Tech".into());

        let mut lenient = ScreenEngine::with_source(settings, source());
        assert_eq!(lenient.run().await.unwrap().kept, 3);

        let mut settings = TestSettings::new(output.to_str().unwrap().to_string());
        settings.min_pe = Some(0.0);
        settings.max_pe = None;
        settings.sector = Some("Tech".into());
        settings.enforce_zero_bounds = true;

        let mut strict = ScreenEngine::with_source(settings, source());
        assert_eq!(strict.run().await.unwrap().kept, 2);
    }

    #[tokio::test]
    async fn test_timestamp_placeholder_in_output_path() {
        let temp_dir = TempDir::new().unwrap();
        let template = format!("{}/pe_{{timestamp}}.json", temp_dir.path().display());

        let mut engine = ScreenEngine::with_source(TestSettings::new(template), source());
        let summary = engine.run().await.unwrap();

        assert!(!summary.output_path.contains("{timestamp}"));
        assert!(std::path::Path::new(&summary.output_path).exists());
    }
}
