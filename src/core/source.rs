use crate::domain::model::StockRecord;
use crate::domain::ports::StockSource;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Fetches stocks with a single GET. No retry, no pagination.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl StockSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Vec<StockRecord>> {
        tracing::debug!("Making API request to: {}", location);
        let response = self.client.get(location).send().await?;

        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        // Decode separately so a bad body surfaces as a parse error, not a network one.
        let body = response.bytes().await?;
        tracing::debug!("API response body: {} bytes", body.len());

        let records: Vec<StockRecord> = serde_json::from_slice(&body)?;
        Ok(records)
    }
}
