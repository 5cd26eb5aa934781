use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::{
    config::ScraperConfig,
    metrics::{FetchMetrics, MetricsCollector},
    rate_limit::RequestGate,
    tables::PageTables,
};

/// Anything that can turn a URL into the tables on that page.
pub trait PageSource {
    fn fetch_tables(&mut self, url: &str) -> Result<PageTables>;
}

pub struct HttpPageSource {
    client: reqwest::blocking::Client,
    gate: RequestGate,
    metrics: MetricsCollector,
}

impl HttpPageSource {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            gate: RequestGate::from_config(&config.rate_limits)?,
            metrics: MetricsCollector::new(),
        })
    }

    pub fn metrics(&self) -> FetchMetrics {
        self.metrics.get_metrics()
    }

    fn fetch_html(&mut self, url: &str) -> Result<String> {
        let waited = self.gate.acquire();
        self.metrics.record_rate_limit_wait(waited);

        info!("Fetching {}", url);
        let tracker = self.metrics.record_request_start();
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
        }

        let html = response
            .text()
            .with_context(|| format!("Failed to read body of {}", url))?;
        self.metrics.record_request(tracker);
        info!("Downloaded {} bytes from {}", html.len(), url);
        Ok(html)
    }
}

impl PageSource for HttpPageSource {
    fn fetch_tables(&mut self, url: &str) -> Result<PageTables> {
        let html = self.fetch_html(url)?;
        PageTables::from_html(&html).with_context(|| format!("Failed to parse tables from {}", url))
    }
}
