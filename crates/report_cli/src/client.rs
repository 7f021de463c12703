use contracts::dashboards::d400_lead_report::source::classify_response;
use contracts::dashboards::d400_lead_report::{LeadRecord, LoadError};

/// HTTP client for the lead sheet endpoint
pub struct LeadSourceClient {
    client: reqwest::Client,
    url: String,
}

impl LeadSourceClient {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the full dataset. One attempt, no timeout, no retries.
    pub async fn fetch_leads(&self) -> Result<Vec<LeadRecord>, LoadError> {
        tracing::debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(format!("Failed to read response: {}", e)))?;

        classify_response(status.is_success(), &status.to_string(), &body).inspect_err(|_| {
            if !body.is_empty() {
                tracing::error!("Server Response: {}", body);
            }
        })
    }
}
