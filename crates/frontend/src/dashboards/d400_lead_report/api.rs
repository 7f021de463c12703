use contracts::dashboards::d400_lead_report::source::classify_response;
use contracts::dashboards::d400_lead_report::{LeadRecord, LoadError};
use gloo_net::http::Request;

/// Fetch the full lead sheet from the data source.
///
/// Only a rejected request (or an empty failure reply) is `LoadError::Network`; any body
/// that arrives is classified by `classify_response` and logged in full when rejected.
pub async fn fetch_leads(url: &str) -> Result<Vec<LeadRecord>, LoadError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(format!("Request failed: {}", e)))?;

    let success = response.ok();
    let status = format!("{} {}", response.status(), response.status_text());

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(format!("Failed to read response: {}", e)))?;

    classify_response(success, status.trim(), &body).inspect_err(|_| {
        if !body.is_empty() {
            log::error!("Server Response: {}", body);
        }
    })
}
