use reqwest::Client;
use serde_json::Value;

use crate::config::ApiSettings;
use crate::property_client::{Category, fetch_with_fallback};

/// The four category envelopes for one property, as fetched from upstream
/// or substituted with an empty fallback.
#[derive(Debug)]
pub struct PropertyData {
    pub history: Value,
    pub summary: Value,
    pub schools: Value,
    pub ethnicity: Value,
}

/// Fetches all four categories concurrently and joins on all of them.
///
/// The workload is fixed at four independent requests, so a plain 4-way
/// join covers the fan-out; a failing fetch resolves to its fallback
/// without cancelling its siblings.
pub async fn fetch_all(client: &Client, api: &ApiSettings, property_id: &str) -> PropertyData {
    let (history, summary, schools, ethnicity) = tokio::join!(
        fetch_with_fallback(client, api, Category::History, property_id),
        fetch_with_fallback(client, api, Category::Summary, property_id),
        fetch_with_fallback(client, api, Category::Schools, property_id),
        fetch_with_fallback(client, api, Category::Ethnicity, property_id),
    );

    PropertyData {
        history,
        summary,
        schools,
        ethnicity,
    }
}

/// Pulls the `results` list out of a category envelope. Absent or
/// non-array `results` yields an empty list.
pub fn results_list(envelope: &Value) -> Vec<Value> {
    envelope
        .get("results")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
