use std::fmt;

use anyhow::Result;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::ApiSettings;

/// The four data categories the upstream report API serves per property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    History,
    Summary,
    Schools,
    Ethnicity,
}

impl Category {
    pub fn path(self) -> &'static str {
        match self {
            Category::History => "/property/history",
            Category::Summary => "/property/summary",
            Category::Schools => "/property/schools",
            Category::Ethnicity => "/property/ethnicity",
        }
    }

    /// Empty envelope substituted when a fetch for this category fails.
    /// Summary is a flat object upstream; the rest wrap a `results` list.
    pub fn fallback(self) -> Value {
        match self {
            Category::Summary => json!({}),
            _ => json!({ "results": [] }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::History => "history",
            Category::Summary => "summary",
            Category::Schools => "schools",
            Category::Ethnicity => "ethnicity",
        };
        f.write_str(name)
    }
}

/// GETs one category for a property. Errors on network failure, non-2xx
/// status, or a body that is not valid JSON.
pub async fn fetch_category(
    client: &Client,
    api: &ApiSettings,
    category: Category,
    property_id: &str,
) -> Result<Value> {
    let url = format!("{}{}", api.base_url, category.path());
    log::debug!("Fetching {} for {} from {}", category, property_id, url);

    let response = client
        .get(&url)
        .query(&[("id", property_id)])
        .bearer_auth(&api.token)
        .send()
        .await?;
    response.error_for_status_ref()?;

    let body = response.json::<Value>().await?;
    log::debug!("Fetched {} for {}", category, property_id);
    Ok(body)
}

/// Like [`fetch_category`], but a failure degrades to the category's empty
/// fallback so one upstream outage never breaks the whole dashboard. The
/// cause is logged since nothing downstream will surface it.
pub async fn fetch_with_fallback(
    client: &Client,
    api: &ApiSettings,
    category: Category,
    property_id: &str,
) -> Value {
    match fetch_category(client, api, category, property_id).await {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to fetch {} for {}: {}", category, property_id, e);
            category.fallback()
        }
    }
}
