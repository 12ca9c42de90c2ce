//! HTTP access to the data.ca.gov CKAN datastore.

use crate::convert;
use anyhow::Context;
use geojson::JsonObject;
use log::info;
use reqwest::Client;

/// Fetch up to `limit` records of `resource_id` from `datastore_search`.
pub async fn fetch_records(
    client: &Client,
    resource_id: &str,
    limit: u32,
) -> anyhow::Result<Vec<JsonObject>> {
    let url = convert::datastore_url(resource_id, limit);
    info!("Fetching {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    if !response.status().is_success() {
        anyhow::bail!("bad response status from {}: {}", url, response.status());
    }

    let body = response
        .text()
        .await
        .context("failed to read datastore response body")?;
    let records = convert::parse_response(&body)?;
    info!("Received {} records", records.len());
    Ok(records)
}
