//! Build the map's GeoJSON dataset from the CKAN datastore.

use anyhow::Context;
use chrono::Local;
use log::info;
use swim_core::{ckan, convert};

/// Fetch up to `limit` records of `resource_id`, convert them to point
/// features and write a pretty-printed FeatureCollection to `output`.
///
/// Records without usable coordinates are dropped. Every feature is stamped
/// with today's date as its `dataRetrievalDate`.
pub async fn run_convert(output: &str, limit: u32, resource_id: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let records = ckan::fetch_records(&client, resource_id, limit).await?;
    let retrieved = Local::now().naive_local().date();
    let collection = convert::records_to_collection(&records, retrieved);

    info!(
        "Converted {} of {} records (retrieved {})",
        collection.features.len(),
        records.len(),
        retrieved
    );

    let json = convert::to_pretty_json(&collection)?;
    std::fs::write(output, json).with_context(|| format!("failed to write {}", output))?;

    info!("GeoJSON data saved to {}", output);
    Ok(())
}
