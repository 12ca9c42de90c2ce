//! Offline run of the map's region/status filters.

use anyhow::Context;
use log::info;
use swim_core::convert;
use swim_core::dataset::Dataset;
use swim_core::selection::{FilterSelection, Toggle};
use swim_core::site::Site;

/// Build a selection by checking each named box, as a user clicking through
/// the filter panel would. `all` checks every member of its group.
pub fn selection_from_args(regions: &[String], statuses: &[String]) -> anyhow::Result<FilterSelection> {
    let mut selection = FilterSelection::default();
    for name in regions {
        let toggle = name
            .parse::<Toggle<_>>()
            .with_context(|| format!("invalid --region {:?}", name))?;
        selection = selection.toggle_region(toggle, true);
    }
    for name in statuses {
        let toggle = name
            .parse::<Toggle<_>>()
            .with_context(|| format!("invalid --status {:?}", name))?;
        selection = selection.toggle_status(toggle, true);
    }
    Ok(selection)
}

pub fn run_filter(
    input: &str,
    regions: &[String],
    statuses: &[String],
    output: Option<&str>,
) -> anyhow::Result<()> {
    let selection = selection_from_args(regions, statuses)?;
    let dataset = Dataset::from_path(input)?;
    let filtered = dataset.filtered(&selection);

    info!(
        "{} of {} features match regions {:?} and statuses {:?}",
        filtered.features.len(),
        dataset.len(),
        selection.regions,
        selection.statuses
    );

    for feature in &filtered.features {
        let site = Site::from_feature(feature);
        println!("{}\t{}", site.display_name(), site.display_status());
    }

    if let Some(path) = output {
        let json = convert::to_pretty_json(&filtered)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path))?;
        info!("Filtered GeoJSON saved to {}", path);
    }

    Ok(())
}
