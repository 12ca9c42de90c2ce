//! Surface Water - Indicator Bacteria Results Map
//!
//! Shows California surface-water bacteria test sites on a Mapbox map,
//! colored by swim safety status, with checkbox filters for region and status.
//!
//! Data flow:
//! 1. `FilterPanel` emits the full `{ region, status }` selection on every
//!    checkbox change and it is stored in `AppState::selection`.
//! 2. Each selection change refetches the static GeoJSON file and filters it
//!    into `AppState::sites`. A failed fetch is logged and leaves the previous
//!    sites in place. Results of a load superseded by a newer selection are
//!    dropped.
//! 3. `MapView` re-binds the map's site source whenever `AppState::sites`
//!    changes; clicking a site opens its detail popup.

use dioxus::prelude::*;
use geojson::FeatureCollection;
use swim_core::dataset::Dataset;
use swim_core::selection::FilterSelection;
use swim_map::surface::SurfaceConfig;
use swim_map_ui::components::{ErrorDisplay, FilterPanel, LoadingSpinner, MapView, StatusLegend};
use swim_map_ui::js_bridge;
use swim_map_ui::state::AppState;

/// Static dataset produced by `swim-cli convert`, served alongside the WASM.
const DATASET_URL: &str = "./data/californiaGeoData.json";

/// DOM id for the Mapbox container div.
const MAP_CONTAINER_ID: &str = "safe-swim-map";

/// Mapbox access token, supplied at build time.
const MAPBOX_TOKEN: &str = match option_env!("MAPBOX_TOKEN") {
    Some(token) => token,
    None => "",
};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("safe-swim-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Refetch and filter the dataset whenever the selection changes
    use_effect(move || {
        let selection = (state.selection)();
        log::debug!("Filters applied: {:?}", selection);
        let ticket = state.loads.write().begin();

        spawn(async move {
            let result = load_sites(&selection).await;
            if !state.loads.peek().is_latest(ticket) {
                log::debug!("Discarding sites for superseded filters: {:?}", selection);
                return;
            }
            match result {
                Ok(sites) => {
                    state.sites.set(Some(sites));
                    state.error_msg.set(None);
                }
                Err(e) => {
                    log::error!("Error loading GeoJSON data: {:#}", e);
                    if state.sites.peek().is_none() {
                        state.error_msg.set(Some(format!("{:#}", e)));
                    }
                }
            }
            state.loading.set(false);
        });
    });

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 0 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            div {
                style: "margin: 16px 0; padding: 16px; border-radius: 4px; box-shadow: 0 3px 3px -2px rgba(0,0,0,0.2), 0 3px 4px 0 rgba(0,0,0,0.14), 0 1px 8px 0 rgba(0,0,0,0.12);",
                FilterPanel {
                    on_filter_change: move |selection: FilterSelection| state.selection.set(selection),
                }
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay {
                    message: "Failed to load test sites",
                    detail: err,
                }
            } else if (state.loading)() {
                LoadingSpinner {}
            }

            MapView {
                id: MAP_CONTAINER_ID.to_string(),
                config: SurfaceConfig::new(MAPBOX_TOKEN),
            }

            StatusLegend {}
        }
    }
}

/// Fetch the static dataset and keep the sites visible under `selection`.
async fn load_sites(selection: &FilterSelection) -> anyhow::Result<FeatureCollection> {
    let text = js_bridge::fetch_text(DATASET_URL).await?;
    let dataset = Dataset::from_geojson_str(&text)?;
    let sites = dataset.filtered(selection);
    log::info!(
        "Showing {} of {} test sites",
        sites.features.len(),
        dataset.len()
    );
    Ok(sites)
}
