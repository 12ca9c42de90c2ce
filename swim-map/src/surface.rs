//! Rendering surface contract and the fixed rendering configuration.

use crate::interaction::Activation;
use geojson::{FeatureCollection, JsonValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use swim_core::popup::Popup;
use swim_core::site::{Status, FALLBACK_COLOR};

/// Name of the GeoJSON source holding the filtered sites.
pub const SOURCE_ID: &str = "swim-locations";
/// Name of the circle layer drawing the sites.
pub const LAYER_ID: &str = "swim-points";

pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/streets-v11";
/// Initial center, roughly between Los Angeles and Orange County.
pub const DEFAULT_CENTER: [f64; 2] = [-118.2, 33.9];
pub const DEFAULT_ZOOM: f64 = 9.0;

pub const CIRCLE_RADIUS: f64 = 10.0;
pub const CIRCLE_STROKE_WIDTH: f64 = 3.0;
pub const CIRCLE_STROKE_COLOR: &str = "rgba(0, 0, 0, 0.2)";

/// Everything needed to construct a surface. The access token travels here
/// rather than through any global setting of the mapping library.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceConfig {
    pub access_token: String,
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
}

impl SurfaceConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            style: DEFAULT_STYLE_URL.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Mapbox layer definition for the sites: one circle per site, colored by
/// its `status` property with gray for anything unrecognized.
pub fn circle_layer() -> JsonValue {
    let mut color_match = vec![json!("match"), json!(["get", "status"])];
    for status in Status::ALL {
        color_match.push(json!(status.as_str()));
        color_match.push(json!(status.color()));
    }
    color_match.push(json!(FALLBACK_COLOR));

    json!({
        "id": LAYER_ID,
        "type": "circle",
        "source": SOURCE_ID,
        "paint": {
            "circle-radius": CIRCLE_RADIUS,
            "circle-color": color_match,
            "circle-stroke-width": CIRCLE_STROKE_WIDTH,
            "circle-stroke-color": CIRCLE_STROKE_COLOR,
        }
    })
}

/// Events a surface reports back to its owner.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// The map finished its initial load.
    Load,
    /// One-shot style-loaded signal armed by [`MapSurface::once_style_load`].
    StyleLoad,
    Error { message: String },
    /// A click landed on the site layer.
    PointActivated(Activation),
}

/// Operations the adapter needs from a rendering surface.
///
/// Implementations report asynchronous happenings (load, style load, errors,
/// clicks) as [`SurfaceEvent`]s to whoever owns the adapter.
pub trait MapSurface {
    fn is_style_loaded(&self) -> bool;

    /// Arrange for a single [`SurfaceEvent::StyleLoad`] the next time the
    /// style finishes loading.
    fn once_style_load(&mut self);

    fn has_source(&self, source_id: &str) -> bool;

    fn add_source(&mut self, source_id: &str, data: &FeatureCollection);

    /// Swap the data payload of an existing source in place.
    fn set_source_data(&mut self, source_id: &str, data: &FeatureCollection);

    fn has_layer(&self, layer_id: &str) -> bool;

    fn add_layer(&mut self, layer: &JsonValue);

    /// Start reporting clicks on `layer_id` as [`SurfaceEvent::PointActivated`].
    fn on_click(&mut self, layer_id: &str);

    fn off_click(&mut self, layer_id: &str);

    fn show_popup(&mut self, popup: &Popup);

    /// Tear the surface down. Nothing may be called afterwards.
    fn remove(&mut self);
}
