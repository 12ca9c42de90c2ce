//! Click-to-popup handling for the site layer.

use geojson::Feature;
use serde::Deserialize;
use swim_core::popup::{popup_html, unwrap_longitude, LngLat, Popup};
use swim_core::site::{point_coordinates, Site};

/// A click on the rendered site layer: where it landed and which features
/// were under the pointer, topmost first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub lng_lat: LngLat,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Popup for the first feature under the click, anchored at the copy of the
/// site nearest the click. `None` when nothing usable was hit.
pub fn popup_for(activation: &Activation) -> Option<Popup> {
    let feature = activation.features.first()?;
    let (lng, lat) = point_coordinates(feature)?;
    let site = Site::from_feature(feature);
    Some(Popup {
        lng_lat: LngLat {
            lng: unwrap_longitude(lng, activation.lng_lat.lng),
            lat,
        },
        html: popup_html(&site),
    })
}
