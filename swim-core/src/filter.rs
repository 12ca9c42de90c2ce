//! Filter predicate applied to every feature on each load or selection change.
//!
//! An empty selected set means "no restriction". A feature whose `region` or
//! `status` is absent or unrecognized never matches a specific value, but
//! always passes when that dimension is unrestricted.

use crate::selection::FilterSelection;
use geojson::{Feature, JsonValue};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Whether a feature is visible under `selection`.
pub fn matches(feature: &Feature, selection: &FilterSelection) -> bool {
    region_matches(feature, selection) && status_matches(feature, selection)
}

pub fn region_matches(feature: &Feature, selection: &FilterSelection) -> bool {
    member_of(raw_property(feature, "region"), &selection.regions)
}

pub fn status_matches(feature: &Feature, selection: &FilterSelection) -> bool {
    member_of(raw_property(feature, "status"), &selection.statuses)
}

/// Copy of the matching features, in input order. The input is untouched.
pub fn apply(features: &[Feature], selection: &FilterSelection) -> Vec<Feature> {
    features
        .iter()
        .filter(|feature| matches(feature, selection))
        .cloned()
        .collect()
}

fn raw_property<'a>(feature: &'a Feature, key: &str) -> &'a str {
    feature
        .property(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
}

fn member_of<T: FromStr + Ord>(raw: &str, selected: &BTreeSet<T>) -> bool {
    selected.is_empty() || raw.parse::<T>().is_ok_and(|value| selected.contains(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Toggle;
    use crate::site::{Region, Status};
    use geojson::{Geometry, JsonObject, Value};
    use serde_json::json;

    fn feature(properties: JsonValue) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![-118.2, 33.9]))),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    fn sample() -> Vec<Feature> {
        vec![
            feature(json!({ "name": "A", "status": "safe", "region": "LA" })),
            feature(json!({ "name": "B", "status": "unsafe", "region": "OC" })),
            feature(json!({ "name": "C", "status": "caution" })),
            feature(json!({ "name": "D", "status": "murky", "region": "SD" })),
            Feature {
                properties: Some(JsonObject::new()),
                ..feature(json!({}))
            },
        ]
    }

    fn names(features: &[Feature]) -> Vec<&str> {
        features
            .iter()
            .map(|f| f.property("name").and_then(JsonValue::as_str).unwrap_or("?"))
            .collect()
    }

    #[test]
    fn test_empty_selection_keeps_everything() {
        let features = sample();
        let filtered = apply(&features, &FilterSelection::default());
        assert_eq!(filtered, features);
    }

    #[test]
    fn test_region_only_selection() {
        let selection = FilterSelection::default().toggle_region(Toggle::One(Region::La), true);
        for f in sample() {
            let is_la = f.property("region").and_then(JsonValue::as_str) == Some("LA");
            assert_eq!(matches(&f, &selection), is_la);
        }
    }

    #[test]
    fn test_unknown_values_only_match_unrestricted_dimension() {
        let features = sample();
        let by_status = FilterSelection::default().toggle_status(Toggle::All, true);
        assert_eq!(names(&apply(&features, &by_status)), vec!["A", "B", "C"]);

        let by_region = FilterSelection::default().toggle_region(Toggle::All, true);
        assert_eq!(names(&apply(&features, &by_region)), vec!["A", "B"]);
    }

    #[test]
    fn test_region_and_status_combine() {
        let features = vec![
            feature(json!({ "status": "safe", "region": "LA" })),
            feature(json!({ "status": "unsafe", "region": "OC" })),
            feature(json!({ "status": "caution" })),
        ];
        let selection = FilterSelection::default()
            .toggle_region(Toggle::One(Region::La), true)
            .toggle_status(Toggle::One(Status::Safe), true)
            .toggle_status(Toggle::One(Status::Caution), true);
        let filtered = apply(&features, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0], features[0]);
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let features = sample();
        let before = features.clone();
        let selection = FilterSelection::default().toggle_status(Toggle::One(Status::Unsafe), true);
        let filtered = apply(&features, &selection);
        assert_eq!(names(&filtered), vec!["B"]);
        assert_eq!(features, before);
    }
}
