//! Core types and client-side pipeline for the California Safe Swim map.
//!
//! Surface-water bacteria test sites are loaded from a static GeoJSON
//! `FeatureCollection`, narrowed by the user's region/status checkboxes and
//! handed to the map layer. This crate holds everything that does not touch
//! the rendering surface:
//!
//! - [`site`]: `Status`, `Region` and the typed `Site` view of a feature
//! - [`dataset`]: the immutable Dataset Store
//! - [`filter`]: the filter predicate applied to every feature
//! - [`selection`]: checkbox selection state with "select all" semantics
//! - [`popup`]: date formatting, longitude unwrapping and popup HTML
//! - [`convert`]: open-data records to GeoJSON (used by the CLI)
//!
//! # Usage
//!
//! ```rust
//! use swim_core::dataset::Dataset;
//! use swim_core::selection::{FilterSelection, Toggle};
//! use swim_core::site::Region;
//!
//! let dataset = Dataset::from_geojson_str(r#"{
//!     "type": "FeatureCollection",
//!     "features": [
//!         { "type": "Feature",
//!           "geometry": { "type": "Point", "coordinates": [-118.5, 34.0] },
//!           "properties": { "name": "Santa Monica Pier", "status": "safe", "region": "LA" } },
//!         { "type": "Feature",
//!           "geometry": { "type": "Point", "coordinates": [-117.9, 33.6] },
//!           "properties": { "name": "Newport Pier", "status": "unsafe", "region": "OC" } }
//!     ]
//! }"#).unwrap();
//!
//! let selection = FilterSelection::default().toggle_region(Toggle::One(Region::La), true);
//! let visible = dataset.filtered(&selection);
//! assert_eq!(visible.features.len(), 1);
//! ```

#[cfg(feature = "api")]
pub mod ckan;
pub mod convert;
pub mod dataset;
pub mod filter;
pub mod popup;
pub mod selection;
pub mod site;
