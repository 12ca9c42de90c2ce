use crate::filter;
use crate::selection::FilterSelection;
use anyhow::Context;
use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, warn};

/// The static collection of test sites, immutable once loaded.
///
/// Filtering always produces a new `FeatureCollection`; the loaded features
/// are never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    collection: FeatureCollection,
}

impl Dataset {
    /// Parse a GeoJSON document that must be a `FeatureCollection`.
    pub fn from_geojson_str(text: &str) -> anyhow::Result<Dataset> {
        let geojson: GeoJson = text.parse().context("dataset is not valid GeoJSON")?;
        let collection =
            FeatureCollection::try_from(geojson).context("dataset is not a FeatureCollection")?;
        debug!("Loaded {} features", collection.features.len());
        Ok(Dataset { collection })
    }

    pub fn from_path(path: &str) -> anyhow::Result<Dataset> {
        let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        Dataset::from_geojson_str(&text).with_context(|| format!("failed to parse {}", path))
    }

    pub fn from_collection(collection: FeatureCollection) -> Dataset {
        Dataset { collection }
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }

    /// The features visible under `selection`, as a new collection that keeps
    /// the original's bbox and foreign members.
    pub fn filtered(&self, selection: &FilterSelection) -> FeatureCollection {
        let features = filter::apply(&self.collection.features, selection);
        if features.is_empty() {
            warn!("No features match the applied filters.");
        }
        FeatureCollection {
            bbox: self.collection.bbox.clone(),
            features,
            foreign_members: self.collection.foreign_members.clone(),
        }
    }
}
