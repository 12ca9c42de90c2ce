use geojson::{Feature, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display name used when a feature has no `name` property.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Placeholder for any missing or unparseable display value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Map color for features whose status is missing or unrecognized.
pub const FALLBACK_COLOR: &str = "gray";

/// Swim safety classification of a test site.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Caution,
    Unsafe,
}

impl Status {
    /// Every status, in checkbox order.
    pub const ALL: [Status; 3] = [Status::Safe, Status::Caution, Status::Unsafe];

    /// Wire value stored in the `status` property.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Caution => "caution",
            Status::Unsafe => "unsafe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Safe => "Safe",
            Status::Caution => "Caution",
            Status::Unsafe => "Unsafe",
        }
    }

    /// Circle color on the map and swatch color in the legend.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Safe => "green",
            Status::Caution => "yellow",
            Status::Unsafe => "red",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Status::Safe => "Water quality within acceptable limits for swimming",
            Status::Caution => "Potential concerns with water quality",
            Status::Unsafe => "Swimming not recommended",
        }
    }

    /// Color for a raw `status` property value, gray when it is not a known status.
    pub fn color_for(raw: Option<&str>) -> &'static str {
        raw.and_then(|s| s.parse::<Status>().ok())
            .map(|s| s.color())
            .unwrap_or(FALLBACK_COLOR)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    /// Matching is exact: the filter compares raw property strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(Status::Safe),
            "caution" => Ok(Status::Caution),
            "unsafe" => Ok(Status::Unsafe),
            other => Err(anyhow::anyhow!("unknown status: {:?}", other)),
        }
    }
}

/// Geographic grouping of a test site.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "LA")]
    La,
    #[serde(rename = "OC")]
    Oc,
}

impl Region {
    /// Every region, in checkbox order.
    pub const ALL: [Region; 2] = [Region::La, Region::Oc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::La => "LA",
            Region::Oc => "OC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::La => "Los Angeles",
            Region::Oc => "Orange County",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LA" => Ok(Region::La),
            "OC" => Ok(Region::Oc),
            other => Err(anyhow::anyhow!("unknown region: {:?}", other)),
        }
    }
}

/// Typed, lenient view over a feature's `properties` object.
///
/// Every field is optional. Values of the wrong JSON type are treated as
/// absent instead of failing the whole record; `status` and `region` keep
/// their raw strings so unknown values still display as-is.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Site {
    pub name: Option<String>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub ph: Option<f64>,
    pub sample_date: Option<String>,
    pub data_retrieval_date: Option<String>,
}

impl Site {
    pub fn from_feature(feature: &Feature) -> Site {
        Site::from_properties(feature.properties.as_ref())
    }

    pub fn from_properties(properties: Option<&JsonObject>) -> Site {
        let Some(props) = properties else {
            return Site::default();
        };
        Site {
            name: string_property(props, "name"),
            status: string_property(props, "status"),
            region: string_property(props, "region"),
            ph: number_property(props, "ph"),
            sample_date: string_property(props, "sampleDate"),
            data_retrieval_date: string_property(props, "dataRetrievalDate"),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_LOCATION)
    }

    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Parsed status, `None` for absent or unrecognized values.
    pub fn status(&self) -> Option<Status> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn region(&self) -> Option<Region> {
        self.region.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn color(&self) -> &'static str {
        Status::color_for(self.status.as_deref())
    }
}

/// A non-empty string property. Numbers are rendered as text.
fn string_property(props: &JsonObject, key: &str) -> Option<String> {
    match props.get(key)? {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A finite numeric property; numeric strings are accepted.
fn number_property(props: &JsonObject, key: &str) -> Option<f64> {
    let value = match props.get(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// `(longitude, latitude)` of a Point feature; `None` for any other geometry.
pub fn point_coordinates(feature: &Feature) -> Option<(f64, f64)> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(position) if position.len() >= 2 => Some((position[0], position[1])),
        _ => None,
    }
}
