//! Popup content for an activated test site.

use crate::site::{Site, NOT_AVAILABLE};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A geographic position in WGS84 degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// A detail popup anchored at a map position.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub lng_lat: LngLat,
    pub html: String,
}

/// Move `anchor_lng` by whole turns until it lies within 180° of
/// `activation_lng`, so the popup opens on the copy of the world that was
/// clicked.
pub fn unwrap_longitude(anchor_lng: f64, activation_lng: f64) -> f64 {
    if !anchor_lng.is_finite() || !activation_lng.is_finite() {
        return anchor_lng;
    }
    let mut lng = anchor_lng;
    while (activation_lng - lng).abs() > 180.0 {
        lng += if activation_lng > lng { 360.0 } else { -360.0 };
    }
    lng
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}

/// Short "Mon D, YYYY" form of a date-like string, or "N/A".
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_ph(ph: Option<f64>) -> String {
    ph.map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Names and statuses come from the open-data feed and are inserted into
/// popup markup, so they must not be able to inject HTML.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML fragment shown in a site's popup.
pub fn popup_html(site: &Site) -> String {
    format!(
        "<div>\n  <strong>{}</strong><br>\n  Status: {}<br>\n  pH Level: {}<br>\n  Sample Date: {}<br>\n  <small style=\"color: #666;\">Data Retrieved: {}</small>\n</div>",
        escape_html(site.display_name()),
        escape_html(site.display_status()),
        format_ph(site.ph),
        format_date(site.sample_date.as_deref()),
        format_date(site.data_retrieval_date.as_deref()),
    )
}

/// Plain-text version of the popup, used by the CLI report.
pub fn popup_text(site: &Site) -> String {
    format!(
        "Location: {}\nStatus: {}\npH Level: {}\nSample Date: {}\nData Retrieved: {}",
        site.display_name(),
        site.display_status(),
        format_ph(site.ph),
        format_date(site.sample_date.as_deref()),
        format_date(site.data_retrieval_date.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::UNKNOWN_LOCATION;

    #[test]
    fn test_unwrap_longitude_across_antimeridian() {
        assert_eq!(unwrap_longitude(170.0, -170.0), -190.0);
        assert_eq!(unwrap_longitude(-170.0, 170.0), 190.0);
    }

    #[test]
    fn test_unwrap_longitude_multiple_turns() {
        let lng = unwrap_longitude(-118.2, 600.0);
        assert!((lng - 601.8).abs() < 1e-9);
        assert!((600.0 - lng).abs() <= 180.0);
    }

    #[test]
    fn test_unwrap_longitude_nearby_is_unchanged() {
        assert_eq!(unwrap_longitude(-118.2, -118.0), -118.2);
        assert_eq!(unwrap_longitude(10.0, -170.0), 10.0);
    }

    #[test]
    fn test_unwrap_longitude_ignores_non_finite() {
        assert_eq!(unwrap_longitude(-118.2, f64::INFINITY), -118.2);
        assert!(unwrap_longitude(f64::NAN, 0.0).is_nan());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("not-a-date")), "N/A");
        assert_eq!(format_date(Some("2024-01-05")), "Jan 5, 2024");
        assert_eq!(format_date(Some("2023-11-20T00:00:00")), "Nov 20, 2023");
        assert_eq!(format_date(Some("2023-11-20T08:30:00Z")), "Nov 20, 2023");
        assert_eq!(format_date(Some("07/04/2022")), "Jul 4, 2022");
    }

    #[test]
    fn test_format_ph() {
        assert_eq!(format_ph(Some(7.5)), "7.5");
        assert_eq!(format_ph(Some(8.0)), "8");
        assert_eq!(format_ph(None), "N/A");
    }

    #[test]
    fn test_popup_html_full_site() {
        let site = Site {
            name: Some("Mothers Beach".to_string()),
            status: Some("safe".to_string()),
            region: Some("LA".to_string()),
            ph: Some(7.2),
            sample_date: Some("2024-01-05".to_string()),
            data_retrieval_date: Some("2024-02-10".to_string()),
        };
        let html = popup_html(&site);
        assert!(html.starts_with("<div>"));
        assert!(html.contains("<strong>Mothers Beach</strong>"));
        assert!(html.contains("Status: safe<br>"));
        assert!(html.contains("pH Level: 7.2<br>"));
        assert!(html.contains("Sample Date: Jan 5, 2024<br>"));
        assert!(html.contains("<small style=\"color: #666;\">Data Retrieved: Feb 10, 2024</small>"));
    }

    #[test]
    fn test_popup_html_defaults() {
        let html = popup_html(&Site::default());
        assert!(html.contains(&format!("<strong>{}</strong>", UNKNOWN_LOCATION)));
        assert!(html.contains("Status: N/A"));
        assert!(html.contains("pH Level: N/A"));
        assert!(html.contains("Sample Date: N/A"));
        assert!(html.contains("Data Retrieved: N/A"));
    }

    #[test]
    fn test_popup_html_escapes_markup() {
        let site = Site {
            name: Some("<b>Pier & Jetty</b>".to_string()),
            status: Some("<img src=x>".to_string()),
            ..Site::default()
        };
        let html = popup_html(&site);
        assert!(html.contains("&lt;b&gt;Pier &amp; Jetty&lt;/b&gt;"));
        assert!(html.contains("Status: &lt;img src=x&gt;"));
        assert!(!html.contains("<img"));
    }
}
