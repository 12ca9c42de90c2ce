//! Date coverage report for a converted dataset.

use geojson::Feature;
use swim_core::dataset::Dataset;
use swim_core::popup;
use swim_core::site::Site;

/// Features whose popup text is printed by default.
pub const DEFAULT_SAMPLES: usize = 3;

/// A feature lacking at least one of its dates.
#[derive(Debug, PartialEq)]
pub struct MissingDates {
    pub index: usize,
    pub name: String,
    pub sample_date: bool,
    pub data_retrieval_date: bool,
}

#[derive(Debug, PartialEq)]
pub struct CheckReport {
    pub total: usize,
    pub with_both_dates: usize,
    pub missing: Vec<MissingDates>,
}

impl CheckReport {
    pub fn from_features(features: &[Feature]) -> CheckReport {
        let mut with_both_dates = 0;
        let mut missing = Vec::new();

        for (index, feature) in features.iter().enumerate() {
            let site = Site::from_feature(feature);
            let sample_date = site.sample_date.is_some();
            let data_retrieval_date = site.data_retrieval_date.is_some();
            if sample_date && data_retrieval_date {
                with_both_dates += 1;
            } else {
                missing.push(MissingDates {
                    index,
                    name: site.display_name().to_string(),
                    sample_date,
                    data_retrieval_date,
                });
            }
        }

        CheckReport {
            total: features.len(),
            with_both_dates,
            missing,
        }
    }

    /// Share of features with both dates, as a one-decimal percentage.
    pub fn success_rate(&self) -> String {
        if self.total == 0 {
            return "0.0%".to_string();
        }
        let rate = self.with_both_dates as f64 / self.total as f64 * 100.0;
        format!("{:.1}%", rate)
    }
}

pub fn run_check(input: &str, samples: usize) -> anyhow::Result<()> {
    let dataset = Dataset::from_path(input)?;
    let report = CheckReport::from_features(dataset.features());

    println!("Total features: {}", report.total);
    println!("Features with both dates: {}", report.with_both_dates);
    println!("Success rate: {}", report.success_rate());

    for (i, feature) in dataset.features().iter().take(samples).enumerate() {
        println!("\n--- Feature {} ---", i + 1);
        println!("{}", popup::popup_text(&Site::from_feature(feature)));
    }

    if !report.missing.is_empty() {
        println!("\nFeatures missing dates:");
        for entry in &report.missing {
            let mut absent = Vec::new();
            if !entry.sample_date {
                absent.push("sampleDate");
            }
            if !entry.data_retrieval_date {
                absent.push("dataRetrievalDate");
            }
            println!("  #{} {}: missing {}", entry.index, entry.name, absent.join(", "));
        }
    }

    Ok(())
}
