//! Command implementations for the Safe Swim CLI.
//!
//! Provides subcommands for converting the CKAN bacteria results into the
//! map's GeoJSON dataset, checking a converted dataset for missing dates,
//! and running the map's region/status filters offline.

use clap::Subcommand;
use swim_core::convert::{DEFAULT_LIMIT, DEFAULT_OUTPUT, DEFAULT_RESOURCE_ID};

pub mod check;
pub mod convert;
pub mod query;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch bacteria results from data.ca.gov and write the map's GeoJSON dataset
    Convert {
        /// Output path for the GeoJSON FeatureCollection
        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Maximum number of datastore records to request
        #[arg(short = 'l', long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// CKAN resource id of the bacteria results table
        #[arg(long, default_value = DEFAULT_RESOURCE_ID)]
        resource_id: String,
    },

    /// Report how many features carry both sample and retrieval dates
    Check {
        /// Path to a GeoJSON FeatureCollection
        input: String,

        /// Number of features to print popup text for
        #[arg(short = 'n', long, default_value_t = check::DEFAULT_SAMPLES)]
        samples: usize,
    },

    /// Apply region and status filters to a dataset
    Filter {
        /// Path to a GeoJSON FeatureCollection
        input: String,

        /// Region to keep (LA, OC, or all); repeatable
        #[arg(short = 'r', long)]
        region: Vec<String>,

        /// Status to keep (safe, caution, unsafe, or all); repeatable
        #[arg(short = 's', long)]
        status: Vec<String>,

        /// Write the filtered FeatureCollection here
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Convert {
            output,
            limit,
            resource_id,
        } => {
            convert::run_convert(&output, limit, &resource_id).await
        }
        Command::Check { input, samples } => check::run_check(&input, samples),
        Command::Filter {
            input,
            region,
            status,
            output,
        } => {
            query::run_filter(&input, &region, &status, output.as_deref())
        }
    }
}
