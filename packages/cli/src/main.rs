#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the collaboratory activity map.
//!
//! Loads the county boundaries and the activities export described by the
//! map config, then lists filter choices, evaluates a filter selection, or
//! prints the region list and initial map view.

mod config;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use collab_map_activity_models::{ActivityField, FilterSelection};
use collab_map_engine::ActivityMap;

use crate::config::MapConfig;
use crate::output::EvaluationReport;

#[derive(Parser)]
#[command(name = "collab_map", about = "Collaboratory activity map")]
struct Cli {
    /// Map config file (defaults to the embedded config)
    #[arg(long, global = true, env = "COLLAB_MAP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the filter choices for a field
    Values {
        /// `faculty_partners`, `focus_cleaned`, `activity_name`, or
        /// `campus_partners`
        field: ActivityField,
    },
    /// Filter activities and tally them by county
    Evaluate {
        /// Faculty partner to require ("All" for any)
        #[arg(long)]
        faculty: Option<String>,
        /// Focus area to require; repeat to require several
        #[arg(long = "focus")]
        focus: Vec<String>,
        /// Exact activity name ("All" for any)
        #[arg(long)]
        activity: Option<String>,
        /// Campus partner to require ("All" for any)
        #[arg(long)]
        campus: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List regions in tie-break order with their label anchors
    Regions,
    /// Print the initial map view fitted to the boundary
    View,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Geojson,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = MapConfig::load(cli.config.as_deref())?;
    log::info!(
        "Boundaries: {} ({})",
        config.boundaries.path.display(),
        config.boundaries.describe_filter()
    );

    let map = ActivityMap::load(&config.boundaries, &config.records)?;

    match cli.command {
        Commands::Values { field } => {
            print!(
                "{}",
                output::choice_list(field.label(), map.categorical_index().choices(field))
            );
        }
        Commands::Evaluate {
            faculty,
            focus,
            activity,
            campus,
            format,
        } => {
            let selection = FilterSelection::all()
                .with_faculty(faculty.as_deref().unwrap_or_default())
                .with_activity_name(activity.as_deref().unwrap_or_default())
                .with_campus_partner(campus.as_deref().unwrap_or_default())
                .with_focus_areas(focus.iter().map(String::as_str));

            let evaluation = map.evaluate(&selection);

            match format {
                OutputFormat::Table => print!("{}", output::tally_table(&evaluation)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&EvaluationReport::new(&selection, &evaluation))?
                ),
                OutputFormat::Geojson => println!(
                    "{}",
                    serde_json::to_string_pretty(&evaluation.to_feature_collection())?
                ),
            }
        }
        Commands::Regions => {
            for (i, region) in map.boundaries().regions().iter().enumerate() {
                match region.label_anchor() {
                    Some((lat, lon)) => {
                        println!("{:>3}  {}  ({lat:.5}, {lon:.5})", i + 1, region.id());
                    }
                    None => println!("{:>3}  {}", i + 1, region.id()),
                }
            }
        }
        Commands::View => {
            let view = map.view().ok_or("Boundary has no extent")?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
