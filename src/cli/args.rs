use crate::models::{ClimateVariable, Month};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-explorer")]
#[command(about = "Explore per-country climate observations and extreme-event probabilities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Configuration file [default: climate-explorer.toml]")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Observation dataset, overrides the configuration")]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the loading spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary metrics and top/bottom country rankings
    Summary {
        #[arg(
            short,
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..),
            help = "Rows per ranking, overrides the configuration"
        )]
        top: Option<usize>,
    },

    /// Located values of a variable for one month
    Map {
        #[arg(short, long, value_parser = parse_month)]
        month: Month,

        #[arg(long, default_value = "precipitation")]
        variable: ClimateVariable,
    },

    /// Precipitation and temperature extremes of one country
    Country {
        #[arg(short = 'n', long)]
        country: String,
    },

    /// Probability of abundant rainfall and high temperature
    Probabilities {
        #[arg(short = 'n', long)]
        country: String,

        #[arg(short, long, value_parser = parse_month)]
        month: Month,

        #[arg(long, default_value = "false", help = "Print the result as JSON")]
        json: bool,
    },

    /// Countries and months available for selection
    Options,
}

fn parse_month(label: &str) -> Result<Month, String> {
    Month::parse_label(label).map_err(|e| e.to_string())
}
