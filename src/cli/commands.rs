use crate::analyzers::RankOrder;
use crate::cli::args::{Cli, Commands};
use crate::config::DashboardConfig;
use crate::dashboard::ClimateDashboard;
use crate::models::{ClimateVariable, Observation, Phenomenon};
use crate::processors::EstimationResult;
use crate::utils::progress::ProgressReporter;
use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = DashboardConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config = config.with_dataset_path(data);
    }
    if let Commands::Summary { top: Some(top) } = cli.command {
        config = config.with_top_n(top);
    }
    config
        .check()
        .context("Invalid configuration after command-line overrides")?;

    let progress = ProgressReporter::new_spinner("Loading...", cli.quiet);
    let dashboard = ClimateDashboard::load(&config, Some(&progress))
        .await
        .with_context(|| {
            format!(
                "Failed to load dashboard from {}",
                config.dataset.path.display()
            )
        })?;

    match cli.command {
        Commands::Summary { .. } => print_summary(&dashboard),

        Commands::Map { month, variable } => {
            let points = dashboard.map_points(month, variable);
            if points.is_empty() {
                println!("⚠️  No data available for {}", month);
                return Ok(());
            }

            println!("{} in {} ({} points)", variable, month, points.len());
            for point in points {
                println!(
                    "{:<24} {:>9.4}, {:>9.4}  {} {}",
                    point.country,
                    point.latitude,
                    point.longitude,
                    point.value,
                    variable.units()
                );
            }
        }

        Commands::Country { country } => match dashboard.country_profile(&country) {
            Some(profile) => {
                println!("{}", profile.summary());
                println!("\nLocation:");
                for (latitude, longitude) in profile.locations() {
                    println!("  {:.4}, {:.4}", latitude, longitude);
                }
            }
            None => println!("⚠️  No data found for {}", country),
        },

        Commands::Probabilities {
            country,
            month,
            json,
        } => {
            let result = dashboard.estimate(&country, month);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            match result {
                EstimationResult::Success(probabilities) => {
                    println!(
                        "{} in {} ({} observations)",
                        country, month, probabilities.observations
                    );
                    for phenomenon in [Phenomenon::Rain, Phenomenon::Heat] {
                        println!(
                            "Probability of {}: {:.2}%",
                            phenomenon.display_name().to_lowercase(),
                            probabilities.probability(phenomenon) * 100.0
                        );
                    }
                }
                EstimationResult::NoData => {
                    println!("⚠️  No data available for {} in {}", country, month);
                }
            }
        }

        Commands::Options => {
            println!("Countries:");
            for country in dashboard.store().distinct_countries() {
                println!("  {}", country);
            }
            println!("\nMonths:");
            for month in dashboard.store().distinct_months() {
                println!("  {}", month);
            }
        }
    }

    Ok(())
}

fn print_summary(dashboard: &ClimateDashboard) {
    let Some(summary) = dashboard.summary() else {
        println!("⚠️  The dataset has no observations");
        return;
    };

    println!("Summary Metrics\n{}", summary.summary());

    let rankings = [
        ("Most precipitation", ClimateVariable::Precipitation, RankOrder::Highest),
        ("Least precipitation", ClimateVariable::Precipitation, RankOrder::Lowest),
        ("Highest temperature", ClimateVariable::Temperature, RankOrder::Highest),
        ("Lowest temperature", ClimateVariable::Temperature, RankOrder::Lowest),
    ];

    for (title, variable, order) in rankings {
        let rows = dashboard.ranking(variable, order);
        println!("\nTop {} - {}", dashboard.top_n(), title);
        print_ranking(&rows, variable);
    }
}

fn print_ranking(rows: &[Observation], variable: ClimateVariable) {
    let ranked = rows.iter().filter_map(|row| Some((row, row.value(variable)?)));
    for (i, (row, value)) in ranked.enumerate() {
        println!(
            "{:>3}. {:<24} {:>10} {} ({})",
            i + 1,
            row.country,
            value,
            variable.units(),
            row.month
        );
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if verbose {
        "climate_explorer=debug"
    } else {
        "climate_explorer=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
