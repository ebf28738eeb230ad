//! Wattwise CLI - Household energy savings advisor
//!
//! Usage:
//!   wattwise region "SW1A 1AA"            Resolve a postcode to its region
//!   wattwise solar --profile home.toml    Solar sizing, payback and options
//!   wattwise heat-pump --profile home.toml  Heat pump sizing and verdict
//!   wattwise recommend --month january    Ranked savings actions
//!   wattwise tariffs --current-cost 1800 --electricity-kwh 3000 --gas-kwh 11000

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let reference = commands::load_reference(cli.reference.as_deref())?;
    let output = if cli.json {
        commands::Output::Json
    } else {
        commands::Output::Report
    };

    match cli.command {
        Commands::Region { postcode } => commands::cmd_region(&reference, &postcode, output),
        Commands::Solar { profile } => {
            let profile = commands::ProfileSource::from_arg(profile).load()?;
            commands::cmd_solar(&reference, &profile, output)
        }
        Commands::HeatPump { profile } => {
            let profile = commands::ProfileSource::from_arg(profile).load()?;
            commands::cmd_heat_pump(&reference, &profile, output)
        }
        Commands::Project {
            savings,
            cost,
            kind,
            years,
            degradation,
            inflation,
        } => {
            let config = commands::projection_config(&kind, years, degradation, inflation)?;
            commands::cmd_project(savings, cost, &config, output)
        }
        Commands::Recommend {
            profile,
            month,
            temperature,
            low_cost,
            no_upgrades,
            limit,
        } => {
            let profile = commands::ProfileSource::from_arg(profile).load()?;
            let month = commands::resolve_month(month.as_deref())?;
            let options = commands::generate_options(low_cost, no_upgrades);
            commands::cmd_recommend(
                &reference,
                &profile,
                month,
                temperature,
                &options,
                limit,
                output,
            )
        }
        Commands::Tariffs {
            current_cost,
            electricity_kwh,
            gas_kwh,
            region,
            green,
            catalog,
            limit,
        } => {
            let catalog = commands::load_catalog(catalog.as_deref())?;
            let mut options = wattwise_core::CompareOptions::default().with_limit(limit);
            if let Some(region) = region {
                let region: wattwise_core::Region =
                    region.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                options = options.with_region(region);
            }
            commands::cmd_tariffs(
                &catalog,
                current_cost,
                electricity_kwh,
                gas_kwh,
                green,
                &options,
                output,
            )
        }
        Commands::Usage {
            daily_spend,
            dwelling,
            occupants,
        } => {
            let dwelling: wattwise_core::DwellingType =
                dwelling.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_usage(&reference, daily_spend, dwelling, occupants, output)
        }
        Commands::Reference => {
            commands::cmd_reference(&reference, cli.reference.as_deref(), output)
        }
    }
}
