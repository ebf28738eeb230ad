//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wattwise")]
#[command(about = "UK household energy savings advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print results as JSON instead of a report
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reference data override file (TOML)
    #[arg(long, global = true)]
    pub reference: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a postcode to its climate region
    Region {
        /// Full postcode or postcode area (e.g. "SW1A 1AA" or "EH")
        postcode: String,
    },

    /// Size a rooftop solar array and project its savings
    Solar {
        /// Household profile file (TOML or JSON); uses a demo home if omitted
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Size an air-source heat pump and compare it with the current boiler
    HeatPump {
        /// Household profile file (TOML or JSON); uses a demo home if omitted
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Project cumulative savings for an upfront investment
    Project {
        /// First-year saving (£)
        #[arg(long)]
        savings: f64,

        /// Upfront cost (£)
        #[arg(long)]
        cost: f64,

        /// Preset horizon and rates (solar, heat-pump)
        #[arg(short, long, default_value = "solar")]
        kind: String,

        /// Override the preset horizon (years)
        #[arg(long)]
        years: Option<u32>,

        /// Override the preset degradation rate (0.005 = 0.5%/year)
        #[arg(long)]
        degradation: Option<f64>,

        /// Override the preset price inflation (0.03 = 3%/year)
        #[arg(long)]
        inflation: Option<f64>,
    },

    /// Ranked savings actions for a household
    Recommend {
        /// Household profile file (TOML or JSON); uses a demo home if omitted
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Calendar month for seasonal tips (1-12 or name); defaults to this month
        #[arg(short, long)]
        month: Option<String>,

        /// Current outdoor temperature (°C)
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Only cheap actions (under £1,000, paying back within 24 months)
        #[arg(long)]
        low_cost: bool,

        /// Leave out home upgrades
        #[arg(long)]
        no_upgrades: bool,

        /// Maximum number of actions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Compare tariffs against the current annual cost
    Tariffs {
        /// Current annual energy cost (£)
        #[arg(long)]
        current_cost: f64,

        /// Annual electricity use (kWh)
        #[arg(long)]
        electricity_kwh: f64,

        /// Annual gas use (kWh)
        #[arg(long, default_value = "0")]
        gas_kwh: f64,

        /// Region for regional tariffs (e.g. london, scotland)
        #[arg(short, long)]
        region: Option<String>,

        /// Rank green tariffs higher
        #[arg(long)]
        green: bool,

        /// Tariff catalog file (JSON or CSV); uses the built-in catalog if omitted
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Number of tariffs to show
        #[arg(short, long, default_value = "3")]
        limit: usize,
    },

    /// Estimate annual usage from daily spend
    Usage {
        /// Average daily energy spend (£)
        #[arg(long)]
        daily_spend: f64,

        /// Dwelling type (flat, terraced, semi-detached, bungalow, detached)
        #[arg(short, long, default_value = "semi-detached")]
        dwelling: String,

        /// Number of people in the home
        #[arg(short, long, default_value = "2")]
        occupants: u32,
    },

    /// Show the reference tables in effect
    Reference,
}
