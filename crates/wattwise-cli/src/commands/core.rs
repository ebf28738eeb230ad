//! Shared loaders and output helpers
//!
//! This module contains:
//! - `load_reference` - Reference tables with the override file applied
//! - `ProfileSource` - Where the household profile comes from
//! - `load_catalog` - Tariff catalog from a file or the built-in list
//! - `Output` / `print_json` - Report vs JSON output

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Month};
use serde::Serialize;
use wattwise_core::{
    DwellingType, GenerateOptions, HeatingSystem, HouseholdProfile, InsulationRating,
    ProjectionConfig, ReferenceData, RoofOrientation, TariffCatalog,
};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Report,
    Json,
}

/// Print any serializable result as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Reference tables: explicit override, then the default override location, then built-ins
pub fn load_reference(path: Option<&Path>) -> Result<ReferenceData> {
    ReferenceData::load(path).context("Failed to load reference data")
}

/// Tariff catalog from a JSON/CSV file, else the built-in catalog
pub fn load_catalog(path: Option<&Path>) -> Result<TariffCatalog> {
    match path {
        Some(path) => TariffCatalog::load(path)
            .with_context(|| format!("Failed to load tariff catalog {}", path.display())),
        None => TariffCatalog::builtin().context("Failed to load built-in tariff catalog"),
    }
}

/// Where a household profile is read from, in order of preference
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    /// TOML or JSON file, picked by extension
    File(PathBuf),
    /// Built-in example household
    Demo,
}

impl ProfileSource {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Demo,
        }
    }

    /// Read and validate the profile
    pub fn load(&self) -> Result<HouseholdProfile> {
        let profile = match self {
            Self::File(path) => read_profile(path)?,
            Self::Demo => {
                tracing::info!("No profile given, using the demo household");
                demo_profile()
            }
        };
        profile.validate().context("Invalid household profile")?;
        Ok(profile)
    }
}

fn read_profile(path: &Path) -> Result<HouseholdProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON profile {}", path.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML profile {}", path.display()))
    }
}

/// A 1970s gas-heated London semi with a south-facing roof
pub fn demo_profile() -> HouseholdProfile {
    HouseholdProfile::new(
        "SE1 7PB",
        DwellingType::SemiDetached,
        3,
        HeatingSystem::GasBoiler,
        12000.0,
        3200.0,
        6.0,
        24.0,
    )
    .with_roof(Some(30.0), RoofOrientation::SouthFacing)
    .with_insulation(InsulationRating::C)
    .with_floor_area(100.0)
    .with_construction_year(1975)
    .with_monthly_spend(150.0)
}

/// Calendar month from "1".."12" or a month name, defaulting to the current month
pub fn resolve_month(month: Option<&str>) -> Result<Month> {
    let Some(month) = month else {
        let now = chrono::Local::now().month();
        return Month::try_from(now as u8)
            .map_err(|_| anyhow::anyhow!("Invalid current month: {}", now));
    };

    if let Ok(number) = month.trim().parse::<u8>() {
        return Month::try_from(number)
            .map_err(|_| anyhow::anyhow!("Month must be between 1 and 12 (got {})", number));
    }
    month
        .trim()
        .parse::<Month>()
        .map_err(|_| anyhow::anyhow!("Unknown month: {}", month))
}

/// Projection preset by kind, with optional overrides
pub fn projection_config(
    kind: &str,
    years: Option<u32>,
    degradation: Option<f64>,
    inflation: Option<f64>,
) -> Result<ProjectionConfig> {
    let mut config = match kind.to_lowercase().as_str() {
        "solar" => ProjectionConfig::solar(),
        "heat-pump" | "heat_pump" => ProjectionConfig::heat_pump(),
        _ => anyhow::bail!("Unknown projection kind: {}. Available: solar, heat-pump", kind),
    };
    if let Some(years) = years {
        config.years = years;
    }
    if let Some(degradation) = degradation {
        config.degradation_rate = degradation;
    }
    if let Some(inflation) = inflation {
        config.inflation_rate = inflation;
    }
    Ok(config)
}

pub fn generate_options(low_cost: bool, no_upgrades: bool) -> GenerateOptions {
    let mut options = if low_cost {
        GenerateOptions::low_cost()
    } else {
        GenerateOptions::default()
    };
    if no_upgrades {
        options.include_upgrades = false;
    }
    options
}
