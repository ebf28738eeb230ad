//! Tariff comparison
//!
//! Prices a catalog of supplier tariffs against a household's annual usage
//! and ranks them by saving over the current bill. Catalogs load from JSON
//! (an array of tariffs) or CSV (one tariff per row with a header).

use std::cmp::Ordering;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Error, Result};
use crate::models::DwellingType;
use crate::reference::ReferenceData;
use crate::region::Region;

/// Days used to turn daily standing charges into an annual figure
const DAYS_PER_YEAR: f64 = 365.0;

/// Calibration ratio bounds for usage estimated from spend
const MIN_SPEND_RATIO: f64 = 0.5;
const MAX_SPEND_RATIO: f64 = 2.0;

/// Sample catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../../config/tariffs.sample.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffType {
    Fixed,
    Variable,
    Tracker,
}

impl TariffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffType::Fixed => "fixed",
            TariffType::Variable => "variable",
            TariffType::Tracker => "tracker",
        }
    }
}

impl std::str::FromStr for TariffType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(TariffType::Fixed),
            "variable" => Ok(TariffType::Variable),
            "tracker" => Ok(TariffType::Tracker),
            _ => Err(format!("Unknown tariff type: {}", s)),
        }
    }
}

impl std::fmt::Display for TariffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a tariff is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TariffRegion {
    National,
    Regional(Region),
}

impl TariffRegion {
    /// Whether a household in `region` can take this tariff
    pub fn covers(&self, region: Region) -> bool {
        match self {
            TariffRegion::National => true,
            TariffRegion::Regional(r) => *r == region,
        }
    }
}

impl TryFrom<String> for TariffRegion {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        if s.trim().eq_ignore_ascii_case("national") {
            Ok(TariffRegion::National)
        } else {
            s.parse().map(TariffRegion::Regional)
        }
    }
}

impl From<TariffRegion> for String {
    fn from(region: TariffRegion) -> Self {
        region.to_string()
    }
}

impl std::fmt::Display for TariffRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TariffRegion::National => write!(f, "national"),
            TariffRegion::Regional(region) => write!(f, "{}", region),
        }
    }
}

/// A supplier tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub id: String,
    pub supplier: String,
    pub name: String,
    pub tariff_type: TariffType,
    /// pence/kWh
    pub electricity_rate: f64,
    /// pence/kWh
    pub gas_rate: f64,
    /// pence/day
    pub electricity_standing_charge: f64,
    /// pence/day
    pub gas_standing_charge: f64,
    /// 0 for rolling contracts
    #[serde(default)]
    pub contract_months: u32,
    /// £
    #[serde(default)]
    pub exit_fee: f64,
    #[serde(default)]
    pub green: bool,
    /// Customer rating out of 5
    #[serde(default)]
    pub rating: f64,
    pub region: TariffRegion,
}

impl Tariff {
    /// Estimated yearly bill for the given usage, including standing charges (£)
    pub fn annual_cost(&self, electricity_kwh: f64, gas_kwh: f64) -> f64 {
        (electricity_kwh * self.electricity_rate
            + gas_kwh * self.gas_rate
            + (self.electricity_standing_charge + self.gas_standing_charge) * DAYS_PER_YEAR)
            / 100.0
    }

    fn validate(&self) -> Result<()> {
        let prices = [
            ("electricity rate", self.electricity_rate),
            ("gas rate", self.gas_rate),
            ("electricity standing charge", self.electricity_standing_charge),
            ("gas standing charge", self.gas_standing_charge),
            ("exit fee", self.exit_fee),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "tariff {}: {} cannot be negative (got {})",
                    self.id, name, value
                )));
            }
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "tariff {}: rating must be between 0 and 5 (got {})",
                self.id, self.rating
            )));
        }
        Ok(())
    }
}

/// An ordered list of tariffs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TariffCatalog {
    pub tariffs: Vec<Tariff>,
}

impl TariffCatalog {
    pub fn new(tariffs: Vec<Tariff>) -> Result<Self> {
        for tariff in &tariffs {
            tariff.validate()?;
        }
        Ok(Self { tariffs })
    }

    /// The sample catalog bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tariffs: Vec<Tariff> = serde_json::from_str(json)?;
        Self::new(tariffs)
    }

    /// Parse a CSV catalog whose header names the `Tariff` fields
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tariffs = Vec::new();
        for result in rdr.deserialize() {
            let tariff: Tariff = result?;
            tariffs.push(tariff);
        }

        tracing::debug!(count = tariffs.len(), "Parsed CSV tariff catalog");
        Self::new(tariffs)
    }

    /// Load a `.json` or `.csv` catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json(&std::fs::read_to_string(path)?)?,
            Some("csv") => Self::from_csv_reader(std::fs::File::open(path)?)?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported tariff catalog format: {} (expected .json or .csv)",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), count = catalog.len(), "Loaded tariff catalog");
        Ok(catalog)
    }

    pub fn find(&self, id: &str) -> Option<&Tariff> {
        self.tariffs.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tariffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }
}

/// Filters and ranking knobs for `compare`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Only tariffs offered nationally or in this region
    pub region: Option<Region>,
    /// Ranking boost for green tariffs when green is preferred (£/year)
    pub green_delta_gbp: f64,
    pub limit: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            region: None,
            green_delta_gbp: 25.0,
            limit: 3,
        }
    }
}

impl CompareOptions {
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One tariff priced against the current bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffComparison {
    pub tariff: Tariff,
    /// £/year
    pub current_annual_cost: f64,
    /// £/year
    pub estimated_annual_cost: f64,
    /// Negative when the tariff costs more (£/year)
    pub estimated_savings: f64,
    pub savings_percent: f64,
}

/// Rank catalog tariffs by how much they would save
///
/// With `prefer_green`, a green tariff outranks a non-green one unless the
/// non-green tariff saves more than `green_delta_gbp` extra.
pub fn compare(
    catalog: &TariffCatalog,
    current_annual_cost: f64,
    electricity_kwh: f64,
    gas_kwh: f64,
    prefer_green: bool,
    options: &CompareOptions,
) -> Result<Vec<TariffComparison>> {
    ensure_positive("current annual cost", current_annual_cost)?;
    for (name, value) in [("electricity usage", electricity_kwh), ("gas usage", gas_kwh)] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidInput(format!(
                "{} cannot be negative (got {})",
                name, value
            )));
        }
    }

    let mut comparisons: Vec<TariffComparison> = catalog
        .tariffs
        .iter()
        .filter(|t| options.region.map_or(true, |r| t.region.covers(r)))
        .map(|t| {
            let estimated = t.annual_cost(electricity_kwh, gas_kwh);
            let savings = current_annual_cost - estimated;
            TariffComparison {
                tariff: t.clone(),
                current_annual_cost,
                estimated_annual_cost: estimated,
                estimated_savings: savings,
                savings_percent: savings / current_annual_cost * 100.0,
            }
        })
        .collect();

    let boost = |c: &TariffComparison| {
        if prefer_green && c.tariff.green {
            c.estimated_savings + options.green_delta_gbp
        } else {
            c.estimated_savings
        }
    };

    // Stable sort keeps catalog order for full ties
    comparisons.sort_by(|a, b| {
        boost(b)
            .partial_cmp(&boost(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                if prefer_green {
                    b.tariff.green.cmp(&a.tariff.green)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| {
                b.estimated_savings
                    .partial_cmp(&a.estimated_savings)
                    .unwrap_or(Ordering::Equal)
            })
    });
    comparisons.truncate(options.limit);

    tracing::debug!(
        candidates = catalog.len(),
        returned = comparisons.len(),
        prefer_green,
        "Compared tariffs"
    );

    Ok(comparisons)
}

/// Estimated annual usage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub electricity_kwh: f64,
    pub gas_kwh: f64,
}

/// Estimate annual usage from daily spend, dwelling type and household size
///
/// Starts from an archetype household and scales it by how the stated spend
/// compares with the average for the dwelling type.
pub fn estimate_annual_usage(
    daily_spend_gbp: f64,
    dwelling: DwellingType,
    occupants: u32,
    reference: &ReferenceData,
) -> Result<Usage> {
    ensure_positive("daily spend", daily_spend_gbp)?;
    if occupants == 0 {
        return Err(Error::InvalidInput(
            "a household needs at least one occupant".to_string(),
        ));
    }

    let benchmarks = &reference.benchmarks;
    let occupancy = 0.8 + 0.15 * occupants as f64;
    let scale = benchmarks.dwelling_multiplier(dwelling) * occupancy;
    let ratio =
        (daily_spend_gbp / benchmarks.daily_cost(dwelling)).clamp(MIN_SPEND_RATIO, MAX_SPEND_RATIO);

    let usage = Usage {
        electricity_kwh: (benchmarks.base_electricity_kwh * scale * ratio).round(),
        gas_kwh: (benchmarks.base_gas_kwh * scale * ratio).round(),
    };
    tracing::debug!(
        dwelling = dwelling.as_str(),
        occupants,
        ratio,
        electricity_kwh = usage.electricity_kwh,
        gas_kwh = usage.gas_kwh,
        "Estimated annual usage"
    );
    Ok(usage)
}
