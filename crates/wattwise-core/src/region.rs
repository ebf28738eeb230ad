//! Region resolver
//!
//! Maps the area letters at the front of a UK postcode ("SW" in "SW1A 1AA",
//! "G" in "G12 8QQ") to one of twelve climate regions. Matching is exact on
//! the area code, walking an ordered table; the first set that contains the
//! area wins. Anything unrecognised falls back to [`Region::Default`], which
//! carries UK-average climate figures.
//!
//! Reference data can add or remap areas through its `[postcode_areas]`
//! table; those entries are checked before the built-in table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reference::ReferenceData;

/// UK climate region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Scotland,
    NorthEast,
    NorthWest,
    Yorkshire,
    EastMidlands,
    WestMidlands,
    East,
    London,
    SouthEast,
    SouthWest,
    Wales,
    NorthernIreland,
    Default,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scotland => "scotland",
            Self::NorthEast => "north-east",
            Self::NorthWest => "north-west",
            Self::Yorkshire => "yorkshire",
            Self::EastMidlands => "east-midlands",
            Self::WestMidlands => "west-midlands",
            Self::East => "east",
            Self::London => "london",
            Self::SouthEast => "south-east",
            Self::SouthWest => "south-west",
            Self::Wales => "wales",
            Self::NorthernIreland => "northern-ireland",
            Self::Default => "default",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Scotland => "Scotland",
            Self::NorthEast => "North East England",
            Self::NorthWest => "North West England",
            Self::Yorkshire => "Yorkshire and the Humber",
            Self::EastMidlands => "East Midlands",
            Self::WestMidlands => "West Midlands",
            Self::East => "East of England",
            Self::London => "London",
            Self::SouthEast => "South East England",
            Self::SouthWest => "South West England",
            Self::Wales => "Wales",
            Self::NorthernIreland => "Northern Ireland",
            Self::Default => "UK average",
        }
    }

    pub fn all() -> &'static [Region] {
        &[
            Self::Scotland,
            Self::NorthEast,
            Self::NorthWest,
            Self::Yorkshire,
            Self::EastMidlands,
            Self::WestMidlands,
            Self::East,
            Self::London,
            Self::SouthEast,
            Self::SouthWest,
            Self::Wales,
            Self::NorthernIreland,
            Self::Default,
        ]
    }

    /// Climate and sunlight figures for this region
    pub fn profile(&self, reference: &ReferenceData) -> RegionProfile {
        let climate = reference.climate(*self);
        RegionProfile {
            region: *self,
            average_temperature_c: climate.average_temperature_c,
            heating_degree_days: climate.heating_degree_days,
            solar_yield_kwh_per_kwp: climate.solar_yield_kwh_per_kwp,
        }
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::all()
            .iter()
            .find(|r| r.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown region: {}", s))
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static climate description of a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub region: Region,
    /// Mean annual outdoor temperature (°C)
    pub average_temperature_c: f64,
    /// Heating-degree-day proxy for the year
    pub heating_degree_days: f64,
    /// Annual generation per installed kWp (kWh/kWp)
    pub solar_yield_kwh_per_kwp: f64,
}

/// Postcode areas per region, checked in order
const AREA_TABLE: &[(Region, &[&str])] = &[
    (
        Region::Scotland,
        &[
            "AB", "DD", "DG", "EH", "FK", "G", "HS", "IV", "KA", "KW", "KY", "ML", "PA", "PH",
            "TD", "ZE",
        ],
    ),
    (
        Region::London,
        &[
            "E", "EC", "N", "NW", "SE", "SW", "W", "WC", "EN", "HA", "IG", "RM", "UB",
        ],
    ),
    (
        Region::SouthEast,
        &[
            "BN", "BR", "CR", "CT", "DA", "GU", "KT", "ME", "RH", "SL", "SM", "TN", "TW", "OX",
            "RG", "PO", "SO", "HP", "MK",
        ],
    ),
    (
        Region::SouthWest,
        &["BA", "BH", "BS", "DT", "EX", "GL", "PL", "SP", "TA", "TQ", "TR"],
    ),
    (
        Region::East,
        &["CB", "CM", "CO", "IP", "NR", "PE", "SG", "AL", "LU", "SS", "WD"],
    ),
    (
        Region::Wales,
        &["CF", "CH", "HR", "LD", "LL", "NP", "SA", "SY"],
    ),
    (Region::NorthEast, &["DH", "DL", "NE", "SR", "TS"]),
    (
        Region::Yorkshire,
        &["BD", "DN", "HD", "HG", "HU", "HX", "LS", "S", "WF", "YO"],
    ),
    (
        Region::NorthWest,
        &["BB", "BL", "CA", "CW", "FY", "L", "LA", "M", "OL", "PR", "SK", "WA", "WN"],
    ),
    (Region::EastMidlands, &["DE", "LE", "LN", "NG", "NN"]),
    (
        Region::WestMidlands,
        &["B", "CV", "DY", "ST", "TF", "WR", "WS", "WV"],
    ),
    (Region::NorthernIreland, &["BT"]),
];

/// Leading alphabetic characters (at most two), upper-cased
fn extract_area(raw: &str) -> String {
    raw.trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .take(2)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Extract the postcode area, failing when there isn't one to extract
///
/// `"sw1a 1aa"` → `"SW"`, `" g12"` → `"G"`, `"123"` → error.
pub fn postcode_area(raw: &str) -> Result<String> {
    let area = extract_area(raw);
    if area.is_empty() {
        return Err(Error::InvalidPostcode(raw.to_string()));
    }
    Ok(area)
}

/// Resolve a postcode or postcode area to a region
///
/// Never fails: empty, malformed or unknown input resolves to
/// [`Region::Default`].
pub fn resolve_region(postal_prefix: &str) -> Region {
    resolve_region_with(postal_prefix, &HashMap::new())
}

/// Resolve a postcode, checking `overrides` (upper-case area to region)
/// before the built-in table
pub fn resolve_region_with(postal_prefix: &str, overrides: &HashMap<String, Region>) -> Region {
    let area = extract_area(postal_prefix);
    if area.is_empty() {
        tracing::warn!(
            input = postal_prefix,
            "No postcode area found, using UK average region"
        );
        return Region::Default;
    }

    if let Some(region) = overrides.get(&area) {
        tracing::debug!(area = %area, region = region.as_str(), "Resolved region from override");
        return *region;
    }

    for (region, areas) in AREA_TABLE {
        if areas.contains(&area.as_str()) {
            tracing::debug!(area = %area, region = region.as_str(), "Resolved region");
            return *region;
        }
    }

    tracing::warn!(area = %area, "Unknown postcode area, using UK average region");
    Region::Default
}
