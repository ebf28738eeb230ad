//! Domain models for Wattwise

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Error, Result};
use crate::region::{postcode_area, resolve_region, Region};

/// Daytime share of electricity used when the household doesn't know it
pub const DEFAULT_DAYTIME_USAGE_FRACTION: f64 = 0.4;

/// Smart Export Guarantee rate assumed when none is supplied (pence/kWh)
pub const DEFAULT_EXPORT_RATE_PENCE: f64 = 5.0;

/// Kind of dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DwellingType {
    Flat,
    Terraced,
    #[serde(alias = "semi")]
    SemiDetached,
    Detached,
    Bungalow,
}

impl DwellingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Terraced => "terraced",
            Self::SemiDetached => "semi-detached",
            Self::Detached => "detached",
            Self::Bungalow => "bungalow",
        }
    }

    pub fn all() -> &'static [DwellingType] {
        &[
            Self::Flat,
            Self::Terraced,
            Self::SemiDetached,
            Self::Detached,
            Self::Bungalow,
        ]
    }
}

impl std::str::FromStr for DwellingType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "apartment" => Ok(Self::Flat),
            "terraced" | "terrace" => Ok(Self::Terraced),
            "semi-detached" | "semi_detached" | "semi" => Ok(Self::SemiDetached),
            "detached" => Ok(Self::Detached),
            "bungalow" => Ok(Self::Bungalow),
            _ => Err(format!("Unknown dwelling type: {}", s)),
        }
    }
}

impl std::fmt::Display for DwellingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current space heating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeatingSystem {
    #[serde(alias = "gas")]
    GasBoiler,
    OilBoiler,
    #[serde(alias = "electricity")]
    Electric,
    HeatPump,
    Other,
}

impl HeatingSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GasBoiler => "gas-boiler",
            Self::OilBoiler => "oil-boiler",
            Self::Electric => "electric",
            Self::HeatPump => "heat-pump",
            Self::Other => "other",
        }
    }

    /// Heating that runs on electricity and benefits from time-of-use rates
    pub fn is_electric(&self) -> bool {
        matches!(self, Self::Electric | Self::HeatPump)
    }
}

impl std::str::FromStr for HeatingSystem {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gas-boiler" | "gas_boiler" | "gas" => Ok(Self::GasBoiler),
            "oil-boiler" | "oil_boiler" | "oil" => Ok(Self::OilBoiler),
            "electric" | "electricity" => Ok(Self::Electric),
            "heat-pump" | "heat_pump" => Ok(Self::HeatPump),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown heating system: {}", s)),
        }
    }
}

impl std::fmt::Display for HeatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// EPC-style insulation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InsulationRating {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl InsulationRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::Unknown => "unknown",
        }
    }

    pub fn all() -> &'static [InsulationRating] {
        &[
            Self::A,
            Self::B,
            Self::C,
            Self::D,
            Self::E,
            Self::F,
            Self::G,
            Self::Unknown,
        ]
    }
}

impl std::str::FromStr for InsulationRating {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "G" => Ok(Self::G),
            "UNKNOWN" | "" => Ok(Self::Unknown),
            _ => Err(format!("Unknown insulation rating: {}", s)),
        }
    }
}

impl std::fmt::Display for InsulationRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which way the main roof pitch faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofOrientation {
    SouthFacing,
    SouthWest,
    SouthEast,
    EastWest,
    NorthFacing,
    Flat,
    #[default]
    Unknown,
}

impl RoofOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SouthFacing => "south-facing",
            Self::SouthWest => "south-west",
            Self::SouthEast => "south-east",
            Self::EastWest => "east-west",
            Self::NorthFacing => "north-facing",
            Self::Flat => "flat",
            Self::Unknown => "unknown",
        }
    }

    pub fn all() -> &'static [RoofOrientation] {
        &[
            Self::SouthFacing,
            Self::SouthWest,
            Self::SouthEast,
            Self::EastWest,
            Self::NorthFacing,
            Self::Flat,
            Self::Unknown,
        ]
    }
}

impl std::str::FromStr for RoofOrientation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "south-facing" | "south" => Ok(Self::SouthFacing),
            "south-west" => Ok(Self::SouthWest),
            "south-east" => Ok(Self::SouthEast),
            "east-west" => Ok(Self::EastWest),
            "north-facing" | "north" => Ok(Self::NorthFacing),
            "flat" => Ok(Self::Flat),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown roof orientation: {}", s)),
        }
    }
}

impl std::fmt::Display for RoofOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heat emitters in the home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadiatorType {
    #[default]
    Standard,
    Oversized,
    Underfloor,
}

impl RadiatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Oversized => "oversized",
            Self::Underfloor => "underfloor",
        }
    }
}

impl std::str::FromStr for RadiatorType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "oversized" => Ok(Self::Oversized),
            "underfloor" => Ok(Self::Underfloor),
            _ => Err(format!("Unknown radiator type: {}", s)),
        }
    }
}

impl std::fmt::Display for RadiatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Equipment price tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Budget,
    Standard,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    pub fn all() -> &'static [Tier] {
        &[Self::Budget, Self::Standard, Self::Premium]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time for savings to repay an upfront cost
///
/// `Never` covers zero or negative savings, where a plain division would
/// produce infinity or a meaningless negative period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "years", rename_all = "snake_case")]
pub enum Payback {
    Years(f64),
    Never,
}

impl Payback {
    /// Simple payback: `cost / annual_savings`, or `Never` when nothing is saved
    pub fn from_cost_and_savings(cost: f64, annual_savings: f64) -> Self {
        if annual_savings > 0.0 && annual_savings.is_finite() {
            Self::Years(cost.max(0.0) / annual_savings)
        } else {
            Self::Never
        }
    }

    pub fn years(&self) -> Option<f64> {
        match self {
            Self::Years(years) => Some(*years),
            Self::Never => None,
        }
    }

    pub fn months(&self) -> Option<f64> {
        self.years().map(|y| y * 12.0)
    }

    /// True when the payback lands at or before `years`
    pub fn is_within(&self, years: f64) -> bool {
        self.years().is_some_and(|y| y <= years)
    }
}

impl PartialOrd for Payback {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Years(a), Self::Years(b)) => a.partial_cmp(b),
            (Self::Years(_), Self::Never) => Some(Ordering::Less),
            (Self::Never, Self::Years(_)) => Some(Ordering::Greater),
            (Self::Never, Self::Never) => Some(Ordering::Equal),
        }
    }
}

impl std::fmt::Display for Payback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{:.1} years", years),
            Self::Never => write!(f, "never"),
        }
    }
}

/// A fully-resolved household, as assembled by the caller from onboarding
/// answers or validated bill data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// Full postcode or just its area letters (e.g. "SW1A 1AA" or "SW")
    pub postcode: String,
    pub dwelling_type: DwellingType,
    pub occupants: u32,
    pub heating_system: HeatingSystem,
    /// Annual gas use (kWh); zero for homes without gas
    pub annual_gas_kwh: f64,
    pub annual_electricity_kwh: f64,
    /// Gas unit rate (pence/kWh)
    pub gas_rate_pence: f64,
    /// Electricity unit rate (pence/kWh)
    pub electricity_rate_pence: f64,
    #[serde(default)]
    pub roof_area_m2: Option<f64>,
    #[serde(default)]
    pub roof_orientation: RoofOrientation,
    #[serde(default)]
    pub insulation: InsulationRating,
    #[serde(default)]
    pub floor_area_m2: Option<f64>,
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub radiator_type: RadiatorType,
    /// Share of electricity used during daylight hours (0.0-1.0)
    #[serde(default)]
    pub daytime_usage_fraction: Option<f64>,
    /// Export payment for solar generation (pence/kWh)
    #[serde(default)]
    pub export_rate_pence: Option<f64>,
    /// Monthly spend read off a bill, when known (£)
    #[serde(default)]
    pub monthly_spend_gbp: Option<f64>,
}

impl HouseholdProfile {
    /// Create a profile with the required fields; optional fields start unset
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        postcode: impl Into<String>,
        dwelling_type: DwellingType,
        occupants: u32,
        heating_system: HeatingSystem,
        annual_gas_kwh: f64,
        annual_electricity_kwh: f64,
        gas_rate_pence: f64,
        electricity_rate_pence: f64,
    ) -> Self {
        Self {
            postcode: postcode.into(),
            dwelling_type,
            occupants,
            heating_system,
            annual_gas_kwh,
            annual_electricity_kwh,
            gas_rate_pence,
            electricity_rate_pence,
            roof_area_m2: None,
            roof_orientation: RoofOrientation::Unknown,
            insulation: InsulationRating::Unknown,
            floor_area_m2: None,
            construction_year: None,
            radiator_type: RadiatorType::Standard,
            daytime_usage_fraction: None,
            export_rate_pence: None,
            monthly_spend_gbp: None,
        }
    }

    pub fn with_roof(mut self, area_m2: Option<f64>, orientation: RoofOrientation) -> Self {
        self.roof_area_m2 = area_m2;
        self.roof_orientation = orientation;
        self
    }

    pub fn with_insulation(mut self, insulation: InsulationRating) -> Self {
        self.insulation = insulation;
        self
    }

    pub fn with_floor_area(mut self, floor_area_m2: f64) -> Self {
        self.floor_area_m2 = Some(floor_area_m2);
        self
    }

    pub fn with_construction_year(mut self, year: i32) -> Self {
        self.construction_year = Some(year);
        self
    }

    pub fn with_radiators(mut self, radiator_type: RadiatorType) -> Self {
        self.radiator_type = radiator_type;
        self
    }

    pub fn with_daytime_usage(mut self, fraction: f64) -> Self {
        self.daytime_usage_fraction = Some(fraction);
        self
    }

    pub fn with_export_rate(mut self, pence: f64) -> Self {
        self.export_rate_pence = Some(pence);
        self
    }

    pub fn with_monthly_spend(mut self, gbp: f64) -> Self {
        self.monthly_spend_gbp = Some(gbp);
        self
    }

    /// Reject profiles that would produce nonsensical (negative or infinite) costs
    pub fn validate(&self) -> Result<()> {
        postcode_area(&self.postcode)?;
        ensure_positive("annual electricity usage", self.annual_electricity_kwh)?;
        ensure_positive("electricity rate", self.electricity_rate_pence)?;

        if !self.annual_gas_kwh.is_finite() || self.annual_gas_kwh < 0.0 {
            return Err(Error::InvalidInput(format!(
                "annual gas usage cannot be negative (got {})",
                self.annual_gas_kwh
            )));
        }
        if self.annual_gas_kwh > 0.0 {
            ensure_positive("gas rate", self.gas_rate_pence)?;
        }
        if self.occupants == 0 {
            return Err(Error::InvalidInput(
                "a household needs at least one occupant".to_string(),
            ));
        }
        if let Some(area) = self.roof_area_m2 {
            ensure_positive("roof area", area)?;
        }
        if let Some(area) = self.floor_area_m2 {
            ensure_positive("floor area", area)?;
        }
        if let Some(fraction) = self.daytime_usage_fraction {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(Error::InvalidInput(format!(
                    "daytime usage fraction must be between 0 and 1 (got {})",
                    fraction
                )));
            }
        }
        if let Some(rate) = self.export_rate_pence {
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "export rate cannot be negative (got {})",
                    rate
                )));
            }
        }
        if let Some(spend) = self.monthly_spend_gbp {
            ensure_positive("monthly spend", spend)?;
        }
        Ok(())
    }

    /// Region for the profile's postcode from the built-in area table
    ///
    /// Use [`ReferenceData::region_for`](crate::ReferenceData::region_for) to
    /// honour postcode area overrides.
    pub fn region(&self) -> Region {
        resolve_region(&self.postcode)
    }

    pub fn daytime_fraction(&self) -> f64 {
        self.daytime_usage_fraction
            .unwrap_or(DEFAULT_DAYTIME_USAGE_FRACTION)
    }

    pub fn export_rate(&self) -> f64 {
        self.export_rate_pence.unwrap_or(DEFAULT_EXPORT_RATE_PENCE)
    }

    /// Unit-rate cost of the stated usage, excluding standing charges (£/year)
    pub fn annual_unit_cost(&self) -> f64 {
        (self.annual_gas_kwh * self.gas_rate_pence
            + self.annual_electricity_kwh * self.electricity_rate_pence)
            / 100.0
    }

    /// Monthly spend from the bill if known, else estimated from usage and rates
    pub fn monthly_spend(&self) -> f64 {
        self.monthly_spend_gbp
            .unwrap_or_else(|| self.annual_unit_cost() / 12.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn profile() -> HouseholdProfile {
        HouseholdProfile::new(
            "SW1A 1AA",
            DwellingType::SemiDetached,
            3,
            HeatingSystem::GasBoiler,
            12000.0,
            3200.0,
            6.0,
            24.0,
        )
    }

    #[test]
    fn test_enum_round_trip_strings() {
        for dwelling in DwellingType::all() {
            assert_eq!(DwellingType::from_str(dwelling.as_str()).unwrap(), *dwelling);
        }
        for rating in InsulationRating::all() {
            assert_eq!(InsulationRating::from_str(rating.as_str()).unwrap(), *rating);
        }
        for roof in RoofOrientation::all() {
            assert_eq!(RoofOrientation::from_str(roof.as_str()).unwrap(), *roof);
        }
        assert_eq!(DwellingType::from_str("semi").unwrap(), DwellingType::SemiDetached);
        assert!(HeatingSystem::from_str("coal").is_err());
    }

    #[test]
    fn test_payback_sentinel() {
        assert_eq!(Payback::from_cost_and_savings(1000.0, 0.0), Payback::Never);
        assert_eq!(Payback::from_cost_and_savings(1000.0, -50.0), Payback::Never);
        assert_eq!(Payback::from_cost_and_savings(1000.0, 250.0), Payback::Years(4.0));
        assert_eq!(Payback::Years(4.0).months(), Some(48.0));
        assert!(Payback::Years(30.0) < Payback::Never);
        assert!(!Payback::Never.is_within(100.0));
    }

    #[test]
    fn test_payback_serializes_without_infinity() {
        let json = serde_json::to_string(&Payback::Never).unwrap();
        assert_eq!(json, r#"{"kind":"never"}"#);
        let json = serde_json::to_string(&Payback::Years(2.5)).unwrap();
        assert_eq!(json, r#"{"kind":"years","years":2.5}"#);
    }

    #[test]
    fn test_validate_accepts_gas_free_home() {
        let mut p = profile();
        p.annual_gas_kwh = 0.0;
        p.gas_rate_pence = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let mut p = profile();
        p.annual_electricity_kwh = 0.0;
        assert!(matches!(p.validate(), Err(Error::InvalidInput(_))));

        let mut p = profile();
        p.gas_rate_pence = -1.0;
        assert!(p.validate().is_err());

        let mut p = profile();
        p.postcode = "123".to_string();
        assert!(matches!(p.validate(), Err(Error::InvalidPostcode(_))));

        let p = profile().with_daytime_usage(1.5);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_monthly_spend_prefers_bill() {
        let p = profile();
        // (12000 * 6 + 3200 * 24) / 100 / 12
        assert!((p.monthly_spend() - 124.0).abs() < 1e-9);
        let p = p.with_monthly_spend(150.0);
        assert_eq!(p.monthly_spend(), 150.0);
    }

    #[test]
    fn test_profile_from_toml() {
        let toml_src = r#"
            postcode = "LS1 4AP"
            dwelling_type = "detached"
            occupants = 4
            heating_system = "gas"
            annual_gas_kwh = 15000.0
            annual_electricity_kwh = 3800.0
            gas_rate_pence = 6.3
            electricity_rate_pence = 24.5
            insulation = "D"
            roof_orientation = "south-west"
        "#;
        let p: HouseholdProfile = toml::from_str(toml_src).unwrap();
        assert_eq!(p.heating_system, HeatingSystem::GasBoiler);
        assert_eq!(p.insulation, InsulationRating::D);
        assert_eq!(p.roof_orientation, RoofOrientation::SouthWest);
        assert_eq!(p.radiator_type, RadiatorType::Standard);
        assert_eq!(p.region(), Region::Yorkshire);
    }
}
