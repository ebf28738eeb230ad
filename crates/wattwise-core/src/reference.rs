//! Reference data tables
//!
//! Every constant the calculators depend on lives in a single
//! [`ReferenceData`] value that is passed into each calculator. That covers
//! regional climate and insulation factors, equipment prices and grants,
//! savings percentages, suitability weights, recommendation cutoffs and
//! postcode area overrides.
//!
//! ## Override Resolution
//!
//! Tables are resolved in two layers:
//! 1. An override TOML file: an explicit path, else
//!    `~/.local/share/wattwise/reference.toml` when present
//! 2. Built-in defaults (compiled into the binary)
//!
//! Override files are partial. Any key left out keeps its built-in value.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{DwellingType, InsulationRating, RoofOrientation, Tier};
use crate::region::{resolve_region_with, Region};

/// Climate figures for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionClimate {
    /// Mean annual outdoor temperature (°C)
    pub average_temperature_c: f64,
    pub heating_degree_days: f64,
    /// Annual generation per installed kWp (kWh/kWp)
    pub solar_yield_kwh_per_kwp: f64,
}

impl RegionClimate {
    const fn new(average_temperature_c: f64, heating_degree_days: f64, solar_yield: f64) -> Self {
        Self {
            average_temperature_c,
            heating_degree_days,
            solar_yield_kwh_per_kwp: solar_yield,
        }
    }
}

/// UK-average climate, used for `Region::Default` and for any region an
/// override table leaves out
const UK_AVERAGE_CLIMATE: RegionClimate = RegionClimate::new(10.0, 2700.0, 950.0);

/// Thermal performance for one insulation band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsulationFactors {
    /// Scales design heat loss (1.0 = band D)
    pub heat_loss_multiplier: f64,
    /// Annual space heating demand (kWh/m²)
    pub heat_demand_kwh_per_m2: f64,
}

const UNKNOWN_INSULATION: InsulationFactors = InsulationFactors {
    heat_loss_multiplier: 1.0,
    heat_demand_kwh_per_m2: 100.0,
};

/// One value per equipment tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValues {
    pub budget: f64,
    pub standard: f64,
    pub premium: f64,
}

impl TierValues {
    pub fn get(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Budget => self.budget,
            Tier::Standard => self.standard,
            Tier::Premium => self.premium,
        }
    }
}

/// Solar PV sizing and pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarReference {
    /// Installed cost per kWp (£)
    pub cost_per_kwp: TierValues,
    /// Generation multiplier relative to the standard panel
    pub efficiency_multiplier: TierValues,
    pub panel_watts: f64,
    /// Roof area needed per kWp (m²)
    pub roof_m2_per_kwp: f64,
    /// Share of annual usage the array is sized to cover
    pub target_usage_fraction: f64,
    pub min_kwp: f64,
    pub max_kwp: f64,
    /// Sizes are rounded to a multiple of this (kWp)
    pub size_step_kwp: f64,
}

impl Default for SolarReference {
    fn default() -> Self {
        Self {
            cost_per_kwp: TierValues {
                budget: 1200.0,
                standard: 1400.0,
                premium: 1600.0,
            },
            efficiency_multiplier: TierValues {
                budget: 0.95,
                standard: 1.0,
                premium: 1.1,
            },
            panel_watts: 400.0,
            roof_m2_per_kwp: 6.0,
            target_usage_fraction: 0.9,
            min_kwp: 2.0,
            max_kwp: 10.0,
            size_step_kwp: 0.5,
        }
    }
}

/// Heat pump sizing, efficiency and pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatPumpReference {
    /// Design heat loss for a band D home (W/m²)
    pub design_heat_loss_w_per_m2: f64,
    /// Extra capacity for domestic hot water
    pub hot_water_uplift: f64,
    /// Share of gas use that goes to space heating, for floor area estimates
    pub space_heating_share: f64,
    pub small_max_kw: f64,
    pub medium_max_kw: f64,
    pub small_cost: f64,
    pub medium_cost: f64,
    pub large_cost: f64,
    pub radiator_upgrade_cost: f64,
    pub hot_water_cylinder_cost: f64,
    pub warm_region_min_temp_c: f64,
    pub mild_region_min_temp_c: f64,
    pub scop_warm: f64,
    pub scop_mild: f64,
    pub scop_cold: f64,
    /// SCOP bonus for homes with a heat loss multiplier below the threshold
    pub insulation_scop_bonus: f64,
    pub insulation_bonus_threshold: f64,
    pub tier_cost_multiplier: TierValues,
    pub tier_scop_offset: TierValues,
}

impl Default for HeatPumpReference {
    fn default() -> Self {
        Self {
            design_heat_loss_w_per_m2: 70.0,
            hot_water_uplift: 0.2,
            space_heating_share: 0.8,
            small_max_kw: 7.0,
            medium_max_kw: 12.0,
            small_cost: 8000.0,
            medium_cost: 10000.0,
            large_cost: 13000.0,
            radiator_upgrade_cost: 3000.0,
            hot_water_cylinder_cost: 1500.0,
            warm_region_min_temp_c: 10.0,
            mild_region_min_temp_c: 9.0,
            scop_warm: 3.5,
            scop_mild: 3.2,
            scop_cold: 2.8,
            insulation_scop_bonus: 0.2,
            insulation_bonus_threshold: 0.8,
            tier_cost_multiplier: TierValues {
                budget: 0.9,
                standard: 1.0,
                premium: 1.2,
            },
            tier_scop_offset: TierValues {
                budget: -0.1,
                standard: 0.0,
                premium: 0.2,
            },
        }
    }
}

/// Gas boiler baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoilerReference {
    pub efficiency: f64,
    pub annual_maintenance_gbp: f64,
}

impl Default for BoilerReference {
    fn default() -> Self {
        Self {
            efficiency: 0.9,
            annual_maintenance_gbp: 150.0,
        }
    }
}

/// Home battery sizing and pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryReference {
    /// Only suggest a battery below this daytime usage share
    pub max_daytime_fraction: f64,
    /// Only suggest a battery above this annual export (kWh)
    pub min_annual_export_kwh: f64,
    /// Capacity per kWh of average daily export
    pub sizing_factor: f64,
    pub max_kwh: f64,
    /// Share of exported energy a battery moves into self-consumption
    pub storage_fraction: f64,
    pub small_max_kwh: f64,
    pub medium_max_kwh: f64,
    pub small_cost: f64,
    pub medium_cost: f64,
    pub large_cost: f64,
    /// Daytime share at or above which advice says generation is already used
    pub high_daytime_fraction: f64,
    /// Daytime share below which advice points at heavy export
    pub low_daytime_fraction: f64,
}

impl Default for BatteryReference {
    fn default() -> Self {
        Self {
            max_daytime_fraction: 0.5,
            min_annual_export_kwh: 1000.0,
            sizing_factor: 1.5,
            max_kwh: 15.0,
            storage_fraction: 0.7,
            small_max_kwh: 5.0,
            medium_max_kwh: 10.0,
            small_cost: 2500.0,
            medium_cost: 4000.0,
            large_cost: 6000.0,
            high_daytime_fraction: 0.6,
            low_daytime_fraction: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grants {
    /// Boiler Upgrade Scheme grant towards a heat pump (£)
    pub boiler_upgrade_scheme_gbp: f64,
}

impl Default for Grants {
    fn default() -> Self {
        Self {
            boiler_upgrade_scheme_gbp: 7500.0,
        }
    }
}

/// Emission factors (kg CO₂ per kWh)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonIntensity {
    pub grid_kg_per_kwh: f64,
    pub gas_kg_per_kwh: f64,
}

impl Default for CarbonIntensity {
    fn default() -> Self {
        Self {
            grid_kg_per_kwh: 0.233,
            gas_kg_per_kwh: 0.203,
        }
    }
}

/// Saving per recommendation, as a fraction of monthly spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsRates {
    pub thermostat_one_degree: f64,
    pub heating_schedule: f64,
    pub clothing_layers: f64,
    pub off_peak_timing: f64,
    pub curtains: f64,
    pub seasonal_tip: f64,
    pub fixed_tariff: f64,
    pub economy_7: f64,
    pub draught_proofing: f64,
    pub radiator_reflectors: f64,
    /// LED lighting is a flat amount, not a fraction (£/month)
    pub led_lighting_monthly_gbp: f64,
    /// Lighting energy saved by LEDs over traditional bulbs
    pub led_energy_reduction: f64,
    pub smart_thermostat: f64,
    pub loft_insulation: f64,
    pub cavity_wall: f64,
    pub heat_pump: f64,
}

impl Default for SavingsRates {
    fn default() -> Self {
        Self {
            thermostat_one_degree: 0.10,
            heating_schedule: 0.15,
            clothing_layers: 0.10,
            off_peak_timing: 0.08,
            curtains: 0.05,
            seasonal_tip: 0.03,
            fixed_tariff: 0.10,
            economy_7: 0.12,
            draught_proofing: 0.15,
            radiator_reflectors: 0.05,
            led_lighting_monthly_gbp: 5.0,
            led_energy_reduction: 0.75,
            smart_thermostat: 0.12,
            loft_insulation: 0.15,
            cavity_wall: 0.20,
            heat_pump: 0.40,
        }
    }
}

/// Upfront cost and quoted payback for recommended measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureCosts {
    pub draught_proofing_gbp: f64,
    pub radiator_reflectors_gbp: f64,
    pub radiator_reflectors_payback_months: f64,
    pub led_lighting_gbp: f64,
    pub led_lighting_payback_months: f64,
    pub smart_thermostat_gbp: f64,
    pub smart_thermostat_payback_months: f64,
    pub loft_insulation_gbp: f64,
    pub loft_insulation_payback_months: f64,
    pub cavity_wall_gbp: f64,
    pub cavity_wall_payback_months: f64,
    /// Heat pump installation before grant
    pub heat_pump_gbp: f64,
    pub heat_pump_payback_months: f64,
    pub smart_controls_gbp: f64,
    pub insulation_upgrade_gbp: f64,
    pub glazing_upgrade_gbp: f64,
}

impl Default for MeasureCosts {
    fn default() -> Self {
        Self {
            draught_proofing_gbp: 150.0,
            radiator_reflectors_gbp: 50.0,
            radiator_reflectors_payback_months: 10.0,
            led_lighting_gbp: 50.0,
            led_lighting_payback_months: 10.0,
            smart_thermostat_gbp: 200.0,
            smart_thermostat_payback_months: 24.0,
            loft_insulation_gbp: 500.0,
            loft_insulation_payback_months: 36.0,
            cavity_wall_gbp: 1000.0,
            cavity_wall_payback_months: 36.0,
            heat_pump_gbp: 10000.0,
            heat_pump_payback_months: 84.0,
            smart_controls_gbp: 500.0,
            insulation_upgrade_gbp: 2000.0,
            glazing_upgrade_gbp: 5000.0,
        }
    }
}

/// Typical-household benchmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UkBenchmarks {
    /// Average monthly dual fuel bill (£)
    pub monthly_dual_fuel_gbp: f64,
    /// Archetype annual electricity use (kWh)
    pub base_electricity_kwh: f64,
    /// Archetype annual gas use (kWh)
    pub base_gas_kwh: f64,
    /// Usage multiplier per dwelling type
    pub dwelling_multiplier: HashMap<DwellingType, f64>,
    /// Average daily energy cost per dwelling type (£)
    pub daily_cost_gbp: HashMap<DwellingType, f64>,
}

impl Default for UkBenchmarks {
    fn default() -> Self {
        Self {
            monthly_dual_fuel_gbp: 140.0,
            base_electricity_kwh: 2700.0,
            base_gas_kwh: 11500.0,
            dwelling_multiplier: HashMap::from([
                (DwellingType::Flat, 0.7),
                (DwellingType::Terraced, 0.9),
                (DwellingType::SemiDetached, 1.0),
                (DwellingType::Bungalow, 1.1),
                (DwellingType::Detached, 1.3),
            ]),
            daily_cost_gbp: HashMap::from([
                (DwellingType::Flat, 3.50),
                (DwellingType::Terraced, 4.00),
                (DwellingType::SemiDetached, 4.50),
                (DwellingType::Bungalow, 4.75),
                (DwellingType::Detached, 5.50),
            ]),
        }
    }
}

impl UkBenchmarks {
    pub fn dwelling_multiplier(&self, dwelling: DwellingType) -> f64 {
        self.dwelling_multiplier.get(&dwelling).copied().unwrap_or(1.0)
    }

    pub fn daily_cost(&self, dwelling: DwellingType) -> f64 {
        self.daily_cost_gbp.get(&dwelling).copied().unwrap_or(4.50)
    }
}

/// Points awarded when a value passes `limit`
///
/// Bands are checked in order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub limit: f64,
    pub points: f64,
}

impl ScoreBand {
    const fn new(limit: f64, points: f64) -> Self {
        Self { limit, points }
    }
}

/// Points for the first band whose limit satisfies `passes`, else zero
pub fn band_points(bands: &[ScoreBand], passes: impl Fn(f64) -> bool) -> f64 {
    bands
        .iter()
        .find(|band| passes(band.limit))
        .map_or(0.0, |band| band.points)
}

/// Weights behind the 0-100 suitability scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitabilityWeights {
    pub base_score: f64,
    /// Heat loss multiplier at or below the limit
    pub heat_pump_insulation: Vec<ScoreBand>,
    /// Average temperature at or above the limit (°C)
    pub heat_pump_climate: Vec<ScoreBand>,
    pub underfloor_points: f64,
    pub oversized_radiator_points: f64,
    pub standard_radiator_points: f64,
    /// Detached and semi-detached homes
    pub house_points: f64,
    pub bungalow_points: f64,
    /// Flats and terraced homes
    pub compact_home_points: f64,
    /// Solar yield that earns no climate points (kWh/kWp)
    pub solar_yield_floor: f64,
    /// Yield above the floor that earns full climate points (kWh/kWp)
    pub solar_yield_span: f64,
    pub solar_climate_max_points: f64,
    /// Scaled by roof efficiency
    pub solar_roof_max_points: f64,
    /// Annual usage above the limit (kWh)
    pub solar_usage: Vec<ScoreBand>,
    /// Payback below the limit (years)
    pub solar_payback: Vec<ScoreBand>,
}

impl Default for SuitabilityWeights {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            heat_pump_insulation: vec![
                ScoreBand::new(0.7, 30.0),
                ScoreBand::new(0.85, 25.0),
                ScoreBand::new(1.0, 15.0),
                ScoreBand::new(1.2, 5.0),
            ],
            heat_pump_climate: vec![
                ScoreBand::new(10.5, 15.0),
                ScoreBand::new(9.5, 10.0),
                ScoreBand::new(8.5, 5.0),
            ],
            underfloor_points: 10.0,
            oversized_radiator_points: 7.0,
            standard_radiator_points: 3.0,
            house_points: 5.0,
            bungalow_points: 4.0,
            compact_home_points: 2.0,
            solar_yield_floor: 850.0,
            solar_yield_span: 200.0,
            solar_climate_max_points: 25.0,
            solar_roof_max_points: 15.0,
            solar_usage: vec![ScoreBand::new(3000.0, 10.0), ScoreBand::new(2000.0, 5.0)],
            solar_payback: vec![ScoreBand::new(8.0, 10.0), ScoreBand::new(12.0, 5.0)],
        }
    }
}

/// Cutoffs that decide which recommendations apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendThresholds {
    /// Monthly spend above which a smart thermostat is suggested (£)
    pub smart_thermostat_min_spend_gbp: f64,
    /// Monthly spend above which a heat pump is suggested (£)
    pub heat_pump_min_spend_gbp: f64,
    /// Spend above this share of the UK monthly average triggers the fixed-rate tip
    pub fixed_tariff_spend_ratio: f64,
    /// Minimum household size for Economy 7 to pay off
    pub economy_7_min_occupants: u32,
    /// Homes built before this year are assumed to be draughty
    pub draught_proofing_built_before: i32,
    pub loft_insulation_built_before: i32,
    /// Cavity walls were standard from this year
    pub cavity_wall_built_from: i32,
    /// and usually filled from this one
    pub cavity_wall_built_before: i32,
    /// Below this outdoor temperature the thermostat tip applies (°C)
    pub heating_weather_below_c: f64,
}

impl Default for RecommendThresholds {
    fn default() -> Self {
        Self {
            smart_thermostat_min_spend_gbp: 100.0,
            heat_pump_min_spend_gbp: 120.0,
            fixed_tariff_spend_ratio: 1.05,
            economy_7_min_occupants: 2,
            draught_proofing_built_before: 2000,
            loft_insulation_built_before: 2000,
            cavity_wall_built_from: 1920,
            cavity_wall_built_before: 1990,
            heating_weather_below_c: 15.0,
        }
    }
}

/// All constant tables used by the calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub regions: HashMap<Region, RegionClimate>,
    pub insulation: HashMap<InsulationRating, InsulationFactors>,
    pub roof_efficiency: HashMap<RoofOrientation, f64>,
    pub solar: SolarReference,
    pub heat_pump: HeatPumpReference,
    pub boiler: BoilerReference,
    pub battery: BatteryReference,
    pub grants: Grants,
    pub carbon: CarbonIntensity,
    pub savings: SavingsRates,
    pub measures: MeasureCosts,
    pub benchmarks: UkBenchmarks,
    pub suitability: SuitabilityWeights,
    pub thresholds: RecommendThresholds,
    /// Extra or replacement postcode area to region mappings, keyed by
    /// upper-case area letters
    pub postcode_areas: HashMap<String, Region>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        let regions = HashMap::from([
            (Region::Scotland, RegionClimate::new(8.5, 3200.0, 850.0)),
            (Region::NorthEast, RegionClimate::new(9.0, 3000.0, 900.0)),
            (Region::NorthWest, RegionClimate::new(9.5, 2900.0, 900.0)),
            (Region::Yorkshire, RegionClimate::new(9.5, 2850.0, 950.0)),
            (Region::EastMidlands, RegionClimate::new(10.0, 2700.0, 975.0)),
            (Region::WestMidlands, RegionClimate::new(10.0, 2750.0, 950.0)),
            (Region::East, RegionClimate::new(10.5, 2600.0, 1000.0)),
            (Region::London, RegionClimate::new(11.0, 2400.0, 1050.0)),
            (Region::SouthEast, RegionClimate::new(10.5, 2500.0, 1050.0)),
            (Region::SouthWest, RegionClimate::new(10.5, 2550.0, 1000.0)),
            (Region::Wales, RegionClimate::new(9.5, 2800.0, 900.0)),
            (Region::NorthernIreland, RegionClimate::new(9.0, 3000.0, 850.0)),
            (Region::Default, UK_AVERAGE_CLIMATE),
        ]);

        let insulation = [
            (InsulationRating::A, 0.6, 40.0),
            (InsulationRating::B, 0.7, 60.0),
            (InsulationRating::C, 0.85, 80.0),
            (InsulationRating::D, 1.0, 100.0),
            (InsulationRating::E, 1.2, 130.0),
            (InsulationRating::F, 1.4, 160.0),
            (InsulationRating::G, 1.6, 200.0),
            (InsulationRating::Unknown, 1.0, 100.0),
        ]
        .into_iter()
        .map(|(rating, heat_loss, demand)| {
            (
                rating,
                InsulationFactors {
                    heat_loss_multiplier: heat_loss,
                    heat_demand_kwh_per_m2: demand,
                },
            )
        })
        .collect();

        let roof_efficiency = HashMap::from([
            (RoofOrientation::SouthFacing, 1.0),
            (RoofOrientation::SouthWest, 0.95),
            (RoofOrientation::SouthEast, 0.95),
            (RoofOrientation::EastWest, 0.85),
            (RoofOrientation::NorthFacing, 0.7),
            (RoofOrientation::Flat, 0.9),
            (RoofOrientation::Unknown, 0.9),
        ]);

        Self {
            regions,
            insulation,
            roof_efficiency,
            solar: SolarReference::default(),
            heat_pump: HeatPumpReference::default(),
            boiler: BoilerReference::default(),
            battery: BatteryReference::default(),
            grants: Grants::default(),
            carbon: CarbonIntensity::default(),
            savings: SavingsRates::default(),
            measures: MeasureCosts::default(),
            benchmarks: UkBenchmarks::default(),
            suitability: SuitabilityWeights::default(),
            thresholds: RecommendThresholds::default(),
            postcode_areas: HashMap::new(),
        }
    }
}

impl ReferenceData {
    /// Load tables, applying the override file if one is found
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        load_reference(override_path)
    }

    /// Parse an override TOML document on top of the built-in tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_reference(content)
    }

    /// Climate for a region, falling back to the UK average
    pub fn climate(&self, region: Region) -> RegionClimate {
        self.regions
            .get(&region)
            .or_else(|| self.regions.get(&Region::Default))
            .copied()
            .unwrap_or(UK_AVERAGE_CLIMATE)
    }

    pub fn insulation_factors(&self, rating: InsulationRating) -> InsulationFactors {
        self.insulation
            .get(&rating)
            .or_else(|| self.insulation.get(&InsulationRating::Unknown))
            .copied()
            .unwrap_or(UNKNOWN_INSULATION)
    }

    pub fn roof_efficiency(&self, orientation: RoofOrientation) -> f64 {
        self.roof_efficiency
            .get(&orientation)
            .or_else(|| self.roof_efficiency.get(&RoofOrientation::Unknown))
            .copied()
            .unwrap_or(0.9)
    }

    /// Region for a postcode, honouring any area overrides
    pub fn region_for(&self, postal_prefix: &str) -> Region {
        resolve_region_with(postal_prefix, &self.postcode_areas)
    }

    /// Check that every table value the calculators divide by or scale with
    /// is usable
    pub fn validate(&self) -> Result<()> {
        for (region, climate) in &self.regions {
            if climate.solar_yield_kwh_per_kwp <= 0.0
                || climate.heating_degree_days <= 0.0
                || climate.average_temperature_c <= 0.0
            {
                return Err(Error::Config(format!(
                    "region {} needs positive temperature, solar yield and degree days",
                    region
                )));
            }
        }
        for (rating, factors) in &self.insulation {
            if factors.heat_loss_multiplier <= 0.0 || factors.heat_demand_kwh_per_m2 <= 0.0 {
                return Err(Error::Config(format!(
                    "insulation band {} needs positive factors",
                    rating
                )));
            }
        }
        for (orientation, efficiency) in &self.roof_efficiency {
            if !(0.0..=1.0).contains(efficiency) {
                return Err(Error::Config(format!(
                    "roof efficiency for {} must be between 0 and 1",
                    orientation
                )));
            }
        }

        let positive = [
            ("solar.panel_watts", self.solar.panel_watts),
            ("solar.roof_m2_per_kwp", self.solar.roof_m2_per_kwp),
            ("solar.size_step_kwp", self.solar.size_step_kwp),
            ("solar.min_kwp", self.solar.min_kwp),
            ("solar.max_kwp", self.solar.max_kwp),
            ("heat_pump.design_heat_loss_w_per_m2", self.heat_pump.design_heat_loss_w_per_m2),
            ("heat_pump.space_heating_share", self.heat_pump.space_heating_share),
            ("heat_pump.scop_warm", self.heat_pump.scop_warm),
            ("heat_pump.scop_mild", self.heat_pump.scop_mild),
            ("heat_pump.scop_cold", self.heat_pump.scop_cold),
            ("boiler.efficiency", self.boiler.efficiency),
            ("benchmarks.monthly_dual_fuel_gbp", self.benchmarks.monthly_dual_fuel_gbp),
            ("suitability.solar_yield_span", self.suitability.solar_yield_span),
            ("thresholds.fixed_tariff_spend_ratio", self.thresholds.fixed_tariff_spend_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be greater than zero", name)));
            }
        }
        for tier in Tier::all() {
            if self.solar.cost_per_kwp.get(*tier) <= 0.0 {
                return Err(Error::Config(format!(
                    "solar.cost_per_kwp.{} must be greater than zero",
                    tier
                )));
            }
        }
        if self.solar.min_kwp > self.solar.max_kwp {
            return Err(Error::Config(
                "solar.min_kwp cannot exceed solar.max_kwp".to_string(),
            ));
        }

        let battery = &self.battery;
        if !(0.0..=1.0).contains(&battery.low_daytime_fraction)
            || !(0.0..=1.0).contains(&battery.high_daytime_fraction)
            || battery.low_daytime_fraction > battery.high_daytime_fraction
        {
            return Err(Error::Config(
                "battery daytime fractions must be between 0 and 1 with low <= high".to_string(),
            ));
        }

        let weights = &self.suitability;
        let bands = weights
            .heat_pump_insulation
            .iter()
            .chain(&weights.heat_pump_climate)
            .chain(&weights.solar_usage)
            .chain(&weights.solar_payback);
        for band in bands {
            if !band.limit.is_finite() || !band.points.is_finite() || band.points < 0.0 {
                return Err(Error::Config(
                    "suitability bands need finite limits and non-negative points".to_string(),
                ));
            }
        }
        if !weights.base_score.is_finite() {
            return Err(Error::Config(
                "suitability.base_score must be a finite number".to_string(),
            ));
        }

        let thresholds = &self.thresholds;
        if thresholds.cavity_wall_built_from >= thresholds.cavity_wall_built_before {
            return Err(Error::Config(
                "thresholds.cavity_wall_built_from must be before cavity_wall_built_before"
                    .to_string(),
            ));
        }

        for (area, region) in &self.postcode_areas {
            let valid = (1..=2).contains(&area.len())
                && area.chars().all(|c| c.is_ascii_uppercase());
            if !valid {
                return Err(Error::Config(format!(
                    "postcode area '{}' for {} must be one or two letters",
                    area, region
                )));
            }
        }
        Ok(())
    }
}

/// Default override path
pub fn default_reference_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("wattwise").join("reference.toml"))
}

/// Load tables (explicit override, then default location, then built-ins)
fn load_reference(override_path: Option<&Path>) -> Result<ReferenceData> {
    if let Some(path) = override_path {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Reference file not found: {}",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "Loading reference overrides");
        let content = fs::read_to_string(path)?;
        return parse_reference(&content);
    }

    if let Some(default_path) = default_reference_path() {
        if default_path.exists() {
            tracing::debug!(path = %default_path.display(), "Loading reference overrides");
            let content = fs::read_to_string(&default_path)?;
            return parse_reference(&content);
        }
    }

    Ok(ReferenceData::default())
}

/// Raw override structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReference {
    regions: Option<HashMap<String, RawRegion>>,
    insulation: Option<HashMap<String, RawInsulation>>,
    roof_efficiency: Option<HashMap<String, f64>>,
    solar: Option<SolarReference>,
    heat_pump: Option<HeatPumpReference>,
    boiler: Option<BoilerReference>,
    battery: Option<BatteryReference>,
    grants: Option<Grants>,
    carbon: Option<CarbonIntensity>,
    savings: Option<SavingsRates>,
    measures: Option<MeasureCosts>,
    benchmarks: Option<RawBenchmarks>,
    suitability: Option<SuitabilityWeights>,
    thresholds: Option<RecommendThresholds>,
    postcode_areas: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    average_temperature_c: Option<f64>,
    heating_degree_days: Option<f64>,
    solar_yield_kwh_per_kwp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsulation {
    heat_loss_multiplier: Option<f64>,
    heat_demand_kwh_per_m2: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBenchmarks {
    monthly_dual_fuel_gbp: Option<f64>,
    base_electricity_kwh: Option<f64>,
    base_gas_kwh: Option<f64>,
    dwelling_multiplier: Option<HashMap<String, f64>>,
    daily_cost_gbp: Option<HashMap<String, f64>>,
}

fn parse_key<T>(section: &str, key: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    key.parse::<T>()
        .map_err(|e| Error::Config(format!("[{}] {}", section, e)))
}

/// Parse override TOML and layer it onto the built-in tables
fn parse_reference(content: &str) -> Result<ReferenceData> {
    let raw: RawReference = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid reference TOML: {}", e)))?;

    let mut reference = ReferenceData::default();

    if let Some(regions) = raw.regions {
        for (name, overrides) in regions {
            let region: Region = parse_key("regions", &name)?;
            let climate = reference.regions.entry(region).or_insert(UK_AVERAGE_CLIMATE);
            if let Some(temp) = overrides.average_temperature_c {
                climate.average_temperature_c = temp;
            }
            if let Some(hdd) = overrides.heating_degree_days {
                climate.heating_degree_days = hdd;
            }
            if let Some(yield_kwh) = overrides.solar_yield_kwh_per_kwp {
                climate.solar_yield_kwh_per_kwp = yield_kwh;
            }
        }
    }

    if let Some(insulation) = raw.insulation {
        for (name, overrides) in insulation {
            let rating: InsulationRating = parse_key("insulation", &name)?;
            let factors = reference.insulation.entry(rating).or_insert(UNKNOWN_INSULATION);
            if let Some(heat_loss) = overrides.heat_loss_multiplier {
                factors.heat_loss_multiplier = heat_loss;
            }
            if let Some(demand) = overrides.heat_demand_kwh_per_m2 {
                factors.heat_demand_kwh_per_m2 = demand;
            }
        }
    }

    if let Some(roofs) = raw.roof_efficiency {
        for (name, efficiency) in roofs {
            let orientation: RoofOrientation = parse_key("roof_efficiency", &name)?;
            reference.roof_efficiency.insert(orientation, efficiency);
        }
    }

    if let Some(solar) = raw.solar {
        reference.solar = solar;
    }
    if let Some(heat_pump) = raw.heat_pump {
        reference.heat_pump = heat_pump;
    }
    if let Some(boiler) = raw.boiler {
        reference.boiler = boiler;
    }
    if let Some(battery) = raw.battery {
        reference.battery = battery;
    }
    if let Some(grants) = raw.grants {
        reference.grants = grants;
    }
    if let Some(carbon) = raw.carbon {
        reference.carbon = carbon;
    }
    if let Some(savings) = raw.savings {
        reference.savings = savings;
    }
    if let Some(measures) = raw.measures {
        reference.measures = measures;
    }
    if let Some(suitability) = raw.suitability {
        reference.suitability = suitability;
    }
    if let Some(thresholds) = raw.thresholds {
        reference.thresholds = thresholds;
    }

    for (area, name) in raw.postcode_areas.unwrap_or_default() {
        let region: Region = parse_key("postcode_areas", &name)?;
        reference.postcode_areas.insert(area.trim().to_uppercase(), region);
    }

    if let Some(benchmarks) = raw.benchmarks {
        let target = &mut reference.benchmarks;
        if let Some(monthly) = benchmarks.monthly_dual_fuel_gbp {
            target.monthly_dual_fuel_gbp = monthly;
        }
        if let Some(electricity) = benchmarks.base_electricity_kwh {
            target.base_electricity_kwh = electricity;
        }
        if let Some(gas) = benchmarks.base_gas_kwh {
            target.base_gas_kwh = gas;
        }
        for (name, multiplier) in benchmarks.dwelling_multiplier.unwrap_or_default() {
            let dwelling: DwellingType = parse_key("benchmarks.dwelling_multiplier", &name)?;
            target.dwelling_multiplier.insert(dwelling, multiplier);
        }
        for (name, cost) in benchmarks.daily_cost_gbp.unwrap_or_default() {
            let dwelling: DwellingType = parse_key("benchmarks.daily_cost_gbp", &name)?;
            target.daily_cost_gbp.insert(dwelling, cost);
        }
    }

    reference.validate()?;
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_OVERRIDES: &str = include_str!("../../../config/reference.example.toml");

    #[test]
    fn test_defaults_cover_every_key() {
        let reference = ReferenceData::default();
        assert_eq!(reference.regions.len(), Region::all().len());
        assert_eq!(reference.insulation.len(), InsulationRating::all().len());
        assert_eq!(reference.roof_efficiency.len(), RoofOrientation::all().len());
        for dwelling in DwellingType::all() {
            assert!(reference.benchmarks.dwelling_multiplier.contains_key(dwelling));
            assert!(reference.benchmarks.daily_cost_gbp.contains_key(dwelling));
        }
        assert!(reference.validate().is_ok());
    }

    #[test]
    fn test_default_lookups() {
        let reference = ReferenceData::default();
        assert_eq!(reference.climate(Region::London).solar_yield_kwh_per_kwp, 1050.0);
        assert_eq!(reference.climate(Region::Scotland).average_temperature_c, 8.5);
        assert_eq!(reference.insulation_factors(InsulationRating::C).heat_loss_multiplier, 0.85);
        assert_eq!(reference.insulation_factors(InsulationRating::G).heat_demand_kwh_per_m2, 200.0);
        assert_eq!(reference.roof_efficiency(RoofOrientation::NorthFacing), 0.7);
    }

    #[test]
    fn test_missing_region_falls_back_to_uk_average() {
        let mut reference = ReferenceData::default();
        reference.regions.remove(&Region::Wales);
        assert_eq!(reference.climate(Region::Wales), reference.climate(Region::Default));
    }

    #[test]
    fn test_partial_override_keeps_other_values() {
        let reference = ReferenceData::from_toml_str(
            r#"
            [regions.london]
            solar_yield_kwh_per_kwp = 1100.0

            [grants]
            boiler_upgrade_scheme_gbp = 5000.0

            [savings]
            heat_pump = 0.35
            "#,
        )
        .unwrap();

        let london = reference.climate(Region::London);
        assert_eq!(london.solar_yield_kwh_per_kwp, 1100.0);
        assert_eq!(london.average_temperature_c, 11.0);
        assert_eq!(reference.grants.boiler_upgrade_scheme_gbp, 5000.0);
        assert_eq!(reference.savings.heat_pump, 0.35);
        assert_eq!(reference.savings.thermostat_one_degree, 0.10);
        assert_eq!(reference.solar.panel_watts, 400.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = ReferenceData::from_toml_str("[regions.atlantis]\nheating_degree_days = 1.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("atlantis"));

        assert!(ReferenceData::from_toml_str("[mystery]\nvalue = 1\n").is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = ReferenceData::from_toml_str("[boiler]\nefficiency = 0.0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        assert!(ReferenceData::from_toml_str("[roof_efficiency]\nflat = 1.5\n").is_err());
    }

    #[test]
    fn test_non_positive_climate_and_equipment_values_are_rejected() {
        let err = ReferenceData::from_toml_str("[regions.london]\naverage_temperature_c = -5.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("london"));
        assert!(
            ReferenceData::from_toml_str("[regions.scotland]\naverage_temperature_c = 0.0\n")
                .is_err()
        );

        let err = ReferenceData::from_toml_str("[heat_pump]\nscop_warm = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("scop_warm"));
        let err = ReferenceData::from_toml_str("[heat_pump]\nscop_mild = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("scop_mild"));

        let err = ReferenceData::from_toml_str("[solar]\nmin_kwp = 0.5\nmax_kwp = 0.0\n")
            .unwrap_err();
        assert!(err.to_string().contains("max_kwp"));
    }

    #[test]
    fn test_threshold_sections_override() {
        let reference = ReferenceData::from_toml_str(
            r#"
            [suitability]
            base_score = 45.0

            [thresholds]
            heat_pump_min_spend_gbp = 200.0

            [battery]
            high_daytime_fraction = 0.7
            "#,
        )
        .unwrap();
        assert_eq!(reference.suitability.base_score, 45.0);
        assert_eq!(reference.suitability.solar_yield_floor, 850.0);
        assert_eq!(reference.thresholds.heat_pump_min_spend_gbp, 200.0);
        assert_eq!(reference.thresholds.smart_thermostat_min_spend_gbp, 100.0);
        assert_eq!(reference.battery.high_daytime_fraction, 0.7);
        assert_eq!(reference.battery.low_daytime_fraction, 0.3);

        let inverted = "[thresholds]\ncavity_wall_built_from = 1995\n";
        assert!(ReferenceData::from_toml_str(inverted).is_err());
        let inverted = "[battery]\nlow_daytime_fraction = 0.8\n";
        assert!(ReferenceData::from_toml_str(inverted).is_err());
    }

    #[test]
    fn test_postcode_area_overrides() {
        let reference = ReferenceData::from_toml_str(
            "[postcode_areas]\nje = \"south-west\"\nCH = \"north-west\"\n",
        )
        .unwrap();
        assert_eq!(reference.postcode_areas.get("JE"), Some(&Region::SouthWest));
        assert_eq!(reference.region_for("JE2 3AB"), Region::SouthWest);
        assert_eq!(reference.region_for("CH1 1AA"), Region::NorthWest);
        assert_eq!(reference.region_for("CF10"), Region::Wales);
        assert_eq!(ReferenceData::default().region_for("JE2"), Region::Default);

        let err = ReferenceData::from_toml_str("[postcode_areas]\nJE = \"atlantis\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("atlantis"));
        assert!(ReferenceData::from_toml_str("[postcode_areas]\nJE2 = \"wales\"\n").is_err());
    }

    #[test]
    fn test_example_file_parses() {
        let reference = ReferenceData::from_toml_str(EXAMPLE_OVERRIDES).unwrap();
        assert!(reference.validate().is_ok());
        assert_eq!(reference.suitability, SuitabilityWeights::default());
        assert_eq!(reference.thresholds, RecommendThresholds::default());
        assert_eq!(reference.region_for("GY1"), Region::SouthWest);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.toml");
        fs::write(&path, "[carbon]\ngrid_kg_per_kwh = 0.2\n").unwrap();

        let reference = ReferenceData::load(Some(&path)).unwrap();
        assert_eq!(reference.carbon.grid_kg_per_kwh, 0.2);
        assert_eq!(reference.carbon.gas_kg_per_kwh, 0.203);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReferenceData::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
