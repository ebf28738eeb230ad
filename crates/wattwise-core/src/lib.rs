//! Wattwise Core Library
//!
//! Household energy economics for UK homes:
//! - Postcode area to climate region resolution
//! - Overridable reference tables (climate, insulation, prices, grants)
//! - Solar PV and heat pump sizing
//! - Running costs, savings, payback and tiered system options
//! - Multi-year savings projection with degradation and price inflation
//! - Heuristic suitability scoring
//! - Pluggable recommendation engine for savings actions
//! - Tariff comparison and usage estimation
//! - End-to-end solar and heat pump advisors
//!
//! Every calculator is synchronous and side-effect free. File access is
//! limited to the explicit loaders (`ReferenceData::load`,
//! `TariffCatalog::load`).

pub mod advisor;
pub mod costs;
pub mod error;
pub mod models;
pub mod projection;
pub mod recommend;
pub mod reference;
pub mod region;
pub mod sizing;
pub mod suitability;
pub mod tariff;

pub use advisor::{
    HeatPumpAdvisor, HeatPumpReport, SolarAdvisor, SolarReport, UpgradePriority,
    UpgradeRecommendation,
};
pub use costs::{
    annual_running_cost, annual_savings, battery_advice, heat_pump_installation,
    heat_pump_options, payback, scop, solar_options, solar_value, BatteryAdvice, EnergyRates,
    EnergySystem, InstallationCost, InstallerPartner, SolarValue, SystemKind, SystemOption,
};
pub use error::{Error, Result};
pub use models::{
    DwellingType, HeatingSystem, HouseholdProfile, InsulationRating, Payback, RadiatorType,
    RoofOrientation, Tier,
};
pub use projection::{project, BreakEven, Projection, ProjectionConfig, ProjectionPoint};
pub use recommend::{
    summarize, Category, Confidence, Difficulty, GenerateOptions, Recommendation,
    RecommendationContext, RecommendationEngine, RecommendationSource, SavingsSummary, Season,
    SourceKind,
};
pub use reference::{default_reference_path, ReferenceData};
pub use region::{postcode_area, resolve_region, resolve_region_with, Region, RegionProfile};
pub use sizing::{estimate_floor_area, panel_count, size_heat_pump, size_solar};
pub use suitability::{score_heat_pump, score_solar, SuitabilityScore};
pub use tariff::{
    compare, estimate_annual_usage, CompareOptions, Tariff, TariffCatalog, TariffComparison,
    TariffRegion, TariffType, Usage,
};
