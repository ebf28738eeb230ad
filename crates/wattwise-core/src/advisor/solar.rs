//! Solar PV advisor

use serde::{Deserialize, Serialize};

use crate::costs::{
    battery_advice, payback, solar_co2_reduction_kg, solar_options, BatteryAdvice, EnergyRates,
    SystemOption,
};
use crate::error::{Error, Result};
use crate::models::{HouseholdProfile, Payback, RoofOrientation, Tier};
use crate::projection::{project, Projection, ProjectionConfig};
use crate::reference::ReferenceData;
use crate::region::Region;
use crate::sizing::{panel_count, size_solar};
use crate::suitability::{score_solar, SuitabilityScore};

/// Payback beyond this many years gets a warning
const LONG_PAYBACK_YEARS: f64 = 15.0;

/// Regions below this yield (kWh/kWp) get a low-sunlight warning
const LOW_YIELD_KWH_PER_KWP: f64 = 900.0;

/// Everything a household needs to decide on rooftop solar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReport {
    pub region: Region,
    /// kWp
    pub size_kwp: f64,
    pub panel_count: u32,
    /// kWh/year
    pub annual_generation_kwh: f64,
    pub self_consumption_kwh: f64,
    pub export_kwh: f64,
    /// £/year
    pub export_income: f64,
    /// Self-consumption savings plus export income (£/year)
    pub annual_savings: f64,
    /// Standard tier price (£)
    pub system_cost: f64,
    pub payback: Payback,
    /// kg/year
    pub co2_reduction_kg: f64,
    pub battery: BatteryAdvice,
    pub projection: Projection,
    /// Cumulative savings at the end of the projection (£)
    pub lifetime_savings: f64,
    pub roi_percent: Option<f64>,
    pub options: Vec<SystemOption>,
    pub suitability: SuitabilityScore,
    pub warnings: Vec<String>,
}

impl SolarReport {
    pub fn option(&self, tier: Tier) -> Option<&SystemOption> {
        self.options.iter().find(|o| o.tier == tier)
    }
}

/// Builds solar reports from household profiles
pub struct SolarAdvisor<'a> {
    reference: &'a ReferenceData,
}

impl<'a> SolarAdvisor<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    pub fn advise(&self, profile: &HouseholdProfile) -> Result<SolarReport> {
        profile.validate()?;
        let reference = self.reference;

        let region = reference.region_for(&profile.postcode);
        let usage = profile.annual_electricity_kwh;
        let orientation = profile.roof_orientation;
        let daytime_fraction = profile.daytime_fraction();
        let rates = EnergyRates::from_profile(profile);

        let size_kwp = size_solar(usage, region, profile.roof_area_m2, reference)?;
        let panels = panel_count(size_kwp, reference);

        let yield_kwh = reference.climate(region).solar_yield_kwh_per_kwp;
        let generation = (size_kwp * yield_kwh * reference.roof_efficiency(orientation)).round();
        let self_consumption = (generation * daytime_fraction).round();
        let export = generation - self_consumption;

        let self_consumption_savings = self_consumption * rates.electricity_pence / 100.0;
        let export_income = export * rates.export_pence / 100.0;
        let annual_savings = (self_consumption_savings + export_income).round();

        let options = solar_options(
            size_kwp,
            region,
            orientation,
            daytime_fraction,
            &rates,
            reference,
        )?;
        let system_cost = options
            .iter()
            .find(|o| o.tier == Tier::Standard)
            .map(|o| o.cost)
            .ok_or_else(|| Error::InvalidInput("no standard solar option".to_string()))?;
        let payback = payback(system_cost, annual_savings);

        let battery = battery_advice(export, daytime_fraction, &rates, reference);
        let projection = project(
            annual_savings,
            system_cost,
            &ProjectionConfig::solar().with_generation(generation),
        )?;

        let suitability = score_solar(region, orientation, usage, payback, reference);

        let mut warnings = Vec::new();
        if orientation == RoofOrientation::NorthFacing {
            warnings.push(
                "North-facing roofs generate 30% less energy. Consider east-west split if possible."
                    .to_string(),
            );
        }
        if !payback.is_within(LONG_PAYBACK_YEARS) {
            warnings.push(
                "Long payback period. Consider a smaller system or wait for prices to drop."
                    .to_string(),
            );
        }
        if profile.roof_area_m2.is_some() {
            let unconstrained = size_solar(usage, region, None, reference)?;
            if size_kwp < unconstrained {
                warnings.push("Limited roof space may restrict system size.".to_string());
            }
        }
        if yield_kwh < LOW_YIELD_KWH_PER_KWP {
            warnings.push(
                "Your region has lower sunlight hours. Payback will be longer than southern regions."
                    .to_string(),
            );
        }

        tracing::debug!(
            region = region.as_str(),
            size_kwp,
            annual_savings,
            payback = %payback,
            warnings = warnings.len(),
            "Built solar report"
        );

        Ok(SolarReport {
            region,
            size_kwp,
            panel_count: panels,
            annual_generation_kwh: generation,
            self_consumption_kwh: self_consumption,
            export_kwh: export,
            export_income: export_income.round(),
            annual_savings,
            system_cost,
            payback,
            co2_reduction_kg: solar_co2_reduction_kg(generation, reference).round(),
            battery,
            lifetime_savings: projection.lifetime_savings(),
            roi_percent: projection.roi_percent().map(f64::round),
            projection,
            options,
            suitability,
            warnings,
        })
    }
}
