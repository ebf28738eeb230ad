//! Suitability scoring
//!
//! Heuristic 0-100 scores for how well a home suits solar or a heat pump.
//! Scores start at a base value and add capped sub-scores; they are advisory
//! only. Every weight comes from
//! [`SuitabilityWeights`](crate::reference::SuitabilityWeights).

use serde::{Deserialize, Serialize};

use crate::models::{DwellingType, InsulationRating, Payback, RadiatorType, RoofOrientation};
use crate::reference::{band_points, ReferenceData};
use crate::region::Region;

/// Integer score between 0 and 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuitabilityScore(u8);

impl SuitabilityScore {
    /// Round and clamp a raw score
    pub fn from_raw(raw: f64) -> Self {
        let clamped = if raw.is_finite() { raw.round().clamp(0.0, 100.0) } else { 0.0 };
        Self(clamped as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Short verdict for reports
    pub fn label(&self) -> &'static str {
        match self.0 {
            70..=100 => "well suited",
            50..=69 => "feasible",
            _ => "needs work",
        }
    }
}

impl std::fmt::Display for SuitabilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// How well a home suits an air-source heat pump
pub fn score_heat_pump(
    insulation: InsulationRating,
    region: Region,
    radiators: RadiatorType,
    dwelling: DwellingType,
    reference: &ReferenceData,
) -> SuitabilityScore {
    let weights = &reference.suitability;

    let heat_loss = reference.insulation_factors(insulation).heat_loss_multiplier;
    let insulation_points = band_points(&weights.heat_pump_insulation, |limit| heat_loss <= limit);

    // Milder climates suit heat pumps better
    let temperature = reference.climate(region).average_temperature_c;
    let climate_points = band_points(&weights.heat_pump_climate, |limit| temperature >= limit);

    let radiator_points = match radiators {
        RadiatorType::Underfloor => weights.underfloor_points,
        RadiatorType::Oversized => weights.oversized_radiator_points,
        RadiatorType::Standard => weights.standard_radiator_points,
    };

    let property_points = match dwelling {
        DwellingType::Detached | DwellingType::SemiDetached => weights.house_points,
        DwellingType::Bungalow => weights.bungalow_points,
        DwellingType::Flat | DwellingType::Terraced => weights.compact_home_points,
    };

    let score = SuitabilityScore::from_raw(
        weights.base_score + insulation_points + climate_points + radiator_points + property_points,
    );
    tracing::debug!(
        insulation = insulation.as_str(),
        region = region.as_str(),
        score = score.value(),
        "Scored heat pump suitability"
    );
    score
}

/// How well a home suits rooftop solar
pub fn score_solar(
    region: Region,
    orientation: RoofOrientation,
    annual_usage_kwh: f64,
    payback: Payback,
    reference: &ReferenceData,
) -> SuitabilityScore {
    let weights = &reference.suitability;

    let sunlight = reference.climate(region).solar_yield_kwh_per_kwp;
    let max_climate = weights.solar_climate_max_points;
    let climate_points = ((sunlight - weights.solar_yield_floor) / weights.solar_yield_span
        * max_climate)
        .clamp(0.0, max_climate.max(0.0));

    let roof_points = reference.roof_efficiency(orientation) * weights.solar_roof_max_points;

    let usage_points = band_points(&weights.solar_usage, |limit| annual_usage_kwh > limit);

    let payback_points = match payback.years() {
        Some(years) => band_points(&weights.solar_payback, |limit| years < limit),
        None => 0.0,
    };

    let score = SuitabilityScore::from_raw(
        weights.base_score + climate_points + roof_points + usage_points + payback_points,
    );
    tracing::debug!(
        region = region.as_str(),
        orientation = orientation.as_str(),
        score = score.value(),
        "Scored solar suitability"
    );
    score
}
