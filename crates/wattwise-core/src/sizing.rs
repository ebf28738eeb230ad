//! Equipment sizing
//!
//! Solar arrays are sized to cover most of a household's annual electricity
//! use, bounded by installer limits and roof area. Heat pumps are sized from
//! design heat loss over the floor area, with headroom for hot water.

use crate::error::{ensure_positive, Error, Result};
use crate::models::InsulationRating;
use crate::reference::ReferenceData;
use crate::region::Region;

/// Recommended solar array size (kWp)
///
/// Targets 90% of annual usage at the region's yield, rounded to the nearest
/// half kWp and clamped to the installer range. A supplied roof area caps the
/// result last, so a small roof can bring the size under the minimum. A roof
/// that cannot hold a single panel is an error.
pub fn size_solar(
    annual_usage_kwh: f64,
    region: Region,
    roof_area_m2: Option<f64>,
    reference: &ReferenceData,
) -> Result<f64> {
    ensure_positive("annual electricity usage", annual_usage_kwh)?;
    if let Some(area) = roof_area_m2 {
        ensure_positive("roof area", area)?;
    }

    let solar = &reference.solar;
    let yield_kwh = reference.climate(region).solar_yield_kwh_per_kwp;

    let target = annual_usage_kwh * solar.target_usage_fraction / yield_kwh;
    let stepped = (target / solar.size_step_kwp).round() * solar.size_step_kwp;
    let mut size = stepped.clamp(solar.min_kwp, solar.max_kwp);

    if let Some(area) = roof_area_m2 {
        let roof_limit = area / solar.roof_m2_per_kwp;
        let single_panel_kwp = solar.panel_watts / 1000.0;
        if roof_limit < single_panel_kwp {
            return Err(Error::InvalidInput(format!(
                "roof area of {} m² is too small for a single panel (needs {} m²)",
                area,
                single_panel_kwp * solar.roof_m2_per_kwp
            )));
        }
        if roof_limit < size {
            tracing::debug!(roof_area_m2 = area, roof_limit, "Solar size limited by roof");
            size = roof_limit;
        }
    }

    tracing::debug!(
        region = region.as_str(),
        usage_kwh = annual_usage_kwh,
        size_kwp = size,
        "Sized solar array"
    );
    Ok(size)
}

/// Number of panels needed for an array, rounding up
pub fn panel_count(size_kwp: f64, reference: &ReferenceData) -> u32 {
    (size_kwp * 1000.0 / reference.solar.panel_watts).ceil().max(0.0) as u32
}

/// Estimate floor area (m²) from annual gas use
///
/// Assumes most gas goes on space heating at the band's typical demand.
pub fn estimate_floor_area(
    annual_gas_kwh: f64,
    insulation: InsulationRating,
    reference: &ReferenceData,
) -> Result<f64> {
    ensure_positive("annual gas usage", annual_gas_kwh)?;
    let demand = reference
        .insulation_factors(insulation)
        .heat_demand_kwh_per_m2;
    let area = (annual_gas_kwh * reference.heat_pump.space_heating_share / demand).round();
    Ok(area.max(1.0))
}

/// Recommended heat pump capacity (whole kW)
///
/// Design heat loss is floor area × 70 W/m² scaled by the insulation band,
/// plus 20% for hot water, rounded up. Floor area is estimated from gas use
/// when not supplied. The design loss figure is the same for every region;
/// regional climate enters through SCOP instead.
pub fn size_heat_pump(
    annual_gas_kwh: f64,
    floor_area_m2: Option<f64>,
    insulation: InsulationRating,
    region: Region,
    reference: &ReferenceData,
) -> Result<u32> {
    let floor_area = match floor_area_m2 {
        Some(area) => {
            ensure_positive("floor area", area)?;
            area
        }
        None => estimate_floor_area(annual_gas_kwh, insulation, reference)?,
    };

    let heat_pump = &reference.heat_pump;
    let heat_loss = reference.insulation_factors(insulation).heat_loss_multiplier;
    let peak_watts = floor_area * heat_pump.design_heat_loss_w_per_m2 * heat_loss;
    let capacity_kw = peak_watts * (1.0 + heat_pump.hot_water_uplift) / 1000.0;
    let size = capacity_kw.ceil().max(1.0) as u32;

    tracing::debug!(
        region = region.as_str(),
        floor_area_m2 = floor_area,
        insulation = insulation.as_str(),
        size_kw = size,
        "Sized heat pump"
    );
    Ok(size)
}
