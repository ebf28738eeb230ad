//! Cost and savings calculators
//!
//! Running costs for the household's current and candidate systems, the
//! savings between them, SCOP estimates, priced budget/standard/premium
//! options and home battery advice.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Error, Result};
use crate::models::{HouseholdProfile, InsulationRating, Payback, RadiatorType, RoofOrientation, Tier};
use crate::reference::ReferenceData;
use crate::region::Region;
use crate::sizing::panel_count;

/// Unit rates used to price energy (pence/kWh)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRates {
    pub electricity_pence: f64,
    pub gas_pence: f64,
    /// Paid for exported solar generation
    pub export_pence: f64,
}

impl EnergyRates {
    pub fn new(electricity_pence: f64, gas_pence: f64, export_pence: f64) -> Self {
        Self {
            electricity_pence,
            gas_pence,
            export_pence,
        }
    }

    pub fn from_profile(profile: &HouseholdProfile) -> Self {
        Self::new(
            profile.electricity_rate_pence,
            profile.gas_rate_pence,
            profile.export_rate(),
        )
    }
}

/// A heating or generation system that can be priced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergySystem {
    /// Baseline: gas boiler heating
    GasBoiler,
    /// Air-source heat pump with the given SCOP
    HeatPump { scop: f64 },
    /// Grid electricity offset by a solar array
    Solar {
        generation_kwh: f64,
        daytime_fraction: f64,
    },
}

/// What a year of solar generation is worth to the household
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarValue {
    pub generation_kwh: f64,
    pub self_consumed_kwh: f64,
    pub exported_kwh: f64,
    /// Grid electricity avoided (£)
    pub self_consumption_savings: f64,
    /// Export payments (£)
    pub export_income: f64,
}

impl SolarValue {
    /// Total annual value (£)
    pub fn total(&self) -> f64 {
        self.self_consumption_savings + self.export_income
    }
}

/// Split generation into self-consumption and export, and price both
pub fn solar_value(generation_kwh: f64, daytime_fraction: f64, rates: &EnergyRates) -> SolarValue {
    let self_consumed = generation_kwh * daytime_fraction;
    let exported = generation_kwh - self_consumed;
    SolarValue {
        generation_kwh,
        self_consumed_kwh: self_consumed,
        exported_kwh: exported,
        self_consumption_savings: self_consumed * rates.electricity_pence / 100.0,
        export_income: exported * rates.export_pence / 100.0,
    }
}

/// Seasonal coefficient of performance for a heat pump
///
/// Banded on the region's mean temperature, with a bonus for well insulated
/// homes, rounded to one decimal place.
pub fn scop(region: Region, insulation: InsulationRating, reference: &ReferenceData) -> f64 {
    let heat_pump = &reference.heat_pump;
    let temperature = reference.climate(region).average_temperature_c;

    let mut value = if temperature >= heat_pump.warm_region_min_temp_c {
        heat_pump.scop_warm
    } else if temperature >= heat_pump.mild_region_min_temp_c {
        heat_pump.scop_mild
    } else {
        heat_pump.scop_cold
    };

    let heat_loss = reference.insulation_factors(insulation).heat_loss_multiplier;
    if heat_loss < heat_pump.insulation_bonus_threshold {
        value += heat_pump.insulation_scop_bonus;
    }

    (value * 10.0).round() / 10.0
}

/// Annual running cost (£)
///
/// `usage_kwh` is the heat demand as gas-equivalent kWh for heating systems,
/// and the household's electricity use for solar. The solar cost is the net
/// grid bill: imported electricity less export income.
pub fn annual_running_cost(
    system: &EnergySystem,
    usage_kwh: f64,
    rates: &EnergyRates,
    reference: &ReferenceData,
) -> Result<f64> {
    ensure_positive("usage", usage_kwh)?;

    let cost = match *system {
        EnergySystem::GasBoiler => {
            ensure_positive("gas rate", rates.gas_pence)?;
            let boiler = &reference.boiler;
            usage_kwh / boiler.efficiency * rates.gas_pence / 100.0 + boiler.annual_maintenance_gbp
        }
        EnergySystem::HeatPump { scop } => {
            ensure_positive("SCOP", scop)?;
            ensure_positive("electricity rate", rates.electricity_pence)?;
            usage_kwh / scop * rates.electricity_pence / 100.0
        }
        EnergySystem::Solar {
            generation_kwh,
            daytime_fraction,
        } => {
            ensure_positive("electricity rate", rates.electricity_pence)?;
            if generation_kwh < 0.0 || !(0.0..=1.0).contains(&daytime_fraction) {
                return Err(Error::InvalidInput(format!(
                    "solar generation must be non-negative and daytime fraction within 0-1 (got {}, {})",
                    generation_kwh, daytime_fraction
                )));
            }
            let value = solar_value(generation_kwh, daytime_fraction, rates);
            let imported = (usage_kwh - value.self_consumed_kwh).max(0.0);
            imported * rates.electricity_pence / 100.0 - value.export_income
        }
    };

    Ok(cost)
}

/// Baseline minus new cost; negative when the new system costs more
pub fn annual_savings(baseline_cost: f64, new_cost: f64) -> f64 {
    baseline_cost - new_cost
}

/// Simple payback period for an upfront cost
pub fn payback(cost: f64, annual_savings: f64) -> Payback {
    Payback::from_cost_and_savings(cost, annual_savings)
}

/// Which system a priced option is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemKind {
    Solar,
    HeatPump,
}

impl SystemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::HeatPump => "heat-pump",
        }
    }
}

/// An installer the user can request quotes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallerPartner {
    pub name: String,
    pub description: String,
    pub link: String,
    pub rating: f64,
    pub review_count: u32,
    pub average_install_time: String,
}

impl InstallerPartner {
    fn new(
        name: &str,
        description: &str,
        link: &str,
        rating: f64,
        review_count: u32,
        average_install_time: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            link: link.to_string(),
            rating,
            review_count,
            average_install_time: average_install_time.to_string(),
        }
    }
}

/// Solar installers offered with every solar option
pub fn solar_partners() -> Vec<InstallerPartner> {
    vec![
        InstallerPartner::new(
            "Octopus Energy Solar",
            "UK leading renewable installer with excellent customer service",
            "/partners/octopus-solar",
            4.7,
            3421,
            "4-6 weeks",
        ),
        InstallerPartner::new(
            "British Gas Solar",
            "Trusted brand with nationwide coverage",
            "/partners/british-gas-solar",
            4.4,
            2156,
            "6-8 weeks",
        ),
        InstallerPartner::new(
            "EvoEnergy",
            "Specialist solar installer with competitive pricing",
            "/partners/evo-energy",
            4.6,
            1893,
            "3-5 weeks",
        ),
    ]
}

/// A priced equipment choice at one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemOption {
    pub tier: Tier,
    pub kind: SystemKind,
    /// kWp for solar, kW for heat pumps
    pub capacity_kw: f64,
    /// Panels for solar, 1 for a heat pump
    pub unit_count: u32,
    /// Upfront cost after any grant (£)
    pub cost: f64,
    /// Solar only (kWh/year)
    pub annual_generation_kwh: Option<f64>,
    /// Heat pump only (£/year)
    pub annual_running_cost: Option<f64>,
    pub annual_savings: f64,
    pub payback: Payback,
    pub equipment: String,
    pub warranty: String,
    pub efficiency: String,
    pub features: Vec<String>,
    pub partners: Vec<InstallerPartner>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn solar_features(tier: Tier) -> Vec<String> {
    match tier {
        Tier::Budget => strings(&[
            "Tier 1 polycrystalline panels",
            "16-18% efficiency",
            "10-year product warranty",
            "25-year performance warranty",
            "Standard inverter",
            "Basic monitoring app",
        ]),
        Tier::Standard => strings(&[
            "Tier 1 monocrystalline panels",
            "19-21% efficiency",
            "12-year product warranty",
            "25-year performance warranty",
            "Smart inverter with optimisation",
            "Advanced monitoring",
        ]),
        Tier::Premium => strings(&[
            "Premium monocrystalline panels",
            "21-23% efficiency",
            "25-year product warranty",
            "25-year performance warranty",
            "Battery-ready premium inverter",
            "Monitoring with energy management",
            "All-black aesthetics",
        ]),
    }
}

/// Budget, standard and premium solar options for an array size
pub fn solar_options(
    size_kwp: f64,
    region: Region,
    orientation: RoofOrientation,
    daytime_fraction: f64,
    rates: &EnergyRates,
    reference: &ReferenceData,
) -> Result<Vec<SystemOption>> {
    ensure_positive("system size", size_kwp)?;
    ensure_positive("electricity rate", rates.electricity_pence)?;

    let solar = &reference.solar;
    let single_panel_kwp = solar.panel_watts / 1000.0;
    if size_kwp < single_panel_kwp {
        return Err(Error::InvalidInput(format!(
            "system size of {} kWp is smaller than a single {} W panel",
            size_kwp, solar.panel_watts
        )));
    }
    let yield_kwh = reference.climate(region).solar_yield_kwh_per_kwp;
    let roof_efficiency = reference.roof_efficiency(orientation);
    let panels = panel_count(size_kwp, reference);

    let options: Vec<SystemOption> = Tier::all()
        .iter()
        .map(|&tier| {
            let cost = (size_kwp * solar.cost_per_kwp.get(tier)).round();
            let generation =
                size_kwp * yield_kwh * roof_efficiency * solar.efficiency_multiplier.get(tier);
            let savings = solar_value(generation, daytime_fraction, rates).total().round();

            let (equipment, warranty, efficiency) = match tier {
                Tier::Budget => ("Polycrystalline", "10 years product", "16-18%"),
                Tier::Standard => ("Monocrystalline", "12 years product", "19-21%"),
                Tier::Premium => ("Premium Monocrystalline", "25 years full", "21-23%"),
            };

            SystemOption {
                tier,
                kind: SystemKind::Solar,
                capacity_kw: size_kwp,
                unit_count: panels,
                cost,
                annual_generation_kwh: Some(generation.round()),
                annual_running_cost: None,
                annual_savings: savings,
                payback: payback(cost, savings),
                equipment: equipment.to_string(),
                warranty: warranty.to_string(),
                efficiency: efficiency.to_string(),
                features: solar_features(tier),
                partners: solar_partners(),
            }
        })
        .collect();

    if let Some(free) = options.iter().find(|o| o.cost <= 0.0) {
        return Err(Error::InvalidInput(format!(
            "{} solar option for {} kWp prices at £0",
            free.tier, size_kwp
        )));
    }

    Ok(options)
}

/// Heat pump installation price breakdown (£)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallationCost {
    pub heat_pump: f64,
    pub radiator_upgrade: f64,
    pub hot_water_cylinder: f64,
    pub grant: f64,
}

impl InstallationCost {
    pub fn before_grant(&self) -> f64 {
        self.heat_pump + self.radiator_upgrade + self.hot_water_cylinder
    }

    /// Never negative, however large the grant
    pub fn after_grant(&self) -> f64 {
        (self.before_grant() - self.grant).max(0.0)
    }
}

/// Price a heat pump installation, including the radiator and cylinder work
/// it usually needs
pub fn heat_pump_installation(
    capacity_kw: u32,
    radiators: RadiatorType,
    tier: Tier,
    reference: &ReferenceData,
) -> InstallationCost {
    let heat_pump = &reference.heat_pump;
    let capacity = capacity_kw as f64;
    let base = if capacity <= heat_pump.small_max_kw {
        heat_pump.small_cost
    } else if capacity <= heat_pump.medium_max_kw {
        heat_pump.medium_cost
    } else {
        heat_pump.large_cost
    };

    InstallationCost {
        heat_pump: base * heat_pump.tier_cost_multiplier.get(tier),
        radiator_upgrade: if radiators == RadiatorType::Standard {
            heat_pump.radiator_upgrade_cost
        } else {
            0.0
        },
        hot_water_cylinder: heat_pump.hot_water_cylinder_cost,
        grant: reference.grants.boiler_upgrade_scheme_gbp,
    }
}

fn heat_pump_features(tier: Tier) -> Vec<String> {
    match tier {
        Tier::Budget => strings(&[
            "Air-source heat pump",
            "Standard weather compensation",
            "Basic programmable controller",
        ]),
        Tier::Standard => strings(&[
            "Air-source heat pump from a major manufacturer",
            "Weather compensation",
            "Smart controller with app",
        ]),
        Tier::Premium => strings(&[
            "High-efficiency air-source heat pump",
            "Quiet-mark certified outdoor unit",
            "Smart zoned controls",
            "Extended labour and parts cover",
        ]),
    }
}

/// Budget, standard and premium heat pump options
///
/// `heat_demand_kwh` is the annual gas-equivalent heat demand. Savings are
/// measured against running a gas boiler for the same demand.
pub fn heat_pump_options(
    capacity_kw: u32,
    base_scop: f64,
    heat_demand_kwh: f64,
    radiators: RadiatorType,
    rates: &EnergyRates,
    reference: &ReferenceData,
) -> Result<Vec<SystemOption>> {
    let boiler_cost =
        annual_running_cost(&EnergySystem::GasBoiler, heat_demand_kwh, rates, reference)?;

    Tier::all()
        .iter()
        .map(|&tier| {
            let tier_scop = base_scop + reference.heat_pump.tier_scop_offset.get(tier);
            let running = annual_running_cost(
                &EnergySystem::HeatPump { scop: tier_scop },
                heat_demand_kwh,
                rates,
                reference,
            )?
            .round();
            let savings = annual_savings(boiler_cost.round(), running);
            let cost = heat_pump_installation(capacity_kw, radiators, tier, reference)
                .after_grant()
                .round();

            let (warranty, equipment) = match tier {
                Tier::Budget => ("5 years", "Entry-level air-source"),
                Tier::Standard => ("7 years", "Mid-range air-source"),
                Tier::Premium => ("10 years", "Premium air-source"),
            };

            Ok(SystemOption {
                tier,
                kind: SystemKind::HeatPump,
                capacity_kw: capacity_kw as f64,
                unit_count: 1,
                cost,
                annual_generation_kwh: None,
                annual_running_cost: Some(running),
                annual_savings: savings,
                payback: payback(cost, savings),
                equipment: equipment.to_string(),
                warranty: warranty.to_string(),
                efficiency: format!("SCOP {:.1}", tier_scop),
                features: heat_pump_features(tier),
                partners: Vec::new(),
            })
        })
        .collect()
}

/// Whether a home battery is worth adding to a solar array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryAdvice {
    pub recommended: bool,
    pub size_kwh: f64,
    pub cost: f64,
    /// Extra saving from storing export for evening use (£/year)
    pub additional_savings: f64,
    pub payback: Payback,
    pub reason: String,
}

/// Battery advice for a solar array's export profile
pub fn battery_advice(
    exported_kwh: f64,
    daytime_fraction: f64,
    rates: &EnergyRates,
    reference: &ReferenceData,
) -> BatteryAdvice {
    let battery = &reference.battery;
    let daytime_percent = (daytime_fraction * 100.0).round();

    if daytime_fraction >= battery.max_daytime_fraction
        || exported_kwh <= battery.min_annual_export_kwh
    {
        let reason = if daytime_fraction >= battery.high_daytime_fraction {
            format!(
                "With {}% daytime usage you already use most of your solar generation directly.",
                daytime_percent
            )
        } else {
            "At your current export levels, a battery may not be cost-effective yet.".to_string()
        };
        return BatteryAdvice {
            recommended: false,
            size_kwh: 0.0,
            cost: 0.0,
            additional_savings: 0.0,
            payback: Payback::Never,
            reason,
        };
    }

    let daily_export = exported_kwh / 365.0;
    let size = (daily_export * battery.sizing_factor).ceil().min(battery.max_kwh);
    let cost = if size > battery.medium_max_kwh {
        battery.large_cost
    } else if size > battery.small_max_kwh {
        battery.medium_cost
    } else {
        battery.small_cost
    };

    let stored = exported_kwh * battery.storage_fraction;
    let additional_savings = stored * (rates.electricity_pence - rates.export_pence) / 100.0;

    let reason = if daytime_fraction < battery.low_daytime_fraction {
        format!(
            "Your low daytime usage ({}%) means you're exporting a lot of energy. A battery could store this for evening use.",
            daytime_percent
        )
    } else {
        format!(
            "With {}% daytime usage, a battery could increase your self-consumption and savings.",
            daytime_percent
        )
    };

    tracing::debug!(size_kwh = size, cost, additional_savings, "Battery recommended");

    BatteryAdvice {
        recommended: true,
        size_kwh: size,
        cost,
        additional_savings,
        payback: payback(cost, additional_savings),
        reason,
    }
}

/// CO₂ avoided by solar generation (kg/year)
pub fn solar_co2_reduction_kg(generation_kwh: f64, reference: &ReferenceData) -> f64 {
    generation_kwh * reference.carbon.grid_kg_per_kwh
}

/// CO₂ avoided by replacing gas heating with a heat pump (kg/year)
pub fn heat_pump_co2_reduction_kg(
    gas_kwh: f64,
    heat_pump_electricity_kwh: f64,
    reference: &ReferenceData,
) -> f64 {
    gas_kwh * reference.carbon.gas_kg_per_kwh
        - heat_pump_electricity_kwh * reference.carbon.grid_kg_per_kwh
}
