//! Heat pump advisor
//!
//! Compares an air-source heat pump against the household's gas boiler for
//! the same heat demand and lists the work the home needs first.

use serde::{Deserialize, Serialize};

use crate::costs::{
    annual_running_cost, annual_savings, heat_pump_co2_reduction_kg, heat_pump_installation,
    heat_pump_options, payback, scop, EnergyRates, EnergySystem, InstallationCost, SystemOption,
};
use crate::error::{Error, Result};
use crate::models::{DwellingType, HouseholdProfile, Payback, RadiatorType, Tier};
use crate::projection::{project, BreakEven, Projection, ProjectionConfig};
use crate::reference::ReferenceData;
use crate::region::Region;
use crate::sizing::{estimate_floor_area, size_heat_pump};
use crate::suitability::{score_heat_pump, SuitabilityScore};

use super::gbp;

const SUITABLE_SCORE: u8 = 50;
const WELL_SUITED_SCORE: u8 = 70;
const EXCELLENT_SCOP: f64 = 3.2;
const GOOD_SAVINGS_GBP: f64 = 300.0;
const LONG_PAYBACK_YEARS: f64 = 20.0;
/// Electricity to gas price ratio above which savings shrink
const HIGH_PRICE_RATIO: f64 = 2.5;
/// Electricity to gas price ratio above which savings may vanish
const VERY_HIGH_PRICE_RATIO: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePriority {
    Essential,
    Recommended,
    Optional,
}

impl UpgradePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradePriority::Essential => "essential",
            UpgradePriority::Recommended => "recommended",
            UpgradePriority::Optional => "optional",
        }
    }
}

impl std::fmt::Display for UpgradePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Home improvement to make before or alongside a heat pump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecommendation {
    pub upgrade: String,
    /// £
    pub cost: f64,
    pub benefit: String,
    pub priority: UpgradePriority,
    /// Rough yearly saving it adds (£)
    pub savings_impact: f64,
}

impl UpgradeRecommendation {
    fn new(
        upgrade: &str,
        cost: f64,
        benefit: &str,
        priority: UpgradePriority,
        savings_impact: f64,
    ) -> Self {
        Self {
            upgrade: upgrade.to_string(),
            cost,
            benefit: benefit.to_string(),
            priority,
            savings_impact,
        }
    }
}

/// Heat pump versus gas boiler for one household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatPumpReport {
    pub region: Region,
    /// Supplied or estimated from gas use (m²)
    pub floor_area_m2: f64,
    pub floor_area_estimated: bool,
    pub size_kw: u32,
    pub scop: f64,
    /// £/year
    pub heat_pump_running_cost: f64,
    /// Including servicing (£/year)
    pub boiler_running_cost: f64,
    /// Negative when the heat pump costs more to run (£/year)
    pub annual_savings: f64,
    pub installation: InstallationCost,
    pub payback: Payback,
    pub break_even: BreakEven,
    pub projection: Projection,
    /// Cumulative savings at the end of the projection (£)
    pub lifetime_savings: f64,
    /// kg/year
    pub co2_reduction_kg: f64,
    pub suitability: SuitabilityScore,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verdicts: Vec<String>,
    pub warnings: Vec<String>,
    pub upgrades: Vec<UpgradeRecommendation>,
    pub options: Vec<SystemOption>,
}

impl HeatPumpReport {
    /// Feasible without major work first
    pub fn is_suitable(&self) -> bool {
        self.suitability.value() >= SUITABLE_SCORE
    }

    pub fn essential_upgrades(&self) -> impl Iterator<Item = &UpgradeRecommendation> {
        self.upgrades
            .iter()
            .filter(|u| u.priority == UpgradePriority::Essential)
    }

    /// One-sentence summary of the suitability score
    pub fn reasoning(&self) -> &'static str {
        match self.suitability.value() {
            s if s >= WELL_SUITED_SCORE => {
                "Your property is well-suited for a heat pump with minimal modifications needed."
            }
            s if s >= SUITABLE_SCORE => {
                "A heat pump is feasible but some upgrades would improve performance and savings."
            }
            _ => {
                "Significant property improvements are needed before a heat pump installation \
                 would be cost-effective."
            }
        }
    }
}

/// Builds heat pump reports from household profiles
pub struct HeatPumpAdvisor<'a> {
    reference: &'a ReferenceData,
}

impl<'a> HeatPumpAdvisor<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Build a report; the profile's gas use stands in for heat demand
    pub fn advise(&self, profile: &HouseholdProfile) -> Result<HeatPumpReport> {
        profile.validate()?;
        if profile.annual_gas_kwh <= 0.0 {
            return Err(Error::InvalidInput(
                "heat pump advice needs the home's annual gas use as its heat demand".to_string(),
            ));
        }
        let reference = self.reference;

        let region = reference.region_for(&profile.postcode);
        let insulation = profile.insulation;
        let heat_demand = profile.annual_gas_kwh;
        let rates = EnergyRates::from_profile(profile);

        let (floor_area, floor_area_estimated) = match profile.floor_area_m2 {
            Some(area) => (area, false),
            None => (estimate_floor_area(heat_demand, insulation, reference)?, true),
        };
        let size_kw =
            size_heat_pump(heat_demand, Some(floor_area), insulation, region, reference)?;
        let scop = scop(region, insulation, reference);

        let heat_pump_cost = annual_running_cost(
            &EnergySystem::HeatPump { scop },
            heat_demand,
            &rates,
            reference,
        )?
        .round();
        let boiler_cost =
            annual_running_cost(&EnergySystem::GasBoiler, heat_demand, &rates, reference)?.round();
        let savings = annual_savings(boiler_cost, heat_pump_cost);

        let installation =
            heat_pump_installation(size_kw, profile.radiator_type, Tier::Standard, reference);
        let net_cost = installation.after_grant();
        let payback = payback(net_cost, savings);
        let projection = project(savings, net_cost, &ProjectionConfig::heat_pump())?;

        let co2 =
            heat_pump_co2_reduction_kg(heat_demand, heat_demand / scop, reference).round();
        let suitability = score_heat_pump(
            insulation,
            region,
            profile.radiator_type,
            profile.dwelling_type,
            reference,
        );

        let options = heat_pump_options(
            size_kw,
            scop,
            heat_demand,
            profile.radiator_type,
            &rates,
            reference,
        )?;

        let price_ratio = rates.electricity_pence / rates.gas_pence;
        let assessment = Assessment {
            profile,
            reference,
            scop,
            savings,
            net_cost,
            payback,
            suitability,
            price_ratio,
        };

        let report = HeatPumpReport {
            region,
            floor_area_m2: floor_area,
            floor_area_estimated,
            size_kw,
            scop,
            heat_pump_running_cost: heat_pump_cost,
            boiler_running_cost: boiler_cost,
            annual_savings: savings,
            installation,
            payback,
            break_even: projection.break_even,
            lifetime_savings: projection.lifetime_savings().round(),
            projection,
            co2_reduction_kg: co2,
            suitability,
            pros: assessment.pros(),
            cons: assessment.cons(),
            verdicts: assessment.verdicts(),
            warnings: assessment.warnings(),
            upgrades: assessment.upgrades(),
            options,
        };

        tracing::debug!(
            region = region.as_str(),
            size_kw,
            scop,
            annual_savings = savings,
            suitability = suitability.value(),
            "Built heat pump report"
        );

        Ok(report)
    }
}

/// Inputs to the plain-English parts of a report
struct Assessment<'a> {
    profile: &'a HouseholdProfile,
    reference: &'a ReferenceData,
    scop: f64,
    savings: f64,
    net_cost: f64,
    payback: Payback,
    suitability: SuitabilityScore,
    price_ratio: f64,
}

impl Assessment<'_> {
    fn grant(&self) -> f64 {
        self.reference.grants.boiler_upgrade_scheme_gbp
    }

    fn pros(&self) -> Vec<String> {
        let mut pros = vec![
            "Very low carbon emissions - reduces your home's CO2 by 70-80%".to_string(),
            format!("Eligible for {} government grant", gbp(self.grant())),
            "Heats and cools your home (reversible in summer)".to_string(),
            "Long lifespan of 20-25 years vs 10-15 for boilers".to_string(),
            "No gas connection required - fully electric".to_string(),
            "Low maintenance - no annual servicing required like boilers".to_string(),
        ];
        if self.scop >= EXCELLENT_SCOP {
            pros.push(format!(
                "Excellent efficiency: {} units of heat per unit of electricity",
                self.scop
            ));
        }
        if self.savings > 0.0 {
            pros.push(format!("Save {}/year on energy bills", gbp(self.savings)));
        }
        pros
    }

    fn cons(&self) -> Vec<String> {
        let mut cons = Vec::new();
        if self.suitability.value() < SUITABLE_SCORE {
            cons.push(format!(
                "Your property may need insulation upgrades first (current score: {})",
                self.suitability
            ));
        }
        if self.profile.radiator_type == RadiatorType::Standard {
            cons.push(
                "Standard radiators may need upgrading to larger models for optimal performance"
                    .to_string(),
            );
        }
        if self.price_ratio > HIGH_PRICE_RATIO {
            cons.push("High electricity rates in your area may reduce savings".to_string());
        }
        let typical_net = (self.reference.heat_pump.medium_cost - self.grant()).max(0.0);
        cons.push(format!(
            "Higher upfront cost than boiler ({} after grant)",
            gbp(typical_net)
        ));
        cons.push("May require hot water tank if you don't have one".to_string());
        cons.push("Less effective in very cold weather (below -5°C)".to_string());
        if self.profile.dwelling_type == DwellingType::Flat {
            cons.push(
                "Flats may face challenges with outdoor unit placement and permissions".to_string(),
            );
        }
        cons
    }

    fn verdicts(&self) -> Vec<String> {
        let score = self.suitability.value();
        let mut verdicts = vec![if score >= WELL_SUITED_SCORE {
            "✅ Your property is well-suited for a heat pump".to_string()
        } else if score >= SUITABLE_SCORE {
            "⚠️ Heat pump is feasible but consider insulation upgrades first".to_string()
        } else {
            "❌ Significant upgrades needed before heat pump installation".to_string()
        }];

        if self.scop >= EXCELLENT_SCOP {
            verdicts.push("✅ Excellent efficiency expected in your climate".to_string());
        }
        if self.savings > GOOD_SAVINGS_GBP {
            verdicts.push("✅ Good annual savings potential".to_string());
        } else if self.savings < 0.0 {
            verdicts.push("⚠️ May cost more to run than gas boiler at current rates".to_string());
        }
        if self.profile.radiator_type == RadiatorType::Standard {
            verdicts.push("💡 Consider upgrading radiators for optimal performance".to_string());
        }
        verdicts.push(format!(
            "💰 With {} grant, net cost is {}",
            gbp(self.grant()),
            gbp(self.net_cost)
        ));
        verdicts
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.suitability.value() < SUITABLE_SCORE {
            warnings.push(
                "⚠️ Your property needs insulation improvements for heat pump efficiency"
                    .to_string(),
            );
        }
        if !self.payback.is_within(LONG_PAYBACK_YEARS) {
            warnings.push(
                "⚠️ Long payback period - consider waiting for technology costs to reduce"
                    .to_string(),
            );
        }
        if self.price_ratio > VERY_HIGH_PRICE_RATIO {
            warnings.push(
                "⚠️ Very high electricity-to-gas price ratio in your area may limit savings"
                    .to_string(),
            );
        }
        if self.profile.dwelling_type == DwellingType::Flat {
            warnings.push(
                "⚠️ Flats may require building permission for outdoor unit installation"
                    .to_string(),
            );
        }
        warnings
    }

    fn upgrades(&self) -> Vec<UpgradeRecommendation> {
        let heat_loss = self
            .reference
            .insulation_factors(self.profile.insulation)
            .heat_loss_multiplier;
        let measures = &self.reference.measures;
        let heat_pump = &self.reference.heat_pump;
        let mut upgrades = Vec::new();

        if heat_loss > 1.0 {
            upgrades.push(UpgradeRecommendation::new(
                "Loft and cavity wall insulation",
                measures.insulation_upgrade_gbp,
                "Reduces heat loss by 30-40%, improves heat pump efficiency significantly",
                if heat_loss > 1.3 {
                    UpgradePriority::Essential
                } else {
                    UpgradePriority::Recommended
                },
                200.0,
            ));
        }
        if self.profile.radiator_type == RadiatorType::Standard {
            upgrades.push(UpgradeRecommendation::new(
                "Upgrade to larger radiators",
                heat_pump.radiator_upgrade_cost,
                "Allows heat pump to run at lower temperatures, improving efficiency by 15-20%",
                UpgradePriority::Recommended,
                150.0,
            ));
        }
        if self.profile.radiator_type != RadiatorType::Underfloor {
            upgrades.push(UpgradeRecommendation::new(
                "Install hot water cylinder",
                heat_pump.hot_water_cylinder_cost,
                "Required for heat pump hot water production. Modern cylinders are highly efficient",
                UpgradePriority::Essential,
                0.0,
            ));
        }
        upgrades.push(UpgradeRecommendation::new(
            "Smart heating controls",
            measures.smart_controls_gbp,
            "Optimizes heat pump operation, can reduce bills by 10-15%",
            UpgradePriority::Optional,
            100.0,
        ));
        if heat_loss > 1.2 {
            upgrades.push(UpgradeRecommendation::new(
                "Double or triple glazing",
                measures.glazing_upgrade_gbp,
                "Reduces heat loss through windows, improves comfort and efficiency",
                UpgradePriority::Optional,
                180.0,
            ));
        }
        upgrades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeatingSystem, InsulationRating};

    fn london_semi() -> HouseholdProfile {
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
        .with_floor_area(100.0)
        .with_insulation(InsulationRating::C)
    }

    #[test]
    fn test_london_semi_report() {
        let reference = ReferenceData::default();
        let report = HeatPumpAdvisor::new(&reference).advise(&london_semi()).unwrap();

        assert_eq!(report.region, Region::London);
        assert_eq!(report.size_kw, 8);
        assert_eq!(report.scop, 3.5);
        assert!(!report.floor_area_estimated);
        // 12000 / 3.5 * 0.24 = 822.86
        assert_eq!(report.heat_pump_running_cost, 823.0);
        // 12000 / 0.9 * 0.06 + 150
        assert_eq!(report.boiler_running_cost, 950.0);
        assert_eq!(report.annual_savings, 127.0);
        assert_eq!(report.installation.before_grant(), 14500.0);
        assert_eq!(report.installation.after_grant(), 7000.0);
        assert!((report.payback.years().unwrap() - 7000.0 / 127.0).abs() < 1e-9);
        assert_eq!(report.break_even, BreakEven::Never);
        assert_eq!(report.lifetime_savings, -3218.0);
        assert_eq!(report.co2_reduction_kg, 1637.0);
        assert_eq!(report.suitability.value(), 98);
        assert!(report.is_suitable());
    }

    #[test]
    fn test_london_semi_guidance() {
        let reference = ReferenceData::default();
        let report = HeatPumpAdvisor::new(&reference).advise(&london_semi()).unwrap();

        assert_eq!(report.pros.len(), 8);
        assert!(report.pros.contains(&"Save £127/year on energy bills".to_string()));
        assert!(report.pros.contains(&"Eligible for £7,500 government grant".to_string()));

        assert_eq!(report.cons.len(), 5);
        assert!(report
            .cons
            .contains(&"Higher upfront cost than boiler (£2,500 after grant)".to_string()));

        assert_eq!(
            report.verdicts,
            vec![
                "✅ Your property is well-suited for a heat pump".to_string(),
                "✅ Excellent efficiency expected in your climate".to_string(),
                "💡 Consider upgrading radiators for optimal performance".to_string(),
                "💰 With £7,500 grant, net cost is £7,000".to_string(),
            ]
        );

        // Payback over 20 years and a 4:1 price ratio
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_upgrades_for_band_c_standard_radiators() {
        let reference = ReferenceData::default();
        let report = HeatPumpAdvisor::new(&reference).advise(&london_semi()).unwrap();

        let names: Vec<&str> = report.upgrades.iter().map(|u| u.upgrade.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Upgrade to larger radiators",
                "Install hot water cylinder",
                "Smart heating controls"
            ]
        );
        let essential: Vec<_> = report.essential_upgrades().collect();
        assert_eq!(essential.len(), 1);
        assert_eq!(essential[0].cost, 1500.0);
    }

    #[test]
    fn test_poorly_insulated_flat() {
        let reference = ReferenceData::default();
        let mut profile = london_semi()
            .with_insulation(InsulationRating::G)
            .with_radiators(RadiatorType::Underfloor);
        profile.dwelling_type = DwellingType::Flat;

        let report = HeatPumpAdvisor::new(&reference).advise(&profile).unwrap();
        let priorities: Vec<(&str, UpgradePriority)> = report
            .upgrades
            .iter()
            .map(|u| (u.upgrade.as_str(), u.priority))
            .collect();
        assert_eq!(
            priorities,
            vec![
                ("Loft and cavity wall insulation", UpgradePriority::Essential),
                ("Smart heating controls", UpgradePriority::Optional),
                ("Double or triple glazing", UpgradePriority::Optional),
            ]
        );
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("building permission")));
        assert_eq!(report.installation.radiator_upgrade, 0.0);
    }

    #[test]
    fn test_floor_area_estimated_from_gas() {
        let reference = ReferenceData::default();
        let mut profile = london_semi();
        profile.floor_area_m2 = None;

        let report = HeatPumpAdvisor::new(&reference).advise(&profile).unwrap();
        assert!(report.floor_area_estimated);
        // 12000 * 0.8 / 80
        assert_eq!(report.floor_area_m2, 120.0);
    }

    #[test]
    fn test_cheap_electricity_pays_back() {
        let reference = ReferenceData::default();
        let mut profile = london_semi();
        profile.electricity_rate_pence = 12.0;
        profile.gas_rate_pence = 8.0;

        let report = HeatPumpAdvisor::new(&reference).advise(&profile).unwrap();
        assert!(report.annual_savings > 300.0);
        assert!(report.verdicts.contains(&"✅ Good annual savings potential".to_string()));
        assert!(matches!(report.break_even, BreakEven::Year(_)));
        assert_eq!(report.options.len(), 3);
    }

    #[test]
    fn test_requires_gas_usage() {
        let reference = ReferenceData::default();
        let mut profile = london_semi();
        profile.annual_gas_kwh = 0.0;
        assert!(matches!(
            HeatPumpAdvisor::new(&reference).advise(&profile),
            Err(Error::InvalidInput(_))
        ));
    }
}
