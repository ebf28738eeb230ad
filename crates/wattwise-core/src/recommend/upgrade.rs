//! Upgrade Recommendations
//!
//! Installed measures with a real upfront cost. Anything costing more than
//! the caller's `max_upfront_cost` is left out. The heat pump is gated on
//! its installation price before grant, since the grant is not guaranteed.
//! Its reported cost is net of the grant.

use crate::error::Result;
use crate::models::{DwellingType, HeatingSystem};

use super::engine::{GenerateOptions, RecommendationContext, RecommendationSource};
use super::types::{Category, Confidence, Difficulty, Recommendation, SourceKind};

pub struct UpgradeSource;

impl UpgradeSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UpgradeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSource for UpgradeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Upgrade
    }

    fn name(&self) -> &'static str {
        "Upgrades"
    }

    fn recommend(
        &self,
        ctx: &RecommendationContext<'_>,
        options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>> {
        let profile = ctx.profile;
        let spend = ctx.monthly_spend();
        let rates = &ctx.reference.savings;
        let costs = &ctx.reference.measures;
        let thresholds = &ctx.reference.thresholds;
        let built = profile.construction_year;
        let mut recs = Vec::new();

        if spend > thresholds.smart_thermostat_min_spend_gbp {
            recs.push(
                Recommendation::new(
                    "smart-thermostat",
                    "Install smart thermostat",
                    "Smart thermostats learn your routine and optimize heating automatically, \
                     saving 10-15% on average.",
                    Category::Upgrade,
                    8,
                )
                .with_saving(spend * rates.smart_thermostat, rates.smart_thermostat * 100.0)
                .with_cost(
                    costs.smart_thermostat_gbp,
                    costs.smart_thermostat_payback_months,
                )
                .with_difficulty(Difficulty::Medium)
                .with_actions(&[
                    "Research compatible thermostats (Nest, Hive, Tado)",
                    "Check heating system compatibility",
                    "Book professional installation (£50-100)",
                    "Set up app and optimize settings",
                ])
                .with_tags(&["heating", "smart-home", "professional-install"]),
            );
        }

        let has_loft = matches!(
            profile.dwelling_type,
            DwellingType::SemiDetached | DwellingType::Detached
        );
        let loft_era = built.is_some_and(|year| year < thresholds.loft_insulation_built_before);
        if has_loft && loft_era {
            recs.push(
                Recommendation::new(
                    "loft-insulation",
                    "Upgrade loft insulation",
                    "270mm loft insulation can save £200/year. Government grants may be available.",
                    Category::Upgrade,
                    9,
                )
                .with_saving(spend * rates.loft_insulation, rates.loft_insulation * 100.0)
                .with_cost(
                    costs.loft_insulation_gbp,
                    costs.loft_insulation_payback_months,
                )
                .with_difficulty(Difficulty::Medium)
                .with_actions(&[
                    "Check current insulation depth",
                    "Get quotes from 3+ installers",
                    "Apply for ECO4 grant if eligible",
                    "Ensure proper ventilation",
                ])
                .with_tags(&["insulation", "grant-available", "professional-install"]),
            );
        }

        let cavity_years = thresholds.cavity_wall_built_from..thresholds.cavity_wall_built_before;
        let cavity_era = built.is_some_and(|year| cavity_years.contains(&year));
        if profile.dwelling_type != DwellingType::Flat && cavity_era {
            recs.push(
                Recommendation::new(
                    "cavity-wall-insulation",
                    "Cavity wall insulation",
                    "Fill cavity walls with insulation to save £150-200/year on heating.",
                    Category::Upgrade,
                    9,
                )
                .with_saving(spend * rates.cavity_wall, rates.cavity_wall * 100.0)
                .with_cost(costs.cavity_wall_gbp, costs.cavity_wall_payback_months)
                .with_difficulty(Difficulty::Hard)
                .with_actions(&[
                    "Check if walls have cavities (1920-1990 builds)",
                    "Get borescope survey (free from installers)",
                    "Apply for ECO4 funding",
                    "Book professional installation",
                ])
                .with_tags(&["insulation", "grant-available", "professional-install"]),
            );
        }

        let replaceable_heating = matches!(
            profile.heating_system,
            HeatingSystem::GasBoiler | HeatingSystem::Electric
        );
        let heat_pump_affordable = costs.heat_pump_gbp <= options.max_upfront_cost;
        let heat_pump_spend = spend > thresholds.heat_pump_min_spend_gbp;
        if replaceable_heating && heat_pump_spend && heat_pump_affordable {
            let grant = ctx.reference.grants.boiler_upgrade_scheme_gbp;
            let net_cost = (costs.heat_pump_gbp - grant).max(0.0);
            recs.push(
                Recommendation::new(
                    "heat-pump-upgrade",
                    "Upgrade to heat pump",
                    format!(
                        "Heat pumps are 300% efficient. £{:.0} Boiler Upgrade Scheme grant \
                         available, saving 40-50% on heating costs.",
                        grant
                    ),
                    Category::Upgrade,
                    10,
                )
                .with_saving(spend * rates.heat_pump, rates.heat_pump * 100.0)
                .with_cost(net_cost, costs.heat_pump_payback_months)
                .with_difficulty(Difficulty::Hard)
                .with_confidence(Confidence::Medium)
                .with_actions(&[
                    "Check eligibility for the Boiler Upgrade Scheme grant",
                    "Get MCS-certified installer quotes",
                    "Ensure adequate insulation first",
                    "Consider air-source vs ground-source",
                ])
                .with_tags(&[
                    "heating",
                    "renewable",
                    "grant-available",
                    "professional-install",
                ]),
            );
        }

        let before = recs.len();
        recs.retain(|r| r.upfront_cost <= options.max_upfront_cost);
        if recs.len() < before {
            tracing::debug!(
                removed = before - recs.len(),
                max_upfront_cost = options.max_upfront_cost,
                "Dropped upgrades over budget"
            );
        }

        Ok(recs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HouseholdProfile;
    use crate::reference::ReferenceData;
    use chrono::Month;

    fn profile() -> HouseholdProfile {
        HouseholdProfile::new(
            "NE1 4ST",
            DwellingType::SemiDetached,
            4,
            HeatingSystem::GasBoiler,
            14000.0,
            3500.0,
            6.0,
            24.0,
        )
        .with_construction_year(1975)
        .with_monthly_spend(200.0)
    }

    fn recommend(profile: &HouseholdProfile, options: &GenerateOptions) -> Vec<Recommendation> {
        let reference = ReferenceData::default();
        let ctx = RecommendationContext::new(profile, &reference, Month::January);
        UpgradeSource::new().recommend(&ctx, options).unwrap()
    }

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_all_upgrades_for_1970s_semi() {
        let recs = recommend(&profile(), &GenerateOptions::default());
        assert_eq!(
            ids(&recs),
            vec![
                "smart-thermostat",
                "loft-insulation",
                "cavity-wall-insulation",
                "heat-pump-upgrade"
            ]
        );

        let heat_pump = &recs[3];
        assert_eq!(heat_pump.upfront_cost, 2500.0);
        assert_eq!(heat_pump.payback_months, 84.0);
        assert!((heat_pump.monthly_saving - 80.0).abs() < 0.01);
        assert_eq!(heat_pump.priority, 10);
    }

    #[test]
    fn test_max_upfront_cost_filters() {
        let recs = recommend(&profile(), &GenerateOptions::low_cost());
        // Cavity wall costs £1,000 which is within the limit; heat pump is not
        assert_eq!(
            ids(&recs),
            vec!["smart-thermostat", "loft-insulation", "cavity-wall-insulation"]
        );

        let options = GenerateOptions {
            max_upfront_cost: 400.0,
            ..GenerateOptions::default()
        };
        assert_eq!(ids(&recommend(&profile(), &options)), vec!["smart-thermostat"]);
    }

    #[test]
    fn test_building_age_rules() {
        let newer = profile().with_construction_year(2010);
        assert_eq!(
            ids(&recommend(&newer, &GenerateOptions::default())),
            vec!["smart-thermostat", "heat-pump-upgrade"]
        );

        let mut flat = profile().with_construction_year(1950);
        flat.dwelling_type = DwellingType::Flat;
        let recs = recommend(&flat, &GenerateOptions::default());
        assert!(!ids(&recs).contains(&"cavity-wall-insulation"));
        assert!(!ids(&recs).contains(&"loft-insulation"));
    }

    #[test]
    fn test_low_spend_and_oil_heating() {
        let mut p = profile().with_monthly_spend(90.0);
        assert_eq!(
            ids(&recommend(&p, &GenerateOptions::default())),
            vec!["loft-insulation", "cavity-wall-insulation"]
        );

        p.heating_system = HeatingSystem::OilBoiler;
        p.monthly_spend_gbp = Some(300.0);
        let recs = recommend(&p, &GenerateOptions::default());
        assert!(!ids(&recs).contains(&"heat-pump-upgrade"));
    }

    #[test]
    fn test_heat_pump_budget_uses_price_before_grant() {
        // Net cost is £2,500 but the installation is £10,000 before grant
        let options = GenerateOptions {
            max_upfront_cost: 5000.0,
            ..GenerateOptions::default()
        };
        let recs = recommend(&profile(), &options);
        assert!(!ids(&recs).contains(&"heat-pump-upgrade"));

        let options = GenerateOptions {
            max_upfront_cost: 10000.0,
            ..GenerateOptions::default()
        };
        let recs = recommend(&profile(), &options);
        let heat_pump = recs.iter().find(|r| r.id == "heat-pump-upgrade").unwrap();
        assert_eq!(heat_pump.upfront_cost, 2500.0);
    }

    #[test]
    fn test_thresholds_come_from_reference() {
        let reference = ReferenceData::from_toml_str(
            r#"
            [thresholds]
            smart_thermostat_min_spend_gbp = 250.0
            heat_pump_min_spend_gbp = 250.0
            loft_insulation_built_before = 1970
            cavity_wall_built_from = 1980
            "#,
        )
        .unwrap();
        let profile = profile();
        let ctx = RecommendationContext::new(&profile, &reference, Month::January);
        let recs = UpgradeSource::new()
            .recommend(&ctx, &GenerateOptions::default())
            .unwrap();
        assert!(ids(&recs).is_empty());

        let older = profile.with_construction_year(1985);
        let ctx = RecommendationContext::new(&older, &reference, Month::January);
        let recs = UpgradeSource::new()
            .recommend(&ctx, &GenerateOptions::default())
            .unwrap();
        assert_eq!(ids(&recs), vec!["cavity-wall-insulation"]);
    }
}
