//! Efficiency Recommendations
//!
//! Low-cost fixes a household can mostly do themselves: draught-proofing,
//! radiator reflectors and LED lighting.

use crate::error::Result;
use crate::models::HeatingSystem;

use super::engine::{GenerateOptions, RecommendationContext, RecommendationSource};
use super::types::{Category, Confidence, Recommendation, SourceKind};

pub struct EfficiencySource;

impl EfficiencySource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EfficiencySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSource for EfficiencySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Efficiency
    }

    fn name(&self) -> &'static str {
        "Efficiency"
    }

    fn recommend(
        &self,
        ctx: &RecommendationContext<'_>,
        _options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>> {
        let spend = ctx.monthly_spend();
        let rates = &ctx.reference.savings;
        let costs = &ctx.reference.measures;
        let built_before = ctx.reference.thresholds.draught_proofing_built_before;
        let mut recs = Vec::new();

        let draughty = ctx
            .profile
            .construction_year
            .is_some_and(|year| year < built_before);
        if draughty {
            let monthly = spend * rates.draught_proofing;
            let payback_months = if monthly > 0.0 {
                costs.draught_proofing_gbp / monthly
            } else {
                f64::MAX
            };
            recs.push(
                Recommendation::new(
                    "draft-proofing",
                    "Draft proofing",
                    "Seal gaps around doors and windows with draft excluders to prevent heat loss.",
                    Category::Efficiency,
                    8,
                )
                .with_saving(monthly, rates.draught_proofing * 100.0)
                .with_cost(costs.draught_proofing_gbp, payback_months)
                .with_actions(&[
                    "Install door draft excluders (£15-30)",
                    "Apply window sealing strips (£20-40)",
                    "Fill gaps with expanding foam",
                    "Install chimney balloons if unused",
                ])
                .with_tags(&["insulation", "diy", "low-cost"]),
            );
        }

        if ctx.profile.heating_system != HeatingSystem::HeatPump {
            recs.push(
                Recommendation::new(
                    "radiator-reflectors",
                    "Radiator reflector panels",
                    "Reflector panels behind radiators bounce heat back into the room instead of \
                     heating walls.",
                    Category::Efficiency,
                    6,
                )
                .with_saving(spend * rates.radiator_reflectors, rates.radiator_reflectors * 100.0)
                .with_cost(
                    costs.radiator_reflectors_gbp,
                    costs.radiator_reflectors_payback_months,
                )
                .with_confidence(Confidence::Medium)
                .with_actions(&[
                    "Buy reflector panels (£5-10 per radiator)",
                    "Install behind external wall radiators",
                    "Ensure radiators are bled and clean",
                ])
                .with_tags(&["heating", "diy", "low-cost"]),
            );
        }

        recs.push(
            Recommendation::new(
                "led-lighting",
                "Switch to LED bulbs",
                "LED bulbs use 75% less energy than traditional bulbs and last 15 times longer.",
                Category::Efficiency,
                7,
            )
            .with_saving(rates.led_lighting_monthly_gbp, rates.led_energy_reduction * 100.0)
            .with_cost(costs.led_lighting_gbp, costs.led_lighting_payback_months)
            .with_actions(&[
                "Replace most-used bulbs first",
                "Choose 2700K for warm white",
                "Buy dimmable LEDs if needed",
                "Dispose of old bulbs safely",
            ])
            .with_tags(&["lighting", "electricity", "low-cost"]),
        );

        Ok(recs)
    }
}
