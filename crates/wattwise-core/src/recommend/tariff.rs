//! Tariff switching recommendations

use crate::error::Result;
use crate::models::HeatingSystem;

use super::engine::{GenerateOptions, RecommendationContext, RecommendationSource};
use super::types::{Category, Confidence, Difficulty, Recommendation, SourceKind};

pub struct TariffSource;

impl TariffSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TariffSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSource for TariffSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Tariff
    }

    fn name(&self) -> &'static str {
        "Tariff Switching"
    }

    fn recommend(
        &self,
        ctx: &RecommendationContext<'_>,
        _options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>> {
        let spend = ctx.monthly_spend();
        let rates = &ctx.reference.savings;
        let thresholds = &ctx.reference.thresholds;
        let mut recs = Vec::new();

        let threshold =
            ctx.reference.benchmarks.monthly_dual_fuel_gbp * thresholds.fixed_tariff_spend_ratio;
        if spend > threshold {
            recs.push(
                Recommendation::new(
                    "switch-fixed-tariff",
                    "Switch to fixed-rate tariff",
                    "Fixed tariffs can save 8-12% compared to standard variable rates, with price \
                     protection for 1-2 years.",
                    Category::Tariff,
                    8,
                )
                .with_saving(spend * rates.fixed_tariff, rates.fixed_tariff * 100.0)
                .with_actions(&[
                    "Compare tariffs on Ofgem-accredited sites",
                    "Check exit fees on current tariff",
                    "Switch online (takes 3 weeks)",
                    "Set reminder to review in 12 months",
                ])
                .with_tags(&["tariff", "switching", "no-cost"]),
            );
        } else {
            tracing::debug!(spend, threshold, "Spend below fixed tariff threshold");
        }

        if ctx.profile.heating_system == HeatingSystem::Electric
            && ctx.profile.occupants >= thresholds.economy_7_min_occupants
        {
            recs.push(
                Recommendation::new(
                    "economy-7-tariff",
                    "Consider Economy 7 tariff",
                    "If you can shift usage to nighttime (charging EV, storage heaters), Economy 7 \
                     offers cheaper overnight rates.",
                    Category::Tariff,
                    7,
                )
                .with_saving(spend * rates.economy_7, rates.economy_7 * 100.0)
                .with_difficulty(Difficulty::Medium)
                .with_confidence(Confidence::Medium)
                .with_actions(&[
                    "Track your current usage pattern",
                    "Calculate if you can shift 40%+ to overnight",
                    "Compare Economy 7 rates with current tariff",
                    "Request smart meter if needed",
                ])
                .with_tags(&["tariff", "electricity", "timing"]),
            );
        }

        Ok(recs)
    }
}
