//! Behavioral Recommendations
//!
//! Zero-cost habit changes that pay back immediately:
//! - Thermostat and heating schedule adjustments
//! - Clothing layers and curtain management
//! - Off-peak appliance timing for electrically heated homes
//! - One tip for the current season

use crate::error::Result;

use super::engine::{GenerateOptions, RecommendationContext, RecommendationSource};
use super::types::{Category, Confidence, Recommendation, Season, SourceKind};

/// Source of zero-cost habit changes
pub struct BehavioralSource;

impl BehavioralSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BehavioralSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationSource for BehavioralSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Behavioral
    }

    fn name(&self) -> &'static str {
        "Behavioral"
    }

    fn recommend(
        &self,
        ctx: &RecommendationContext<'_>,
        _options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>> {
        let spend = ctx.monthly_spend();
        let rates = &ctx.reference.savings;
        let mut recs = Vec::new();

        if ctx.is_heating_weather() {
            recs.push(
                Recommendation::new(
                    "thermostat-1c",
                    "Lower thermostat by 1°C",
                    "Reducing your thermostat from 21°C to 20°C can save 10% on heating costs \
                     without noticeable comfort loss.",
                    Category::Behavior,
                    9,
                )
                .with_saving(
                    spend * rates.thermostat_one_degree,
                    rates.thermostat_one_degree * 100.0,
                )
                .with_actions(&[
                    "Turn your thermostat down by 1°C",
                    "Wait 1 week to adjust to the new temperature",
                    "Monitor your comfort level",
                    "Track your energy bills",
                ])
                .with_tags(&["heating", "instant", "no-cost"]),
            );
        }

        recs.push(
            Recommendation::new(
                "heating-schedule",
                "Optimize heating schedule",
                "Heat only when you're home. Avoid heating empty rooms and reduce overnight heating.",
                Category::Timing,
                8,
            )
            .with_saving(spend * rates.heating_schedule, rates.heating_schedule * 100.0)
            .with_actions(&[
                "Set heating to turn on 30 min before you wake up",
                "Reduce temperature by 2-3°C overnight",
                "Turn off heating in unused rooms",
                "Use a timer or smart thermostat",
            ])
            .with_tags(&["heating", "scheduling", "no-cost"]),
        );

        recs.push(
            Recommendation::new(
                "layer-clothing",
                "Wear warmer clothing indoors",
                "Adding a sweater can make you comfortable at 19°C instead of 21°C, saving \
                 significantly on heating.",
                Category::Behavior,
                6,
            )
            .with_saving(spend * rates.clothing_layers, rates.clothing_layers * 100.0)
            .with_confidence(Confidence::Medium)
            .with_actions(&[
                "Wear layers (thermal base layer + sweater)",
                "Use blankets when sitting",
                "Wear slippers or warm socks",
            ])
            .with_tags(&["heating", "comfort", "no-cost"]),
        );

        if ctx.profile.heating_system.is_electric() {
            recs.push(
                Recommendation::new(
                    "off-peak-timing",
                    "Use appliances during off-peak hours",
                    "Run washing machine, dishwasher, and charge devices after 9 PM to benefit \
                     from cheaper electricity rates.",
                    Category::Timing,
                    7,
                )
                .with_saving(spend * rates.off_peak_timing, rates.off_peak_timing * 100.0)
                .with_actions(&[
                    "Run dishwasher after 9 PM",
                    "Do laundry during off-peak times",
                    "Charge devices overnight",
                    "Use delay start features",
                ])
                .with_tags(&["electricity", "timing", "no-cost"]),
            );
        }

        recs.push(
            Recommendation::new(
                "curtains-strategy",
                "Smart curtain management",
                "Close curtains at dusk to retain heat, open during sunny days for passive solar gain.",
                Category::Behavior,
                5,
            )
            .with_saving(spend * rates.curtains, rates.curtains * 100.0)
            .with_confidence(Confidence::Medium)
            .with_actions(&[
                "Close curtains and blinds before sunset",
                "Open curtains on sunny south-facing windows",
                "Use thick curtains in winter",
            ])
            .with_tags(&["heating", "insulation", "no-cost"]),
        );

        recs.push(seasonal_tip(ctx.season(), spend, rates.seasonal_tip));

        Ok(recs)
    }
}

/// The one tip that fits the season
fn seasonal_tip(season: Season, spend: f64, rate: f64) -> Recommendation {
    let rec = match season {
        Season::Winter => Recommendation::new(
            "bleed-radiators",
            "Bleed your radiators",
            "Trapped air stops radiators heating fully. Bleeding them gets the same warmth from \
             less energy.",
            Category::Efficiency,
            6,
        )
        .with_actions(&[
            "Turn the heating off and let radiators cool",
            "Open each bleed valve until water appears",
            "Check the boiler pressure afterwards",
        ]),
        Season::Spring => Recommendation::new(
            "spring-heating-review",
            "Shorten heating hours for spring",
            "Longer, milder days mean the winter heating schedule runs more than it needs to.",
            Category::Timing,
            6,
        )
        .with_actions(&[
            "Cut an hour from morning and evening heating",
            "Lower the thermostat on sunny days",
            "Turn off heating in rooms that get afternoon sun",
        ]),
        Season::Summer => Recommendation::new(
            "summer-heating-off",
            "Switch heating to hot water only",
            "Most homes need no space heating in summer. Leaving the heating on standby still \
             wastes energy.",
            Category::Behavior,
            6,
        )
        .with_actions(&[
            "Set the boiler or controller to hot water only",
            "Turn radiator valves down",
            "Use fans and shading instead of cooling appliances",
        ]),
        Season::Autumn => Recommendation::new(
            "autumn-boiler-check",
            "Service your heating before winter",
            "A serviced boiler or heat pump runs more efficiently and is less likely to fail \
             in the cold.",
            Category::Efficiency,
            6,
        )
        .with_actions(&[
            "Book an annual service",
            "Check the thermostat and timer settings",
            "Bleed radiators before switching heating on",
        ]),
    };

    rec.with_saving(spend * rate, rate * 100.0)
        .with_tags(&["seasonal", season.as_str(), "no-cost"])
}
