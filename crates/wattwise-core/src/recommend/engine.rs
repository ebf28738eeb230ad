//! Recommendation engine - runs every source and ranks the results

use chrono::Month;

use crate::models::HouseholdProfile;
use crate::reference::ReferenceData;
use crate::Result;

use super::types::{Recommendation, SavingsSummary, Season, SourceKind};
use super::{BehavioralSource, EfficiencySource, TariffSource, UpgradeSource};

/// Months treated as heating season when no outdoor temperature is known
const HEATING_MONTHS: [Month; 7] = [
    Month::October,
    Month::November,
    Month::December,
    Month::January,
    Month::February,
    Month::March,
    Month::April,
];

/// Everything a source needs to make recommendations
pub struct RecommendationContext<'a> {
    pub profile: &'a HouseholdProfile,
    pub reference: &'a ReferenceData,
    /// Calendar month the advice is for
    pub month: Month,
    /// Current average outdoor temperature, if known (°C)
    pub outdoor_temperature_c: Option<f64>,
}

impl<'a> RecommendationContext<'a> {
    pub fn new(profile: &'a HouseholdProfile, reference: &'a ReferenceData, month: Month) -> Self {
        Self {
            profile,
            reference,
            month,
            outdoor_temperature_c: None,
        }
    }

    pub fn with_outdoor_temperature(mut self, temperature_c: f64) -> Self {
        self.outdoor_temperature_c = Some(temperature_c);
        self
    }

    /// Bill spend if known, else estimated from usage and rates (£)
    pub fn monthly_spend(&self) -> f64 {
        self.profile.monthly_spend()
    }

    pub fn season(&self) -> Season {
        Season::from_month(self.month)
    }

    /// Cold enough that heating is running
    pub fn is_heating_weather(&self) -> bool {
        match self.outdoor_temperature_c {
            Some(temperature) => {
                temperature < self.reference.thresholds.heating_weather_below_c
            }
            None => HEATING_MONTHS.contains(&self.month),
        }
    }
}

/// Limits applied to generated recommendations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub include_upgrades: bool,
    /// Upgrades costing more than this are left out (£)
    pub max_upfront_cost: f64,
    pub max_payback_months: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            include_upgrades: true,
            max_upfront_cost: 10000.0,
            max_payback_months: 60.0,
        }
    }
}

impl GenerateOptions {
    /// Cheap actions that pay back within two years
    pub fn low_cost() -> Self {
        Self {
            include_upgrades: true,
            max_upfront_cost: 1000.0,
            max_payback_months: 24.0,
        }
    }
}

/// A pluggable producer of recommendations
pub trait RecommendationSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn recommend(
        &self,
        ctx: &RecommendationContext<'_>,
        options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>>;
}

/// Runs recommendation sources and ranks what they produce
pub struct RecommendationEngine {
    sources: Vec<Box<dyn RecommendationSource>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in sources
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(BehavioralSource::new()));
        engine.register(Box::new(TariffSource::new()));
        engine.register(Box::new(EfficiencySource::new()));
        engine.register(Box::new(UpgradeSource::new()));

        engine
    }

    /// Create an engine with no sources registered
    pub fn empty() -> Self {
        Self { sources: vec![] }
    }

    pub fn register(&mut self, source: Box<dyn RecommendationSource>) {
        self.sources.push(source);
    }

    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Generate, filter and rank recommendations
    ///
    /// Results are sorted by priority, highest first. Equal priorities keep
    /// the order the sources produced them in.
    pub fn generate(
        &self,
        ctx: &RecommendationContext<'_>,
        options: &GenerateOptions,
    ) -> Result<Vec<Recommendation>> {
        ctx.profile.validate()?;

        let mut all = vec![];
        for source in &self.sources {
            if source.kind() == SourceKind::Upgrade && !options.include_upgrades {
                tracing::debug!(source = source.name(), "Upgrades disabled, skipping source");
                continue;
            }

            match source.recommend(ctx, options) {
                Ok(recs) => {
                    tracing::debug!(
                        source = source.kind().as_str(),
                        count = recs.len(),
                        "Recommendation source complete"
                    );
                    all.extend(recs);
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.kind().as_str(),
                        error = %e,
                        "Recommendation source failed"
                    );
                }
            }
        }

        let generated = all.len();
        all.retain(|r| r.payback_months <= options.max_payback_months);
        if all.len() < generated {
            tracing::debug!(
                removed = generated - all.len(),
                max_payback_months = options.max_payback_months,
                "Filtered recommendations by payback"
            );
        }

        // sort_by is stable, so ties keep generation order
        all.sort_by(|a, b| b.priority.cmp(&a.priority));

        Ok(all)
    }

    /// The `count` highest-priority recommendations with default options
    pub fn top(&self, ctx: &RecommendationContext<'_>, count: usize) -> Result<Vec<Recommendation>> {
        let mut recs = self.generate(ctx, &GenerateOptions::default())?;
        recs.truncate(count);
        Ok(recs)
    }

    /// Savings from the five best low-cost actions
    pub fn savings_potential(&self, ctx: &RecommendationContext<'_>) -> Result<SavingsSummary> {
        let recs = self.generate(ctx, &GenerateOptions::low_cost())?;
        Ok(summarize(&recs, ctx.monthly_spend(), 5))
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Total up the first `top_n` recommendations
pub fn summarize(recs: &[Recommendation], monthly_spend: f64, top_n: usize) -> SavingsSummary {
    let top = &recs[..top_n.min(recs.len())];
    let monthly: f64 = top.iter().map(|r| r.monthly_saving).sum();
    let percent = if monthly_spend > 0.0 {
        monthly / monthly_spend * 100.0
    } else {
        0.0
    };

    SavingsSummary {
        monthly: round_to(monthly, 2),
        annual: round_to(monthly * 12.0, 2),
        percent_of_spend: round_to(percent, 1),
        top_actions: top.iter().map(|r| r.title.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{DwellingType, HeatingSystem};
    use crate::recommend::types::Category;

    fn profile() -> HouseholdProfile {
        HouseholdProfile::new(
            "M1 1AE",
            DwellingType::SemiDetached,
            3,
            HeatingSystem::GasBoiler,
            12000.0,
            3000.0,
            6.0,
            24.0,
        )
        .with_monthly_spend(150.0)
        .with_construction_year(1975)
    }

    struct FailingSource;

    impl RecommendationSource for FailingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Efficiency
        }

        fn name(&self) -> &'static str {
            "Failing"
        }

        fn recommend(
            &self,
            _ctx: &RecommendationContext<'_>,
            _options: &GenerateOptions,
        ) -> Result<Vec<Recommendation>> {
            Err(Error::InvalidInput("boom".to_string()))
        }
    }

    struct FixedSource(Vec<Recommendation>);

    impl RecommendationSource for FixedSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Behavioral
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn recommend(
            &self,
            _ctx: &RecommendationContext<'_>,
            _options: &GenerateOptions,
        ) -> Result<Vec<Recommendation>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = RecommendationEngine::new();
        let kinds = engine.source_kinds();
        assert_eq!(
            kinds,
            vec![
                SourceKind::Behavioral,
                SourceKind::Tariff,
                SourceKind::Efficiency,
                SourceKind::Upgrade
            ]
        );
    }

    #[test]
    fn test_heating_weather() {
        let p = profile();
        let reference = ReferenceData::default();
        assert!(RecommendationContext::new(&p, &reference, Month::January).is_heating_weather());
        assert!(!RecommendationContext::new(&p, &reference, Month::July).is_heating_weather());
        assert!(RecommendationContext::new(&p, &reference, Month::July)
            .with_outdoor_temperature(12.0)
            .is_heating_weather());
        assert!(!RecommendationContext::new(&p, &reference, Month::January)
            .with_outdoor_temperature(16.0)
            .is_heating_weather());

        let reference =
            ReferenceData::from_toml_str("[thresholds]\nheating_weather_below_c = 18.0\n")
                .unwrap();
        assert!(RecommendationContext::new(&p, &reference, Month::July)
            .with_outdoor_temperature(16.0)
            .is_heating_weather());
    }

    #[test]
    fn test_stable_sort_on_equal_priority() {
        let recs = vec![
            Recommendation::new("first", "First", "", Category::Behavior, 5),
            Recommendation::new("high", "High", "", Category::Behavior, 9),
            Recommendation::new("second", "Second", "", Category::Timing, 5),
            Recommendation::new("third", "Third", "", Category::Efficiency, 5),
        ];
        let mut engine = RecommendationEngine::empty();
        engine.register(Box::new(FixedSource(recs)));

        let p = profile();
        let reference = ReferenceData::default();
        let ctx = RecommendationContext::new(&p, &reference, Month::May);
        let ranked = engine.generate(&ctx, &GenerateOptions::default()).unwrap();
        let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn test_failing_source_is_skipped() {
        let mut engine = RecommendationEngine::empty();
        engine.register(Box::new(FailingSource));
        engine.register(Box::new(FixedSource(vec![Recommendation::new(
            "ok",
            "Ok",
            "",
            Category::Behavior,
            5,
        )])));

        let p = profile();
        let reference = ReferenceData::default();
        let ctx = RecommendationContext::new(&p, &reference, Month::May);
        let recs = engine.generate(&ctx, &GenerateOptions::default()).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_empty_engine_is_valid() {
        let engine = RecommendationEngine::empty();
        let p = profile();
        let reference = ReferenceData::default();
        let ctx = RecommendationContext::new(&p, &reference, Month::May);
        assert!(engine.generate(&ctx, &GenerateOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut p = profile();
        p.annual_electricity_kwh = 0.0;
        let reference = ReferenceData::default();
        let ctx = RecommendationContext::new(&p, &reference, Month::May);
        let result = RecommendationEngine::new().generate(&ctx, &GenerateOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_summarize_top_n() {
        let recs = vec![
            Recommendation::new("a", "A", "", Category::Behavior, 9).with_saving(15.0, 10.0),
            Recommendation::new("b", "B", "", Category::Behavior, 8).with_saving(7.5, 5.0),
            Recommendation::new("c", "C", "", Category::Behavior, 7).with_saving(100.0, 66.0),
        ];
        let summary = summarize(&recs, 150.0, 2);
        assert_eq!(summary.monthly, 22.5);
        assert_eq!(summary.annual, 270.0);
        assert_eq!(summary.percent_of_spend, 15.0);
        assert_eq!(summary.top_actions, vec!["A".to_string(), "B".to_string()]);

        let summary = summarize(&[], 150.0, 5);
        assert_eq!(summary.monthly, 0.0);
        assert!(summary.top_actions.is_empty());
    }
}
