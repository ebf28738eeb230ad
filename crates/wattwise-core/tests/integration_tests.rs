//! Integration tests for wattwise-core
//!
//! These tests exercise full flows: profile file → reference tables →
//! advisors, recommendations and tariff comparison.

use std::io::Write;

use chrono::Month;
use tempfile::NamedTempFile;
use wattwise_core::{
    compare, estimate_annual_usage, BreakEven, CompareOptions, DwellingType, GenerateOptions,
    HeatPumpAdvisor, HeatingSystem, HouseholdProfile, InsulationRating, RecommendationContext,
    RecommendationEngine, ReferenceData, Region, SolarAdvisor, TariffCatalog,
};

/// A 1970s gas-heated semi in Manchester with a known monthly bill
fn manchester_semi() -> HouseholdProfile {
    HouseholdProfile::new(
        "M14 5TQ",
        DwellingType::SemiDetached,
        3,
        HeatingSystem::GasBoiler,
        12000.0,
        3000.0,
        6.0,
        24.0,
    )
    .with_construction_year(1975)
    .with_monthly_spend(150.0)
}

// =============================================================================
// Profile and Reference Loading
// =============================================================================

#[test]
fn test_profile_file_to_solar_report() {
    let toml = r#"
postcode = "SW1A 1AA"
dwelling_type = "semi-detached"
occupants = 3
heating_system = "gas-boiler"
annual_gas_kwh = 12000.0
annual_electricity_kwh = 3500.0
gas_rate_pence = 6.0
electricity_rate_pence = 24.0
roof_area_m2 = 30.0
roof_orientation = "south-facing"
"#;
    let profile: HouseholdProfile = toml::from_str(toml).expect("profile should parse");
    let reference = ReferenceData::default();

    let report = SolarAdvisor::new(&reference)
        .advise(&profile)
        .expect("solar report");

    assert_eq!(report.region, Region::London);
    assert!((report.size_kwp - 3.0).abs() < 0.01);
    assert_eq!(report.annual_savings, 397.0);
    assert_eq!(report.projection.points.len(), 25);
}

#[test]
fn test_reference_override_changes_results() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[grants]
boiler_upgrade_scheme_gbp = 10000.0

[savings]
heating_schedule = 0.20
"#
    )
    .unwrap();

    let reference = ReferenceData::load(Some(file.path())).expect("override should load");
    assert_eq!(reference.grants.boiler_upgrade_scheme_gbp, 10000.0);
    // Untouched sections keep their defaults
    assert_eq!(reference.solar.panel_watts, 400.0);

    let profile = manchester_semi()
        .with_floor_area(100.0)
        .with_insulation(InsulationRating::C);
    let report = HeatPumpAdvisor::new(&reference).advise(&profile).unwrap();
    // 8 kW medium unit 10000 + radiators 3000 + cylinder 1500 - 10000
    assert_eq!(report.installation.after_grant(), 4500.0);

    let ctx = RecommendationContext::new(&profile, &reference, Month::July);
    let recs = RecommendationEngine::new()
        .generate(&ctx, &GenerateOptions::default())
        .unwrap();
    let schedule = recs.iter().find(|r| r.id == "heating-schedule").unwrap();
    assert!((schedule.monthly_saving - 30.0).abs() < 0.01);
}

#[test]
fn test_missing_explicit_override_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(ReferenceData::load(Some(&missing)).is_err());
}

// =============================================================================
// Heat Pump Scenario
// =============================================================================

#[test]
fn test_london_heat_pump_scenario() {
    let profile = HouseholdProfile::new(
        "SE1 7PB",
        DwellingType::SemiDetached,
        2,
        HeatingSystem::GasBoiler,
        12000.0,
        3200.0,
        6.0,
        24.0,
    )
    .with_floor_area(100.0)
    .with_insulation(InsulationRating::C);
    let reference = ReferenceData::default();

    let report = HeatPumpAdvisor::new(&reference).advise(&profile).unwrap();
    assert_eq!(report.size_kw, 8);
    assert_eq!(report.scop, 3.5);
    assert_eq!(report.annual_savings, 127.0);
    assert_eq!(report.break_even, BreakEven::Never);
    assert_eq!(report.projection.points.len(), 20);
    assert!(report.is_suitable());
}

// =============================================================================
// Recommendations
// =============================================================================

#[test]
fn test_default_generation_filters_heat_pump_payback() {
    let profile = manchester_semi();
    let reference = ReferenceData::default();
    let ctx = RecommendationContext::new(&profile, &reference, Month::January);

    let recs = RecommendationEngine::new()
        .generate(&ctx, &GenerateOptions::default())
        .unwrap();

    // Heat pump pays back in 84 months, over the 60 month default
    assert!(recs.iter().all(|r| r.id != "heat-pump-upgrade"));
    assert!(recs.iter().all(|r| r.payback_months <= 60.0));

    let top: Vec<&str> = recs.iter().take(3).map(|r| r.id.as_str()).collect();
    assert_eq!(
        top,
        vec!["thermostat-1c", "loft-insulation", "cavity-wall-insulation"]
    );

    for pair in recs.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
}

#[test]
fn test_low_cost_filter_keeps_short_paybacks() {
    let profile = manchester_semi();
    let reference = ReferenceData::default();
    let ctx = RecommendationContext::new(&profile, &reference, Month::January);

    let recs = RecommendationEngine::new()
        .generate(&ctx, &GenerateOptions::low_cost())
        .unwrap();
    assert!(recs.iter().all(|r| r.payback_months <= 24.0));
    assert!(recs.iter().all(|r| r.upfront_cost <= 1000.0));
    assert!(recs.iter().any(|r| r.id == "smart-thermostat"));
    assert!(recs.iter().all(|r| r.id != "loft-insulation"));
}

#[test]
fn test_savings_potential() {
    let profile = manchester_semi();
    let reference = ReferenceData::default();
    let ctx = RecommendationContext::new(&profile, &reference, Month::January);

    let summary = RecommendationEngine::new().savings_potential(&ctx).unwrap();
    // Thermostat 15 + schedule 22.5 + fixed tariff 15 + draught 22.5 + smart thermostat 18
    assert!((summary.monthly - 93.0).abs() < 0.01);
    assert!((summary.annual - 1116.0).abs() < 0.01);
    assert!((summary.percent_of_spend - 62.0).abs() < 0.01);
    assert_eq!(
        summary.top_actions,
        vec![
            "Lower thermostat by 1°C",
            "Optimize heating schedule",
            "Switch to fixed-rate tariff",
            "Draft proofing",
            "Install smart thermostat",
        ]
    );
}

#[test]
fn test_generation_is_repeatable() {
    let profile = manchester_semi();
    let reference = ReferenceData::default();
    let engine = RecommendationEngine::new();
    let ctx = RecommendationContext::new(&profile, &reference, Month::October);

    let first = engine.generate(&ctx, &GenerateOptions::default()).unwrap();
    let second = engine.generate(&ctx, &GenerateOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_upgrades_can_be_disabled() {
    let profile = manchester_semi();
    let reference = ReferenceData::default();
    let ctx = RecommendationContext::new(&profile, &reference, Month::January);
    let options = GenerateOptions {
        include_upgrades: false,
        ..GenerateOptions::default()
    };

    let recs = RecommendationEngine::new().generate(&ctx, &options).unwrap();
    assert!(!recs.is_empty());
    assert!(recs
        .iter()
        .all(|r| r.category != wattwise_core::Category::Upgrade));
}

// =============================================================================
// Tariffs
// =============================================================================

#[test]
fn test_estimated_usage_feeds_comparison() {
    let reference = ReferenceData::default();
    let usage = estimate_annual_usage(4.5, DwellingType::SemiDetached, 3, &reference).unwrap();
    let catalog = TariffCatalog::builtin().unwrap();

    let options = CompareOptions::default().with_region(Region::Scotland);
    let results = compare(
        &catalog,
        1800.0,
        usage.electricity_kwh,
        usage.gas_kwh,
        true,
        &options,
    )
    .unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 3);
    for comparison in &results {
        assert!(comparison
            .tariff
            .region
            .covers(Region::Scotland));
        let expected = comparison
            .tariff
            .annual_cost(usage.electricity_kwh, usage.gas_kwh);
        assert!((comparison.estimated_annual_cost - expected).abs() < 0.01);
        assert!((comparison.estimated_savings - (1800.0 - expected)).abs() < 0.01);
    }
}

#[test]
fn test_csv_catalog_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "id,supplier,name,tariff_type,electricity_rate,gas_rate,electricity_standing_charge,gas_standing_charge,contract_months,exit_fee,green,rating,region
a,Alpha,Alpha Fix,fixed,18.0,4.5,40.0,20.0,12,0,true,4.5,national
b,Beta,Beta Var,variable,17.9,4.5,40.0,20.0,0,0,false,4.0,national
"
    )
    .unwrap();

    let catalog = TariffCatalog::load(file.path()).unwrap();
    let results = compare(
        &catalog,
        1400.0,
        3200.0,
        12000.0,
        false,
        &CompareOptions::default(),
    )
    .unwrap();
    assert_eq!(results[0].tariff.id, "b");
    assert!((results[0].estimated_savings - 68.2).abs() < 0.01);
}
