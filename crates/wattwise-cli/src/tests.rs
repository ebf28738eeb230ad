//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use chrono::Month;
use wattwise_core::{CompareOptions, DwellingType, Region};

use crate::commands::{self, truncate, Output, ProfileSource};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const PROFILE_TOML: &str = r#"
postcode = "M14 5TQ"
dwelling_type = "semi-detached"
occupants = 3
heating_system = "gas-boiler"
annual_gas_kwh = 12000.0
annual_electricity_kwh = 3000.0
gas_rate_pence = 6.0
electricity_rate_pence = 24.0
construction_year = 1975
monthly_spend_gbp = 150.0
"#;

// ========== Loader Tests ==========

#[test]
fn test_profile_source_from_arg() {
    assert_eq!(ProfileSource::from_arg(None), ProfileSource::Demo);
    let path = std::path::PathBuf::from("home.toml");
    assert_eq!(
        ProfileSource::from_arg(Some(path.clone())),
        ProfileSource::File(path)
    );
}

#[test]
fn test_demo_profile_is_valid() {
    let profile = ProfileSource::Demo.load().unwrap();
    assert_eq!(profile.region(), Region::London);
    assert_eq!(profile.floor_area_m2, Some(100.0));
}

#[test]
fn test_load_toml_profile() {
    let file = write_temp(".toml", PROFILE_TOML);
    let profile = ProfileSource::File(file.path().to_path_buf())
        .load()
        .unwrap();
    assert_eq!(profile.region(), Region::NorthWest);
    assert_eq!(profile.dwelling_type, DwellingType::SemiDetached);
    assert_eq!(profile.construction_year, Some(1975));
}

#[test]
fn test_load_json_profile() {
    let json = r#"{
        "postcode": "EH1 1AA",
        "dwelling_type": "flat",
        "occupants": 1,
        "heating_system": "electric",
        "annual_gas_kwh": 0.0,
        "annual_electricity_kwh": 4000.0,
        "gas_rate_pence": 0.0,
        "electricity_rate_pence": 24.0
    }"#;
    let file = write_temp(".json", json);
    let profile = ProfileSource::File(file.path().to_path_buf())
        .load()
        .unwrap();
    assert_eq!(profile.region(), Region::Scotland);
    assert_eq!(profile.occupants, 1);
}

#[test]
fn test_load_invalid_profile_fails() {
    let file = write_temp(".toml", &PROFILE_TOML.replace("occupants = 3", "occupants = 0"));
    let result = ProfileSource::File(file.path().to_path_buf()).load();
    assert!(result.is_err());
}

#[test]
fn test_load_missing_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = ProfileSource::File(dir.path().join("missing.toml")).load();
    assert!(result.is_err());
}

#[test]
fn test_load_reference_override() {
    let file = write_temp(".toml", "[grants]\nboiler_upgrade_scheme_gbp = 5000.0\n");
    let reference = commands::load_reference(Some(file.path())).unwrap();
    assert_eq!(reference.grants.boiler_upgrade_scheme_gbp, 5000.0);
}

#[test]
fn test_load_reference_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("reference.toml");
    assert!(commands::load_reference(Some(&missing)).is_err());
}

#[test]
fn test_load_catalog_builtin_and_csv() {
    let builtin = commands::load_catalog(None).unwrap();
    assert!(!builtin.is_empty());

    let csv = write_temp(
        ".csv",
        "id,supplier,name,tariff_type,electricity_rate,gas_rate,electricity_standing_charge,gas_standing_charge,contract_months,exit_fee,green,rating,region
only,Solo,Solo Fix,fixed,20.0,5.0,45.0,25.0,12,50,false,4.0,national
",
    );
    let catalog = commands::load_catalog(Some(csv.path())).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.find("only").is_some());
}

#[test]
fn test_load_catalog_unknown_extension_fails() {
    let file = write_temp(".txt", "[]");
    assert!(commands::load_catalog(Some(file.path())).is_err());
}

// ========== Argument Helper Tests ==========

#[test]
fn test_resolve_month() {
    assert_eq!(commands::resolve_month(Some("1")).unwrap(), Month::January);
    assert_eq!(commands::resolve_month(Some("12")).unwrap(), Month::December);
    assert_eq!(commands::resolve_month(Some("july")).unwrap(), Month::July);
    assert_eq!(commands::resolve_month(Some("Oct")).unwrap(), Month::October);
    assert!(commands::resolve_month(Some("13")).is_err());
    assert!(commands::resolve_month(Some("0")).is_err());
    assert!(commands::resolve_month(Some("smarch")).is_err());
    assert!(commands::resolve_month(None).is_ok());
}

#[test]
fn test_projection_config_presets() {
    let solar = commands::projection_config("solar", None, None, None).unwrap();
    assert_eq!(solar.years, 25);
    assert_eq!(solar.degradation_rate, 0.005);

    let heat_pump = commands::projection_config("heat-pump", Some(15), None, Some(0.05)).unwrap();
    assert_eq!(heat_pump.years, 15);
    assert_eq!(heat_pump.degradation_rate, 0.0);
    assert_eq!(heat_pump.inflation_rate, 0.05);

    assert!(commands::projection_config("wind", None, None, None).is_err());
}

#[test]
fn test_generate_options() {
    let default = commands::generate_options(false, false);
    assert!(default.include_upgrades);
    assert_eq!(default.max_payback_months, 60.0);

    let cheap = commands::generate_options(true, true);
    assert!(!cheap.include_upgrades);
    assert_eq!(cheap.max_upfront_cost, 1000.0);
    assert_eq!(cheap.max_payback_months, 24.0);
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Lower thermostat by 1°C today", 10), "Lower t...");
}

// ========== Command Tests ==========

#[test]
fn test_cmd_region() {
    let reference = commands::load_reference(None).unwrap();
    assert!(commands::cmd_region(&reference, "SW1A 1AA", Output::Report).is_ok());
    assert!(commands::cmd_region(&reference, "123", Output::Report).is_ok());
    assert!(commands::cmd_region(&reference, "BT1", Output::Json).is_ok());
}

#[test]
fn test_cmd_region_with_area_override() {
    let file = write_temp(".toml", "[postcode_areas]\nJE = \"south-west\"\n");
    let reference = commands::load_reference(Some(file.path())).unwrap();
    assert_eq!(reference.region_for("JE2 3AB"), Region::SouthWest);
    assert!(commands::cmd_region(&reference, "JE2 3AB", Output::Json).is_ok());
}

#[test]
fn test_cmd_solar() {
    let reference = wattwise_core::ReferenceData::default();
    let profile = commands::demo_profile();
    assert!(commands::cmd_solar(&reference, &profile, Output::Report).is_ok());
    assert!(commands::cmd_solar(&reference, &profile, Output::Json).is_ok());
}

#[test]
fn test_cmd_heat_pump() {
    let reference = wattwise_core::ReferenceData::default();
    let profile = commands::demo_profile();
    assert!(commands::cmd_heat_pump(&reference, &profile, Output::Report).is_ok());
    assert!(commands::cmd_heat_pump(&reference, &profile, Output::Json).is_ok());
}

#[test]
fn test_cmd_heat_pump_requires_gas_use() {
    let reference = wattwise_core::ReferenceData::default();
    let mut profile = commands::demo_profile();
    profile.annual_gas_kwh = 0.0;
    assert!(commands::cmd_heat_pump(&reference, &profile, Output::Report).is_err());
}

#[test]
fn test_cmd_project() {
    let config = commands::projection_config("solar", None, None, None).unwrap();
    assert!(commands::cmd_project(400.0, 4200.0, &config, Output::Report).is_ok());
    assert!(commands::cmd_project(-100.0, 4200.0, &config, Output::Json).is_ok());

    let bad = commands::projection_config("solar", Some(0), None, None).unwrap();
    assert!(commands::cmd_project(400.0, 4200.0, &bad, Output::Report).is_err());
}

#[test]
fn test_cmd_recommend() {
    let reference = wattwise_core::ReferenceData::default();
    let file = write_temp(".toml", PROFILE_TOML);
    let profile = ProfileSource::File(file.path().to_path_buf())
        .load()
        .unwrap();

    let options = commands::generate_options(false, false);
    let result = commands::cmd_recommend(
        &reference,
        &profile,
        Month::January,
        None,
        &options,
        5,
        Output::Report,
    );
    assert!(result.is_ok());

    let low_cost = commands::generate_options(true, false);
    let result = commands::cmd_recommend(
        &reference,
        &profile,
        Month::July,
        Some(22.0),
        &low_cost,
        3,
        Output::Json,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_recommend_invalid_profile() {
    let reference = wattwise_core::ReferenceData::default();
    let mut profile = commands::demo_profile();
    profile.electricity_rate_pence = -1.0;
    let options = commands::generate_options(false, false);
    let result = commands::cmd_recommend(
        &reference,
        &profile,
        Month::March,
        None,
        &options,
        10,
        Output::Report,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_tariffs() {
    let catalog = commands::load_catalog(None).unwrap();
    let options = CompareOptions::default().with_region(Region::London);
    let result = commands::cmd_tariffs(
        &catalog,
        1800.0,
        3000.0,
        11000.0,
        true,
        &options,
        Output::Report,
    );
    assert!(result.is_ok());

    let result = commands::cmd_tariffs(
        &catalog,
        1800.0,
        3000.0,
        11000.0,
        false,
        &CompareOptions::default(),
        Output::Json,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_tariffs_rejects_zero_cost() {
    let catalog = commands::load_catalog(None).unwrap();
    let result = commands::cmd_tariffs(
        &catalog,
        0.0,
        3000.0,
        11000.0,
        false,
        &CompareOptions::default(),
        Output::Report,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_usage() {
    let reference = wattwise_core::ReferenceData::default();
    assert!(
        commands::cmd_usage(&reference, 4.5, DwellingType::SemiDetached, 3, Output::Report)
            .is_ok()
    );
    assert!(commands::cmd_usage(&reference, 3.0, DwellingType::Flat, 1, Output::Json).is_ok());
    assert!(
        commands::cmd_usage(&reference, 0.0, DwellingType::Flat, 1, Output::Report).is_err()
    );
    assert!(
        commands::cmd_usage(&reference, 4.0, DwellingType::Terraced, 0, Output::Report).is_err()
    );
}

#[test]
fn test_cmd_reference() {
    let reference = wattwise_core::ReferenceData::default();
    assert!(commands::cmd_reference(&reference, None, Output::Report).is_ok());
    assert!(commands::cmd_reference(&reference, None, Output::Json).is_ok());
}
