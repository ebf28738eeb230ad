//! Region lookup and reference table display

use std::path::Path;

use anyhow::Result;
use wattwise_core::{
    default_reference_path, postcode_area, ReferenceData, Region,
};

use super::{print_json, Output};

pub fn cmd_region(reference: &ReferenceData, postcode: &str, output: Output) -> Result<()> {
    let region = reference.region_for(postcode);
    let profile = region.profile(reference);

    if output == Output::Json {
        return print_json(&profile);
    }

    println!();
    println!("📍 {}", region.display_name());
    println!("   ─────────────────────────────");
    match postcode_area(postcode) {
        Ok(area) => println!("   Postcode area:   {}", area),
        Err(_) => println!("   ⚠️  No postcode area found, using UK averages"),
    }
    println!("   Region id:       {}", region);
    println!(
        "   Avg temperature: {:.1} °C",
        profile.average_temperature_c
    );
    println!("   Degree days:     {:.0}", profile.heating_degree_days);
    println!(
        "   Solar yield:     {:.0} kWh/kWp/year",
        profile.solar_yield_kwh_per_kwp
    );

    Ok(())
}

/// Where the tables in effect came from
fn reference_source(explicit: Option<&Path>) -> String {
    if let Some(path) = explicit {
        return path.display().to_string();
    }
    match default_reference_path() {
        Some(path) if path.exists() => path.display().to_string(),
        _ => "built-in defaults".to_string(),
    }
}

pub fn cmd_reference(
    reference: &ReferenceData,
    explicit: Option<&Path>,
    output: Output,
) -> Result<()> {
    if output == Output::Json {
        return print_json(reference);
    }

    println!();
    println!("📚 Reference Tables");
    println!("   Source: {}", reference_source(explicit));
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:24} │ {:>7} │ {:>11} │ {:>11}",
        "Region", "Temp °C", "Degree days", "kWh/kWp"
    );
    println!("   ─────────────────────────┼─────────┼─────────────┼────────────");
    for region in Region::all() {
        let climate = reference.climate(*region);
        println!(
            "   {:24} │ {:>7.1} │ {:>11.0} │ {:>11.0}",
            region.display_name(),
            climate.average_temperature_c,
            climate.heating_degree_days,
            climate.solar_yield_kwh_per_kwp
        );
    }

    println!();
    println!(
        "   Solar: £{:.0}/kWp standard, {:.0} W panels, {:.1}-{:.1} kWp",
        reference.solar.cost_per_kwp.standard,
        reference.solar.panel_watts,
        reference.solar.min_kwp,
        reference.solar.max_kwp
    );
    println!(
        "   Boiler Upgrade Scheme grant: £{:.0}",
        reference.grants.boiler_upgrade_scheme_gbp
    );
    println!(
        "   UK monthly dual fuel average: £{:.0}",
        reference.benchmarks.monthly_dual_fuel_gbp
    );

    Ok(())
}
