//! Tariff comparison and usage estimation

use anyhow::{Context, Result};
use wattwise_core::{
    compare, estimate_annual_usage, CompareOptions, DwellingType, ReferenceData, TariffCatalog,
};

use super::{print_json, truncate, Output};

pub fn cmd_tariffs(
    catalog: &TariffCatalog,
    current_annual_cost: f64,
    electricity_kwh: f64,
    gas_kwh: f64,
    prefer_green: bool,
    options: &CompareOptions,
    output: Output,
) -> Result<()> {
    let results = compare(
        catalog,
        current_annual_cost,
        electricity_kwh,
        gas_kwh,
        prefer_green,
        options,
    )
    .context("Failed to compare tariffs")?;

    if output == Output::Json {
        return print_json(&results);
    }

    println!();
    println!("🔌 Tariff Comparison");
    println!(
        "   Current cost: £{:.2}/year for {:.0} kWh electricity, {:.0} kWh gas",
        current_annual_cost, electricity_kwh, gas_kwh
    );
    if let Some(region) = options.region {
        println!("   Region: {}", region.display_name());
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if results.is_empty() {
        println!("   No tariffs available for this region.");
        return Ok(());
    }

    println!(
        "   {:28} │ {:8} │ {:>10} │ {:>10} │ {:>6}",
        "Tariff", "Type", "Annual", "Saving", "%"
    );
    println!("   ─────────────────────────────┼──────────┼────────────┼────────────┼───────");
    for result in &results {
        let label = format!("{} {}", result.tariff.supplier, result.tariff.name);
        let green = if result.tariff.green { " 🌱" } else { "" };
        println!(
            "   {:28} │ {:8} │ {:>10.2} │ {:>10.2} │ {:>5.1}%{}",
            truncate(&label, 28),
            result.tariff.tariff_type.as_str(),
            result.estimated_annual_cost,
            result.estimated_savings,
            result.savings_percent,
            green
        );
    }

    let best = &results[0];
    println!();
    if best.estimated_savings > 0.0 {
        println!(
            "✅ Switching to {} {} could save £{:.2}/year",
            best.tariff.supplier, best.tariff.name, best.estimated_savings
        );
    } else {
        println!("💡 You are already on a competitive tariff");
    }
    if best.tariff.exit_fee > 0.0 {
        println!("   Exit fee: £{:.2}", best.tariff.exit_fee);
    }

    Ok(())
}

pub fn cmd_usage(
    reference: &ReferenceData,
    daily_spend: f64,
    dwelling: DwellingType,
    occupants: u32,
    output: Output,
) -> Result<()> {
    let usage = estimate_annual_usage(daily_spend, dwelling, occupants, reference)
        .context("Failed to estimate usage")?;

    if output == Output::Json {
        return print_json(&usage);
    }

    println!();
    println!("📊 Estimated Annual Usage");
    println!(
        "   {} home, {} occupant(s), £{:.2}/day",
        dwelling, occupants, daily_spend
    );
    println!("   ─────────────────────────────");
    println!("   Electricity: {:>8.0} kWh", usage.electricity_kwh);
    println!("   Gas:         {:>8.0} kWh", usage.gas_kwh);

    Ok(())
}
