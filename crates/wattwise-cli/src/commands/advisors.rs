//! Solar, heat pump and projection commands

use anyhow::{Context, Result};
use wattwise_core::advisor::gbp;
use wattwise_core::{
    project, HeatPumpAdvisor, HeatPumpReport, HouseholdProfile, Projection, ProjectionConfig,
    ReferenceData, SolarAdvisor, SolarReport, SystemOption,
};

use super::{print_json, Output};

pub fn cmd_solar(
    reference: &ReferenceData,
    profile: &HouseholdProfile,
    output: Output,
) -> Result<()> {
    let report = SolarAdvisor::new(reference)
        .advise(profile)
        .context("Failed to build solar report")?;

    match output {
        Output::Json => print_json(&report),
        Output::Report => {
            print_solar_report(&report);
            Ok(())
        }
    }
}

fn print_solar_report(report: &SolarReport) {
    println!();
    println!("☀️  Solar PV Report ({})", report.region.display_name());
    println!("   ─────────────────────────────────────────────");
    println!(
        "   System size:     {:.1} kWp ({} panels)",
        report.size_kwp, report.panel_count
    );
    println!(
        "   Generation:      {:.0} kWh/year ({:.0} used at home, {:.0} exported)",
        report.annual_generation_kwh, report.self_consumption_kwh, report.export_kwh
    );
    println!(
        "   Annual savings:  {} (incl. {} export income)",
        gbp(report.annual_savings),
        gbp(report.export_income)
    );
    println!("   System cost:     {} (standard)", gbp(report.system_cost));
    println!("   Payback:         {}", report.payback);
    println!(
        "   Break-even:      {}",
        report.projection.break_even
    );
    match report.roi_percent {
        Some(roi) => println!(
            "   {}-year net:     {} (ROI {:.0}%)",
            report.projection.points.len(),
            gbp(report.lifetime_savings),
            roi
        ),
        None => println!(
            "   {}-year net:     {}",
            report.projection.points.len(),
            gbp(report.lifetime_savings)
        ),
    }
    println!("   CO₂ reduction:   {:.0} kg/year", report.co2_reduction_kg);
    println!(
        "   Suitability:     {} ({})",
        report.suitability,
        report.suitability.label()
    );

    print_options(&report.options);

    println!();
    if report.battery.recommended {
        println!(
            "   🔋 Battery: {:.0} kWh for {}, saves {}/year extra",
            report.battery.size_kwh,
            gbp(report.battery.cost),
            gbp(report.battery.additional_savings)
        );
    } else {
        println!("   🔋 Battery: not recommended");
    }
    println!("      {}", report.battery.reason);

    print_warnings(&report.warnings);
}

pub fn cmd_heat_pump(
    reference: &ReferenceData,
    profile: &HouseholdProfile,
    output: Output,
) -> Result<()> {
    let report = HeatPumpAdvisor::new(reference)
        .advise(profile)
        .context("Failed to build heat pump report")?;

    match output {
        Output::Json => print_json(&report),
        Output::Report => {
            print_heat_pump_report(&report);
            Ok(())
        }
    }
}

fn print_heat_pump_report(report: &HeatPumpReport) {
    println!();
    println!("🔥 Heat Pump Report ({})", report.region.display_name());
    println!("   ─────────────────────────────────────────────");
    println!(
        "   Floor area:      {:.0} m²{}",
        report.floor_area_m2,
        if report.floor_area_estimated {
            " (estimated from gas use)"
        } else {
            ""
        }
    );
    println!("   Heat pump size:  {} kW (SCOP {:.1})", report.size_kw, report.scop);
    println!(
        "   Running cost:    {}/year vs {}/year for the boiler",
        gbp(report.heat_pump_running_cost),
        gbp(report.boiler_running_cost)
    );
    println!("   Annual savings:  {}", gbp(report.annual_savings));
    println!(
        "   Installation:    {} before grant, {} after",
        gbp(report.installation.before_grant()),
        gbp(report.installation.after_grant())
    );
    println!("   Payback:         {}", report.payback);
    println!("   Break-even:      {}", report.break_even);
    println!(
        "   {}-year net:     {}",
        report.projection.points.len(),
        gbp(report.lifetime_savings)
    );
    println!("   CO₂ reduction:   {:.0} kg/year", report.co2_reduction_kg);
    println!(
        "   Suitability:     {} ({})",
        report.suitability,
        report.suitability.label()
    );

    println!();
    if report.is_suitable() {
        println!("✅ {}", report.reasoning());
    } else {
        println!("⚠️  {}", report.reasoning());
    }
    for verdict in &report.verdicts {
        println!("   {}", verdict);
    }

    if !report.pros.is_empty() {
        println!();
        println!("   Pros:");
        for pro in &report.pros {
            println!("   + {}", pro);
        }
    }
    if !report.cons.is_empty() {
        println!();
        println!("   Cons:");
        for con in &report.cons {
            println!("   - {}", con);
        }
    }

    if !report.upgrades.is_empty() {
        println!();
        println!("   Upgrades before installing:");
        for upgrade in &report.upgrades {
            println!(
                "   [{}] {} ({}): {}",
                upgrade.priority,
                upgrade.upgrade,
                gbp(upgrade.cost),
                upgrade.benefit
            );
        }
    }

    print_options(&report.options);
    print_warnings(&report.warnings);
}

pub fn cmd_project(
    annual_savings: f64,
    upfront_cost: f64,
    config: &ProjectionConfig,
    output: Output,
) -> Result<()> {
    let projection =
        project(annual_savings, upfront_cost, config).context("Failed to project savings")?;

    match output {
        Output::Json => print_json(&projection),
        Output::Report => {
            print_projection(&projection);
            Ok(())
        }
    }
}

fn print_projection(projection: &Projection) {
    println!();
    println!(
        "📈 {}-Year Savings Projection (upfront {})",
        projection.points.len(),
        gbp(projection.upfront_cost)
    );
    println!("   ─────────────────────────────────────────────");
    println!("   {:>4} │ {:>10} │ {:>12}", "Year", "Saving", "Cumulative");
    println!("   ─────┼────────────┼─────────────");
    for point in &projection.points {
        println!(
            "   {:>4} │ {:>10.2} │ {:>12.2}",
            point.year, point.annual_saving, point.cumulative_savings
        );
    }
    println!();
    println!("   Break-even: {}", projection.break_even);
    println!("   Net savings: {}", gbp(projection.lifetime_savings()));
    if let Some(roi) = projection.roi_percent() {
        println!("   ROI: {:.0}%", roi);
    }
}

fn print_options(options: &[SystemOption]) {
    if options.is_empty() {
        return;
    }
    println!();
    println!("   {:10} │ {:>9} │ {:>9} │ {:>12}", "Tier", "Cost", "Savings", "Payback");
    println!("   ───────────┼───────────┼───────────┼─────────────");
    for option in options {
        println!(
            "   {:10} │ {:>9} │ {:>9} │ {:>12}",
            option.tier.as_str(),
            gbp(option.cost),
            gbp(option.annual_savings),
            option.payback.to_string()
        );
    }
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    for warning in warnings {
        println!("⚠️  {}", warning);
    }
}
