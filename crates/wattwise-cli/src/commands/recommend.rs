//! Savings action ranking

use anyhow::{Context, Result};
use chrono::Month;
use wattwise_core::{
    summarize, GenerateOptions, HouseholdProfile, Recommendation, RecommendationContext,
    RecommendationEngine, ReferenceData, SavingsSummary,
};

use super::{print_json, truncate, Output};

pub fn cmd_recommend(
    reference: &ReferenceData,
    profile: &HouseholdProfile,
    month: Month,
    outdoor_temperature_c: Option<f64>,
    options: &GenerateOptions,
    limit: usize,
    output: Output,
) -> Result<()> {
    let mut ctx = RecommendationContext::new(profile, reference, month);
    if let Some(temperature) = outdoor_temperature_c {
        ctx = ctx.with_outdoor_temperature(temperature);
    }

    let engine = RecommendationEngine::new();
    let mut recs = engine
        .generate(&ctx, options)
        .context("Failed to generate recommendations")?;
    recs.truncate(limit);
    let summary = summarize(&recs, ctx.monthly_spend(), limit);

    tracing::debug!(
        count = recs.len(),
        month = month.name(),
        "Generated recommendations"
    );

    match output {
        Output::Json => print_json(&serde_json::json!({
            "month": month.name(),
            "season": ctx.season(),
            "recommendations": recs,
            "summary": summary,
        })),
        Output::Report => {
            print_recommendations(&ctx, month, &recs, &summary);
            Ok(())
        }
    }
}

fn print_recommendations(
    ctx: &RecommendationContext<'_>,
    month: Month,
    recs: &[Recommendation],
    summary: &SavingsSummary,
) {
    println!();
    println!(
        "💡 Savings Actions ({}, {} {})",
        ctx.reference.region_for(&ctx.profile.postcode).display_name(),
        month.name(),
        ctx.season()
    );
    println!("   Monthly spend: £{:.2}", ctx.monthly_spend());
    println!("   ─────────────────────────────────────────────");

    if recs.is_empty() {
        println!("   No actions match these filters.");
        return;
    }

    println!(
        "   {:>2}  {:32} │ {:>9} │ {:>8} │ {:>7} │ {:10}",
        "#", "Action", "£/month", "Cost", "Payback", "Category"
    );
    println!("   ────────────────────────────────────┼───────────┼──────────┼─────────┼───────────");
    for (i, rec) in recs.iter().enumerate() {
        let payback = if rec.payback_months > 0.0 {
            format!("{:.0} mo", rec.payback_months)
        } else {
            "now".to_string()
        };
        println!(
            "   {:>2}. {:32} │ {:>9.2} │ {:>8.0} │ {:>7} │ {:10}",
            i + 1,
            truncate(&rec.title, 32),
            rec.monthly_saving,
            rec.upfront_cost,
            payback,
            rec.category.as_str()
        );
    }

    println!();
    println!(
        "✅ Potential savings: £{:.2}/month (£{:.2}/year, {:.1}% of spend)",
        summary.monthly, summary.annual, summary.percent_of_spend
    );
}
