//! Advisors - End-to-End Reports
//!
//! Each advisor takes a validated household profile and runs the sizing,
//! cost, projection and suitability calculators in order, returning one
//! serializable report with the numbers plus plain-English guidance.
//!
//! ```rust,ignore
//! use wattwise_core::advisor::SolarAdvisor;
//!
//! let report = SolarAdvisor::new(&reference).advise(&profile)?;
//! println!("{} kWp, payback {}", report.size_kwp, report.payback);
//! ```

pub mod heat_pump;
pub mod solar;

pub use heat_pump::{HeatPumpAdvisor, HeatPumpReport, UpgradePriority, UpgradeRecommendation};
pub use solar::{SolarAdvisor, SolarReport};

/// Whole pounds with thousands separators (e.g. "£7,500")
pub fn gbp(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-£{}", grouped)
    } else {
        format!("£{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbp_formatting() {
        assert_eq!(gbp(7500.0), "£7,500");
        assert_eq!(gbp(950.4), "£950");
        assert_eq!(gbp(1234567.0), "£1,234,567");
        assert_eq!(gbp(-2500.0), "-£2,500");
        assert_eq!(gbp(0.0), "£0");
    }
}
