//! Multi-year savings projection
//!
//! Cumulative savings start at minus the upfront cost. Each year's saving is
//! the first-year saving scaled down by equipment degradation and up by
//! energy price inflation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Projection horizon and rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub years: u32,
    /// Output lost per year of age (0.005 = 0.5%/year)
    pub degradation_rate: f64,
    /// Annual energy price rise (0.03 = 3%/year)
    pub inflation_rate: f64,
    /// First-year generation, for per-year generation figures (kWh)
    pub baseline_generation_kwh: Option<f64>,
}

impl ProjectionConfig {
    pub fn new(years: u32, degradation_rate: f64, inflation_rate: f64) -> Self {
        Self {
            years,
            degradation_rate,
            inflation_rate,
            baseline_generation_kwh: None,
        }
    }

    /// 25 years, 0.5% panel degradation, 3% price inflation
    pub fn solar() -> Self {
        Self::new(25, 0.005, 0.03)
    }

    /// 20 years, no degradation, 4% price inflation
    pub fn heat_pump() -> Self {
        Self::new(20, 0.0, 0.04)
    }

    pub fn with_generation(mut self, annual_generation_kwh: f64) -> Self {
        self.baseline_generation_kwh = Some(annual_generation_kwh);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(Error::InvalidProjection(
                "projection needs at least one year".to_string(),
            ));
        }
        if !self.degradation_rate.is_finite() || self.degradation_rate < 0.0 {
            return Err(Error::InvalidProjection(format!(
                "degradation rate cannot be negative (got {})",
                self.degradation_rate
            )));
        }
        if !self.inflation_rate.is_finite() || self.inflation_rate < 0.0 {
            return Err(Error::InvalidProjection(format!(
                "inflation rate cannot be negative (got {})",
                self.inflation_rate
            )));
        }
        if 1.0 - self.degradation_rate * (self.years as f64) < 0.0 {
            return Err(Error::InvalidProjection(format!(
                "degradation rate {} exhausts the equipment within {} years",
                self.degradation_rate, self.years
            )));
        }
        if let Some(generation) = self.baseline_generation_kwh {
            if !generation.is_finite() || generation < 0.0 {
                return Err(Error::InvalidProjection(format!(
                    "baseline generation cannot be negative (got {})",
                    generation
                )));
            }
        }
        Ok(())
    }
}

/// One year of a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// 1-based
    pub year: u32,
    /// Running total including the upfront cost (£)
    pub cumulative_savings: f64,
    /// This year's saving (£)
    pub annual_saving: f64,
    pub degradation_factor: f64,
    pub annual_generation_kwh: Option<f64>,
}

/// First year in which cumulative savings reach zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "year", rename_all = "snake_case")]
pub enum BreakEven {
    Year(u32),
    /// Not within the projection horizon
    Never,
}

impl BreakEven {
    pub fn year(&self) -> Option<u32> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Never => None,
        }
    }
}

impl std::fmt::Display for BreakEven {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Year(year) => write!(f, "year {}", year),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Year-by-year savings for an upfront investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<ProjectionPoint>,
    pub break_even: BreakEven,
    pub upfront_cost: f64,
}

impl Projection {
    /// Final cumulative savings, net of the upfront cost (£)
    pub fn lifetime_savings(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.cumulative_savings)
            .unwrap_or(-self.upfront_cost)
    }

    /// Lifetime savings as a percentage of the upfront cost
    ///
    /// `None` when there is no upfront cost to return on.
    pub fn roi_percent(&self) -> Option<f64> {
        if self.upfront_cost > 0.0 {
            Some(self.lifetime_savings() / self.upfront_cost * 100.0)
        } else {
            None
        }
    }
}

/// Project savings over the configured horizon
///
/// `annual_savings` may be negative; the projection then never breaks even.
pub fn project(annual_savings: f64, upfront_cost: f64, config: &ProjectionConfig) -> Result<Projection> {
    config.validate()?;
    if !annual_savings.is_finite() {
        return Err(Error::InvalidProjection(format!(
            "annual savings must be a finite number (got {})",
            annual_savings
        )));
    }
    if !upfront_cost.is_finite() || upfront_cost < 0.0 {
        return Err(Error::InvalidProjection(format!(
            "upfront cost cannot be negative (got {})",
            upfront_cost
        )));
    }

    let mut cumulative = -upfront_cost;
    let mut break_even = BreakEven::Never;
    let mut points = Vec::with_capacity(config.years as usize);

    for year in 1..=config.years {
        let degradation = 1.0 - config.degradation_rate * year as f64;
        let inflation = (1.0 + config.inflation_rate).powi(year as i32 - 1);
        let saving = annual_savings * degradation * inflation;
        cumulative += saving;

        if break_even == BreakEven::Never && cumulative >= 0.0 {
            break_even = BreakEven::Year(year);
        }

        points.push(ProjectionPoint {
            year,
            cumulative_savings: cumulative,
            annual_saving: saving,
            degradation_factor: degradation,
            annual_generation_kwh: config.baseline_generation_kwh.map(|g| g * degradation),
        });
    }

    tracing::debug!(
        years = config.years,
        upfront_cost,
        lifetime = cumulative,
        break_even = %break_even,
        "Projected savings"
    );

    Ok(Projection {
        points,
        break_even,
        upfront_cost,
    })
}
