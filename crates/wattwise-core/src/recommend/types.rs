//! Core types for the recommendation engine

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in recommendation sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Zero-cost habit changes
    Behavioral,
    /// Tariff switching
    Tariff,
    /// Low-cost efficiency fixes
    Efficiency,
    /// Installed upgrades with a real upfront cost
    Upgrade,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Behavioral => "behavioral",
            SourceKind::Tariff => "tariff",
            SourceKind::Efficiency => "efficiency",
            SourceKind::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of action a recommendation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Behavior,
    Upgrade,
    Tariff,
    Timing,
    Efficiency,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Behavior => "behavior",
            Category::Upgrade => "upgrade",
            Category::Tariff => "tariff",
            Category::Timing => "timing",
            Category::Efficiency => "efficiency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "behavior" => Ok(Category::Behavior),
            "upgrade" => Ok(Category::Upgrade),
            "tariff" => Ok(Category::Tariff),
            "timing" => Ok(Category::Timing),
            "efficiency" => Ok(Category::Efficiency),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How sure we are the saving will materialise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Meteorological season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December to February
    Winter,
    /// March to May
    Spring,
    /// June to August
    Summer,
    /// September to November
    Autumn,
}

impl Season {
    pub fn from_month(month: Month) -> Self {
        match month {
            Month::December | Month::January | Month::February => Season::Winter,
            Month::March | Month::April | Month::May => Season::Spring,
            Month::June | Month::July | Month::August => Season::Summer,
            Month::September | Month::October | Month::November => Season::Autumn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings action for a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable identifier (e.g., "loft-insulation")
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Estimated saving (£/month)
    pub monthly_saving: f64,
    /// Saving as a percentage of spend (0-100)
    pub saving_percent: f64,
    pub difficulty: Difficulty,
    /// 1-10, higher first
    pub priority: u8,
    /// £
    pub upfront_cost: f64,
    pub payback_months: f64,
    /// Ordered steps to act on it
    pub actions: Vec<String>,
    pub confidence: Confidence,
    pub tags: Vec<String>,
}

impl Recommendation {
    /// Create a zero-cost, easy, high-confidence recommendation
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        priority: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            monthly_saving: 0.0,
            saving_percent: 0.0,
            difficulty: Difficulty::Easy,
            priority: priority.clamp(1, 10),
            upfront_cost: 0.0,
            payback_months: 0.0,
            actions: Vec::new(),
            confidence: Confidence::High,
            tags: Vec::new(),
        }
    }

    /// Monthly saving and the percentage it represents
    pub fn with_saving(mut self, monthly_saving: f64, saving_percent: f64) -> Self {
        self.monthly_saving = monthly_saving;
        self.saving_percent = saving_percent;
        self
    }

    pub fn with_cost(mut self, upfront_cost: f64, payback_months: f64) -> Self {
        self.upfront_cost = upfront_cost;
        self.payback_months = payback_months;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_actions(mut self, actions: &[&str]) -> Self {
        self.actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn annual_saving(&self) -> f64 {
        self.monthly_saving * 12.0
    }
}

/// Combined savings from the top recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    /// £/month, rounded to pence
    pub monthly: f64,
    /// £/year, rounded to pence
    pub annual: f64,
    /// Share of monthly spend, one decimal place
    pub percent_of_spend: f64,
    pub top_actions: Vec<String>,
}
