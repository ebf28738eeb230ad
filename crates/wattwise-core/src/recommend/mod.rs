//! Recommendation Engine - Ranked Savings Actions
//!
//! The engine runs a set of pluggable sources over a household profile and
//! ranks what they produce by priority. Every saving is a share of the
//! household's monthly spend, taken from `ReferenceData::savings`.
//!
//! ## Built-in Sources
//!
//! - **Behavioral** - Zero-cost habit changes plus a seasonal tip
//! - **Tariff** - Fixed-rate and Economy 7 switching
//! - **Efficiency** - Draught-proofing, reflectors, LED lighting
//! - **Upgrade** - Smart thermostat, insulation, heat pump
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wattwise_core::recommend::{GenerateOptions, RecommendationContext, RecommendationEngine};
//!
//! let engine = RecommendationEngine::new();
//! let ctx = RecommendationContext::new(&profile, &reference, Month::January);
//! let recs = engine.generate(&ctx, &GenerateOptions::default())?;
//! ```

pub mod behavioral;
pub mod efficiency;
pub mod engine;
pub mod tariff;
pub mod types;
pub mod upgrade;

pub use behavioral::BehavioralSource;
pub use efficiency::EfficiencySource;
pub use engine::{
    summarize, GenerateOptions, RecommendationContext, RecommendationEngine, RecommendationSource,
};
pub use tariff::TariffSource;
pub use types::{
    Category, Confidence, Difficulty, Recommendation, SavingsSummary, Season, SourceKind,
};
pub use upgrade::UpgradeSource;
