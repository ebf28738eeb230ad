//! CLI command implementations
//!
//! This module is organized into submodules by functionality:
//! - `core` - Shared loaders (reference data, profiles, catalogs) and output helpers
//! - `advisors` - Solar, heat pump and projection commands
//! - `recommend` - Savings action ranking
//! - `tariffs` - Tariff comparison and usage estimation
//! - `reference` - Region lookup and reference table display

mod advisors;
mod core;
mod recommend;
mod reference;
mod tariffs;

pub use advisors::*;
pub use self::core::*;
pub use recommend::*;
pub use reference::*;
pub use tariffs::*;

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
