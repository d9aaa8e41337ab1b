//! Achievement system: catalog, per-character state, evaluation and audit.
//!
//! Everything here is pure. Callers supply a character and that character's
//! [`AchievementState`], and apply the returned deltas themselves.

mod audit;
mod catalog;
mod definition;
mod evaluator;
mod progress;
mod requirement;
mod state;
mod stats;

pub use audit::{audit_stats_from_game_data, is_potion, POTION_KEYWORDS};
pub use catalog::{AchievementCatalog, JackOfAllTrades};
pub use definition::{Achievement, AchievementCategory, AchievementRarity, AchievementReward};
pub use evaluator::{
    achievement_progress, achievement_views, check_achievements, AchievementCheck,
    AchievementView,
};
pub use progress::AchievementProgress;
pub use requirement::{CustomRequirement, CustomRule, Requirement};
pub use state::{AchievementState, AchievementUnlock};
pub use stats::{AchievementStats, StatEvent};
