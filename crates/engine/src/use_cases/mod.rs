//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod achievements;
pub mod progression;

pub use achievements::AchievementUseCases;
pub use progression::ProgressionUseCases;
