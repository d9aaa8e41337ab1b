pub mod achievements;
pub mod entities;
pub mod error;
pub mod ids;
pub mod progression;

pub use entities::{
    Character, CharacterSkill, ClearedDungeon, CompanionRecord, GameDataSnapshot, InventoryItem,
    ItemTransaction, QuestRecord, QuestStatus,
};

pub use error::DomainError;

pub use ids::CharacterId;

// Leveling engine
pub use progression::{
    check_level_up, level_from_total_xp, total_xp_for_level, xp_for_next_level, xp_progress,
    Experience, LevelCurve, LevelUp, XpProgress,
};

// Achievement evaluator
pub use achievements::{
    achievement_progress, achievement_views, audit_stats_from_game_data, check_achievements,
    Achievement, AchievementCatalog, AchievementCategory, AchievementCheck, AchievementProgress,
    AchievementRarity, AchievementReward, AchievementState, AchievementStats, AchievementUnlock,
    AchievementView, CustomRequirement, Requirement, StatEvent,
};
