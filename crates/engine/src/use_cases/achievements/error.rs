//! Achievement operation errors.

use skyrp_domain::{CharacterId, DomainError};

/// Errors that can occur during achievement operations.
#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    #[error("Achievement not found: {0}")]
    UnknownAchievement(String),
    #[error("Achievement not unlocked: {0}")]
    NotUnlocked(String),
    #[error("Reward already collected: {0}")]
    AlreadyCollected(String),
    #[error("Achievement state belongs to character {state}, not {character}")]
    CharacterMismatch {
        state: CharacterId,
        character: CharacterId,
    },
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
