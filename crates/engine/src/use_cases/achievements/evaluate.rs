//! Evaluate achievements use case.
//!
//! Audits the character's stats against raw game data (when supplied),
//! checks the catalog, and stamps new unlock records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use skyrp_domain::{
    audit_stats_from_game_data, check_achievements, AchievementCatalog, AchievementRarity,
    AchievementReward, AchievementState, Character, GameDataSnapshot,
};

use super::error::AchievementError;
use crate::infrastructure::ports::ClockPort;

/// An achievement unlocked by this evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: String,
    pub name: String,
    pub rarity: AchievementRarity,
    pub reward: AchievementReward,
    pub unlocked_at: DateTime<Utc>,
}

/// Evaluate achievements use case.
pub struct EvaluateAchievements {
    catalog: Arc<AchievementCatalog>,
    clock: Arc<dyn ClockPort>,
}

impl EvaluateAchievements {
    pub fn new(catalog: Arc<AchievementCatalog>, clock: Arc<dyn ClockPort>) -> Self {
        Self { catalog, clock }
    }

    /// Execute the evaluation.
    ///
    /// # Arguments
    /// * `state` - The character's own achievement state, updated in place
    /// * `character` - The character being evaluated
    /// * `game_data` - Ground truth for the stats audit, if available
    ///
    /// # Returns
    /// * `Ok(Vec<UnlockedAchievement>)` - Achievements unlocked by this call
    /// * `Err(AchievementError::CharacterMismatch)` - State belongs to another character
    pub fn execute(
        &self,
        state: &mut AchievementState,
        character: &Character,
        game_data: Option<&GameDataSnapshot>,
    ) -> Result<Vec<UnlockedAchievement>, AchievementError> {
        if state.character_id != character.id {
            tracing::warn!(
                state_character = %state.character_id,
                character_id = %character.id,
                "Refusing to evaluate achievements against another character's state"
            );
            return Err(AchievementError::CharacterMismatch {
                state: state.character_id,
                character: character.id,
            });
        }

        if let Some(game_data) = game_data {
            let audited = audit_stats_from_game_data(&state.stats, character, game_data);
            tracing::debug!(
                character_id = %character.id,
                quests_completed = audited.quests_completed,
                items_collected = audited.items_collected,
                dungeon_clears = audited.dungeon_clears,
                "Audited achievement stats"
            );
            state.stats = audited;
        }

        let check = check_achievements(&self.catalog, state, character);
        if check.is_empty() {
            return Ok(Vec::new());
        }

        let now = self.clock.now();
        let unlocked: Vec<UnlockedAchievement> = check
            .newly_unlocked
            .iter()
            .map(|a| UnlockedAchievement {
                id: a.id.clone(),
                name: a.name.clone(),
                rarity: a.rarity,
                reward: a.reward.clone(),
                unlocked_at: now,
            })
            .collect();

        state.record_unlocks(unlocked.iter().map(|u| u.id.as_str()), now);

        for achievement in &unlocked {
            tracing::info!(
                character_id = %character.id,
                achievement_id = %achievement.id,
                rarity = %achievement.rarity,
                "Achievement unlocked"
            );
        }

        Ok(unlocked)
    }
}
