//! Claim achievement reward use case.
//!
//! Marks an unlocked achievement as collected and grants its reward to the
//! character. A reward can only be claimed once.

use std::sync::Arc;

use serde::Serialize;
use skyrp_domain::{AchievementCatalog, AchievementReward, AchievementState, Character};

use super::error::AchievementError;
use crate::infrastructure::ports::ClockPort;
use crate::use_cases::progression::{AwardExperience, ExperienceAwarded};

/// What the character received
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedReward {
    pub achievement_id: String,
    pub reward: AchievementReward,
    /// Present when the reward carried XP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceAwarded>,
    /// Item for the caller to place in the inventory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    pub title_granted: bool,
}

/// Claim reward use case.
///
/// Orchestrates: unlock verification, collection state change, reward grant.
pub struct ClaimAchievementReward {
    catalog: Arc<AchievementCatalog>,
    clock: Arc<dyn ClockPort>,
    award_xp: Arc<AwardExperience>,
}

impl ClaimAchievementReward {
    pub fn new(
        catalog: Arc<AchievementCatalog>,
        clock: Arc<dyn ClockPort>,
        award_xp: Arc<AwardExperience>,
    ) -> Self {
        Self {
            catalog,
            clock,
            award_xp,
        }
    }

    pub fn execute(
        &self,
        state: &mut AchievementState,
        character: &mut Character,
        achievement_id: &str,
    ) -> Result<ClaimedReward, AchievementError> {
        if state.character_id != character.id {
            return Err(AchievementError::CharacterMismatch {
                state: state.character_id,
                character: character.id,
            });
        }

        let achievement = self
            .catalog
            .get(achievement_id)
            .ok_or_else(|| AchievementError::UnknownAchievement(achievement_id.to_string()))?;
        if !state.is_unlocked(achievement_id) {
            return Err(AchievementError::NotUnlocked(achievement_id.to_string()));
        }
        if state.is_collected(achievement_id) {
            return Err(AchievementError::AlreadyCollected(achievement_id.to_string()));
        }

        state.collect(achievement_id, self.clock.now())?;

        let reward = achievement.reward.clone();
        if let Some(gold) = reward.gold {
            character.gold = character.gold.saturating_add(gold);
        }
        if let Some(points) = reward.perk_points {
            character.perk_points = character.perk_points.saturating_add(points);
        }
        let title_granted = reward
            .title
            .as_ref()
            .is_some_and(|title| character.grant_title(title.clone()));
        let experience = reward
            .xp
            .map(|xp| self.award_xp.execute(character, xp));

        tracing::info!(
            character_id = %character.id,
            achievement_id,
            gold = reward.gold.unwrap_or(0),
            xp = reward.xp.unwrap_or(0),
            "Achievement reward claimed"
        );

        Ok(ClaimedReward {
            achievement_id: achievement_id.to_string(),
            item: reward.item.clone(),
            reward,
            experience,
            title_granted,
        })
    }
}
