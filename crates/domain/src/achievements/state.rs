//! Per-character achievement state: stats plus unlock records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::AchievementStats;
use crate::error::DomainError;
use crate::ids::CharacterId;

/// Unlock record. Created once, `collected` flips to true once, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementUnlock {
    pub unlocked_at: DateTime<Utc>,
    #[serde(default)]
    pub collected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<DateTime<Utc>>,
}

impl AchievementUnlock {
    pub fn new(unlocked_at: DateTime<Utc>) -> Self {
        Self {
            unlocked_at,
            collected: false,
            collected_at: None,
        }
    }
}

/// Achievement progress for exactly one character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    pub character_id: CharacterId,
    #[serde(default)]
    pub stats: AchievementStats,
    #[serde(default)]
    pub unlocked: BTreeMap<String, AchievementUnlock>,
}

impl AchievementState {
    /// Empty state for a character
    pub fn new(character_id: CharacterId) -> Self {
        Self {
            character_id,
            stats: AchievementStats::default(),
            unlocked: BTreeMap::new(),
        }
    }

    pub fn with_stats(mut self, stats: AchievementStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn is_unlocked(&self, achievement_id: &str) -> bool {
        self.unlocked.contains_key(achievement_id)
    }

    pub fn is_collected(&self, achievement_id: &str) -> bool {
        self.unlocked
            .get(achievement_id)
            .is_some_and(|u| u.collected)
    }

    /// Merge newly unlocked ids; existing records keep their timestamp.
    ///
    /// Returns the number of records created.
    pub fn record_unlocks<'a>(
        &mut self,
        achievement_ids: impl IntoIterator<Item = &'a str>,
        at: DateTime<Utc>,
    ) -> usize {
        let mut created = 0;
        for id in achievement_ids {
            if !self.unlocked.contains_key(id) {
                self.unlocked.insert(id.to_string(), AchievementUnlock::new(at));
                created += 1;
            }
        }
        created
    }

    /// Mark an unlocked achievement's reward as collected.
    pub fn collect(
        &mut self,
        achievement_id: &str,
        at: DateTime<Utc>,
    ) -> Result<&AchievementUnlock, DomainError> {
        let unlock = self
            .unlocked
            .get_mut(achievement_id)
            .ok_or_else(|| DomainError::not_found("AchievementUnlock", achievement_id))?;
        if unlock.collected {
            return Err(DomainError::invalid_state_transition(format!(
                "reward for '{}' already collected",
                achievement_id
            )));
        }
        unlock.collected = true;
        unlock.collected_at = Some(at);
        Ok(unlock)
    }

    /// Unlocked achievements whose rewards are still waiting
    pub fn uncollected(&self) -> impl Iterator<Item = &str> {
        self.unlocked
            .iter()
            .filter(|(_, u)| !u.collected)
            .map(|(id, _)| id.as_str())
    }
}
