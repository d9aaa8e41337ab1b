//! Progression use cases.
//!
//! Applies XP gains to a character and reports level-ups.

use std::sync::Arc;

use serde::Serialize;
use skyrp_domain::{Character, LevelCurve, LevelUp, XpProgress};

/// Container for progression use cases.
pub struct ProgressionUseCases {
    pub award_xp: Arc<AwardExperience>,
}

impl ProgressionUseCases {
    pub fn new(award_xp: Arc<AwardExperience>) -> Self {
        Self { award_xp }
    }
}

/// Outcome of an XP award
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAwarded {
    pub amount: u64,
    pub previous_level: u32,
    pub new_level: u32,
    pub total_xp: u64,
    pub progress: XpProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_up: Option<LevelUp>,
}

impl ExperienceAwarded {
    pub fn leveled_up(&self) -> bool {
        self.level_up.is_some()
    }
}

/// Award XP use case.
pub struct AwardExperience {
    curve: LevelCurve,
}

impl AwardExperience {
    pub fn new(curve: LevelCurve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }

    /// Add `amount` XP to the character.
    ///
    /// The stored level is re-derived from the total first, so a save written
    /// under a different curve cannot report a bogus level-up.
    pub fn execute(&self, character: &mut Character, amount: u64) -> ExperienceAwarded {
        character.experience.recalculate(&self.curve);
        let previous_level = character.level();

        let level_up = character.gain_experience(amount, &self.curve);
        if let Some(up) = &level_up {
            tracing::info!(
                character_id = %character.id,
                previous_level = up.previous_level,
                new_level = up.new_level,
                total_xp = up.total_xp,
                "Character leveled up"
            );
        }

        ExperienceAwarded {
            amount,
            previous_level,
            new_level: character.level(),
            total_xp: character.total_xp(),
            progress: character.experience.progress(&self.curve),
            level_up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyrp_domain::{total_xp_for_level, xp_for_next_level};

    #[test]
    fn small_award_does_not_level() {
        let award = AwardExperience::new(LevelCurve::default());
        let mut character = Character::new("Test");

        let result = award.execute(&mut character, 40);
        assert!(!result.leveled_up());
        assert_eq!(result.new_level, 1);
        assert_eq!(result.progress.current, 40);
        assert_eq!(result.progress.required, 75);
    }

    #[test]
    fn large_award_levels_multiple_times() {
        let award = AwardExperience::new(LevelCurve::default());
        let mut character = Character::new("Test");
        let amount = xp_for_next_level(1) + xp_for_next_level(2) + 10;

        let result = award.execute(&mut character, amount);
        assert_eq!(result.previous_level, 1);
        assert_eq!(result.new_level, 3);
        assert_eq!(result.level_up.map(|u| u.levels_gained()), Some(2));
        assert_eq!(result.total_xp, amount);
        assert_eq!(result.progress.current, amount - total_xp_for_level(3));
        assert_eq!(character.level(), 3);
    }

    #[test]
    fn stale_level_is_corrected_before_award() {
        let award = AwardExperience::new(LevelCurve::default());
        let mut character: Character = serde_json::from_value(serde_json::json!({
            "id": skyrp_domain::CharacterId::new(),
            "name": "Loaded",
            "experience": {"totalXp": 700, "level": 1}
        }))
        .expect("deserialize");

        let result = award.execute(&mut character, 0);
        assert_eq!(result.previous_level, 4);
        assert!(!result.leveled_up());
    }

    #[test]
    fn respects_configured_cap() {
        let curve = LevelCurve::new(50.0, 1.5, 25.0, 5).expect("valid");
        let award = AwardExperience::new(curve);
        let mut character = Character::new("Test");

        let result = award.execute(&mut character, 1_000_000);
        assert_eq!(result.new_level, 5);
        assert!(award.execute(&mut character, 1_000_000).level_up.is_none());
    }
}
