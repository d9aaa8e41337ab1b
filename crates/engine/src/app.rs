//! Application state and composition.

use std::sync::Arc;

use serde::Serialize;
use skyrp_domain::{AchievementCatalog, AchievementView};

use crate::infrastructure::{config::EngineConfig, ports::ClockPort, save_file::SaveFile};
use crate::use_cases::achievements::{
    AchievementError, AchievementUseCases, ClaimAchievementReward, EvaluateAchievements,
    ListAchievementProgress, UnlockedAchievement,
};
use crate::use_cases::progression::{AwardExperience, ExperienceAwarded, ProgressionUseCases};

/// Main application state.
///
/// Holds the configuration and every use case, wired to one catalog and clock.
pub struct App {
    pub config: EngineConfig,
    pub catalog: Arc<AchievementCatalog>,
    pub progression: ProgressionUseCases,
    pub achievements: AchievementUseCases,
}

/// Result of processing one save file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub character_name: String,
    pub events_recorded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceAwarded>,
    pub unlocked: Vec<UnlockedAchievement>,
    pub achievements: Vec<AchievementView>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        config: EngineConfig,
        catalog: Arc<AchievementCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let award_xp = Arc::new(AwardExperience::new(config.curve));

        let achievements = AchievementUseCases::new(
            Arc::new(EvaluateAchievements::new(catalog.clone(), clock.clone())),
            Arc::new(ClaimAchievementReward::new(
                catalog.clone(),
                clock,
                award_xp.clone(),
            )),
            Arc::new(ListAchievementProgress::new(catalog.clone())),
        );

        Self {
            config,
            catalog,
            progression: ProgressionUseCases::new(award_xp),
            achievements,
        }
    }

    /// Fold a save's pending deltas into its character and achievement state.
    ///
    /// Pending events are recorded first, then pending XP is awarded, then
    /// achievements are evaluated (audited against the save's game data).
    /// Pending fields are cleared so processing the same save twice is a no-op.
    /// A save whose achievement state belongs to another character is
    /// rejected before anything is applied.
    pub fn process_save(&self, save: &mut SaveFile) -> Result<SessionReport, AchievementError> {
        if let Some(state) = &save.achievements {
            if state.character_id != save.character.id {
                tracing::warn!(
                    state_character = %state.character_id,
                    character_id = %save.character.id,
                    "Save holds another character's achievement state, leaving it untouched"
                );
                return Err(AchievementError::CharacterMismatch {
                    state: state.character_id,
                    character: save.character.id,
                });
            }
        }

        save.character
            .experience
            .recalculate(self.progression.award_xp.curve());
        let mut state = save.take_achievement_state();

        let events_recorded = save.pending_events.len();
        for event in save.pending_events.drain(..) {
            state.stats.record(event);
        }

        let experience = match std::mem::take(&mut save.pending_xp) {
            0 => None,
            amount => Some(self.progression.award_xp.execute(&mut save.character, amount)),
        };

        let evaluated =
            self.achievements
                .evaluate
                .execute(&mut state, &save.character, save.game_data.as_ref());
        let achievements = self.achievements.list.execute(&state, &save.character);
        save.achievements = Some(state);
        let unlocked = evaluated?;

        Ok(SessionReport {
            character_name: save.character.name.clone(),
            events_recorded,
            experience,
            unlocked,
            achievements,
        })
    }
}
