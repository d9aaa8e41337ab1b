//! Achievement journal listing.

use std::sync::Arc;

use skyrp_domain::{achievement_views, AchievementCatalog, AchievementState, AchievementView, Character};

/// List progress for every achievement in the catalog.
pub struct ListAchievementProgress {
    catalog: Arc<AchievementCatalog>,
}

impl ListAchievementProgress {
    pub fn new(catalog: Arc<AchievementCatalog>) -> Self {
        Self { catalog }
    }

    /// Hidden entries are masked until unlocked. A state owned by another
    /// character contributes no progress.
    pub fn execute(&self, state: &AchievementState, character: &Character) -> Vec<AchievementView> {
        if state.character_id != character.id {
            tracing::warn!(
                state_character = %state.character_id,
                character_id = %character.id,
                "Listing achievements with another character's state, ignoring its stats"
            );
        }
        achievement_views(&self.catalog, state, character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skyrp_domain::StatEvent;

    fn list() -> ListAchievementProgress {
        ListAchievementProgress::new(Arc::new(AchievementCatalog::standard()))
    }

    #[test]
    fn lists_whole_catalog() {
        let character = Character::new("Hero");
        let state = AchievementState::new(character.id);

        let views = list().execute(&state, &character);
        assert_eq!(views.len(), AchievementCatalog::standard().len());
        assert!(views.iter().all(|v| !v.unlocked));
    }

    #[test]
    fn reports_partial_progress() {
        let character = Character::new("Hero");
        let mut state = AchievementState::new(character.id);
        for _ in 0..5 {
            state.stats.record(StatEvent::CombatWon);
        }

        let views = list().execute(&state, &character);
        let initiate = views
            .iter()
            .find(|v| v.id == "warrior_initiate")
            .expect("warrior_initiate listed");
        let progress = initiate.progress.expect("locked achievement has progress");
        assert_eq!(progress.current, 5);
        assert!(progress.percent > 0 && progress.percent < 100);
    }

    #[test]
    fn hidden_entries_unmask_once_unlocked() {
        let character = Character::new("Hero");
        let mut state = AchievementState::new(character.id);

        let masked = list().execute(&state, &character);
        let hidden = masked.iter().find(|v| v.hidden && v.name == "???");
        assert!(hidden.is_some());

        let hidden_id = hidden.map(|v| v.id.clone()).unwrap_or_default();
        state.record_unlocks([hidden_id.as_str()], Utc::now());
        let shown = list().execute(&state, &character);
        let entry = shown.iter().find(|v| v.id == hidden_id).expect("listed");
        assert!(entry.unlocked);
        assert_ne!(entry.name, "???");
    }
}
