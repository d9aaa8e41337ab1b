//! Achievement evaluation - which entries are newly satisfied, and how close
//! the locked ones are.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::AchievementCatalog;
use super::definition::{Achievement, AchievementCategory, AchievementRarity, AchievementReward};
use super::progress::AchievementProgress;
use super::state::AchievementState;
use super::stats::AchievementStats;
use crate::entities::Character;

/// Result of a single evaluation pass
#[derive(Debug, Clone)]
pub struct AchievementCheck<'a> {
    /// Achievements satisfied for the first time, in unlock order
    pub newly_unlocked: Vec<&'a Achievement>,
    /// False when the state belonged to a different character and its stats
    /// were ignored
    pub stats_applied: bool,
}

impl AchievementCheck<'_> {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.newly_unlocked.iter().map(|a| a.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.newly_unlocked.is_empty()
    }
}

/// Find achievements whose requirements are newly satisfied.
///
/// Skips entries already unlocked and entries whose prerequisite is neither
/// unlocked nor satisfied earlier in the same pass. Hidden entries are
/// evaluated like any other. `state` is not modified; callers merge the
/// result with [`AchievementState::record_unlocks`].
///
/// Stats are only read when `state` belongs to `character`. A mismatched
/// state contributes nothing, so another character's progress can never
/// unlock achievements here.
pub fn check_achievements<'a>(
    catalog: &'a AchievementCatalog,
    state: &AchievementState,
    character: &Character,
) -> AchievementCheck<'a> {
    let stats_applied = state.character_id == character.id;
    let empty = AchievementStats::default();
    let stats = if stats_applied { &state.stats } else { &empty };

    let mut satisfied: HashSet<&str> = state.unlocked.keys().map(String::as_str).collect();
    let mut newly_unlocked = Vec::new();

    loop {
        let mut progressed = false;
        for achievement in catalog.iter() {
            if satisfied.contains(achievement.id.as_str()) {
                continue;
            }
            if let Some(prerequisite) = &achievement.prerequisite {
                if !satisfied.contains(prerequisite.as_str()) {
                    continue;
                }
            }
            if achievement.requirement.is_met(stats, character) {
                satisfied.insert(achievement.id.as_str());
                newly_unlocked.push(achievement);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    AchievementCheck {
        newly_unlocked,
        stats_applied,
    }
}

/// Progress toward a single achievement.
pub fn achievement_progress(
    achievement: &Achievement,
    stats: &AchievementStats,
    character: &Character,
) -> AchievementProgress {
    achievement.requirement.progress(stats, character)
}

/// Journal row for one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub rarity: AchievementRarity,
    pub hidden: bool,
    pub unlocked: bool,
    pub collected: bool,
    /// Present for visible locked achievements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<AchievementProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<AchievementReward>,
}

const HIDDEN_NAME: &str = "???";
const HIDDEN_DESCRIPTION: &str = "Hidden achievement";

/// Build journal rows for the whole catalog.
///
/// Hidden achievements stay masked until unlocked.
pub fn achievement_views(
    catalog: &AchievementCatalog,
    state: &AchievementState,
    character: &Character,
) -> Vec<AchievementView> {
    let empty = AchievementStats::default();
    let stats = if state.character_id == character.id {
        &state.stats
    } else {
        &empty
    };

    catalog
        .iter()
        .map(|achievement| {
            let unlock = state.unlocked.get(&achievement.id);
            let unlocked = unlock.is_some();
            let masked = achievement.hidden && !unlocked;

            AchievementView {
                id: achievement.id.clone(),
                name: if masked {
                    HIDDEN_NAME.to_string()
                } else {
                    achievement.name.clone()
                },
                description: if masked {
                    HIDDEN_DESCRIPTION.to_string()
                } else {
                    achievement.description.clone()
                },
                category: achievement.category,
                rarity: achievement.rarity,
                hidden: achievement.hidden,
                unlocked,
                collected: unlock.is_some_and(|u| u.collected),
                progress: (!unlocked && !masked)
                    .then(|| achievement_progress(achievement, stats, character)),
                reward: (!masked && !achievement.reward.is_empty())
                    .then(|| achievement.reward.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::requirement::Requirement;
    use crate::achievements::stats::StatEvent;
    use crate::progression::LevelCurve;
    use chrono::{TimeZone, Utc};

    fn ids(check: &AchievementCheck<'_>) -> Vec<String> {
        check.ids().map(str::to_string).collect()
    }

    fn loaded_stats() -> AchievementStats {
        let mut stats = AchievementStats::new();
        stats.quests_completed = 60;
        stats.dungeon_clears = 12;
        stats.perks_unlocked = 30;
        stats.combat_wins = 150;
        stats.enemies_killed = 400;
        stats.skill_levels.insert("archery".into(), 100);
        stats
    }

    #[test]
    fn fresh_character_unlocks_nothing() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Fresh");
        let state = AchievementState::new(character.id);

        let check = check_achievements(&catalog, &state, &character);
        assert!(check.is_empty(), "unexpected unlocks: {:?}", ids(&check));
    }

    #[test]
    fn other_characters_stats_never_leak() {
        let catalog = AchievementCatalog::standard();
        let veteran = Character::new("Veteran");
        let fresh = Character::new("Fresh");
        let shared = AchievementState::new(veteran.id).with_stats(loaded_stats());

        let check = check_achievements(&catalog, &shared, &fresh);
        let unlocked = ids(&check);

        assert!(!check.stats_applied);
        for id in ["perk_novice", "quest_starter", "dungeon_crawler", "skill_adept"] {
            assert!(!unlocked.iter().any(|u| u == id), "{id} leaked");
        }
        assert!(check.is_empty());
    }

    #[test]
    fn perks_and_skills_come_from_the_character() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Fresh");
        // Even the character's own stats cannot claim perks it does not hold
        let state = AchievementState::new(character.id).with_stats(loaded_stats());

        let unlocked = ids(&check_achievements(&catalog, &state, &character));
        assert!(!unlocked.contains(&"perk_novice".to_string()));
        assert!(!unlocked.contains(&"skill_adept".to_string()));
        assert!(unlocked.contains(&"quest_starter".to_string()));
    }

    #[test]
    fn evaluation_is_idempotent_once_merged() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Hero").with_perk("armsman");
        let mut state = AchievementState::new(character.id);
        state.stats.record(StatEvent::QuestCompleted);

        let first: Vec<String> = ids(&check_achievements(&catalog, &state, &character));
        assert_eq!(first, vec!["quest_starter", "perk_novice"]);

        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        state.record_unlocks(first.iter().map(String::as_str), at);

        assert!(check_achievements(&catalog, &state, &character).is_empty());
    }

    #[test]
    fn check_does_not_mutate_state() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Hero");
        let mut state = AchievementState::new(character.id);
        state.stats.record(StatEvent::QuestCompleted);
        let before = state.clone();

        assert!(!check_achievements(&catalog, &state, &character).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn prerequisites_chain_within_one_pass() {
        let catalog = AchievementCatalog::standard();
        let character =
            Character::new("Veteran").with_experience(u64::MAX / 4, &LevelCurve::default());
        let state = AchievementState::new(character.id);

        let unlocked = ids(&check_achievements(&catalog, &state, &character));
        for id in ["level_10", "level_25", "level_50"] {
            assert!(unlocked.contains(&id.to_string()), "{id} missing");
        }
    }

    #[test]
    fn unmet_prerequisite_blocks_unlock() {
        let catalog = AchievementCatalog::new(vec![
            Achievement::new(
                "gate",
                "Gate",
                "",
                AchievementCategory::Questing,
                AchievementRarity::Common,
                Requirement::SpecificNpc {
                    npc_id: "nobody".into(),
                },
            ),
            Achievement::new(
                "behind_gate",
                "Behind Gate",
                "",
                AchievementCategory::Questing,
                AchievementRarity::Common,
                Requirement::QuestsCompleted { count: 1 },
            )
            .requires("gate"),
        ]);
        let character = Character::new("Test");
        let mut state = AchievementState::new(character.id);
        state.stats.quests_completed = 5;

        assert!(check_achievements(&catalog, &state, &character).is_empty());
    }

    #[test]
    fn shadow_walker_needs_every_stealth_threshold() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Thief");
        let mut state = AchievementState::new(character.id);
        state.stats.pickpockets = 10;
        state.stats.locks_picked = 25;
        state.stats.sneak_attacks = 14;

        let unlocked = ids(&check_achievements(&catalog, &state, &character));
        assert!(!unlocked.contains(&"shadow_walker".to_string()));

        state.stats.sneak_attacks = 15;
        let unlocked = ids(&check_achievements(&catalog, &state, &character));
        assert!(unlocked.contains(&"shadow_walker".to_string()));
    }

    #[test]
    fn hidden_achievements_still_unlock() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Test");
        let mut state = AchievementState::new(character.id);
        state.stats.record(StatEvent::Died);

        let unlocked = ids(&check_achievements(&catalog, &state, &character));
        assert_eq!(unlocked, vec!["death_is_not_the_end"]);
    }

    #[test]
    fn progress_reads_stats_for_locked_entries() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Test");
        let mut stats = AchievementStats::new();
        stats.dungeon_clears = 2;

        let crawler = catalog.get("dungeon_crawler").expect("in catalog");
        let progress = achievement_progress(crawler, &stats, &character);
        assert_eq!((progress.current, progress.target, progress.percent), (2, 5, 40));
    }

    #[test]
    fn views_mask_hidden_locked_entries() {
        let catalog = AchievementCatalog::standard();
        let character = Character::new("Test");
        let mut state = AchievementState::new(character.id);
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        state.record_unlocks(["wuuthrad_recovered"], at);

        let views = achievement_views(&catalog, &state, &character);
        assert_eq!(views.len(), catalog.len());

        let paarthurnax = views
            .iter()
            .find(|v| v.id == "audience_with_paarthurnax")
            .expect("present");
        assert_eq!(paarthurnax.name, "???");
        assert!(paarthurnax.progress.is_none());
        assert!(paarthurnax.reward.is_none());

        let wuuthrad = views
            .iter()
            .find(|v| v.id == "wuuthrad_recovered")
            .expect("present");
        assert_eq!(wuuthrad.name, "Wuuthrad Recovered");
        assert!(wuuthrad.unlocked);
        assert!(!wuuthrad.collected);

        let explorer = views.iter().find(|v| v.id == "explorer").expect("present");
        assert_eq!(explorer.progress.map(|p| p.target), Some(10));
    }
}
