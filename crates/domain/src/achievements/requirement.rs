//! Achievement requirements - what a character must do to unlock an entry.
//!
//! Thresholds compare a counter against a target with `>=`. Membership kinds
//! test a collected-ids set. `Combo` is a logical AND over nested
//! requirements. `Custom` delegates to a [`CustomRequirement`] strategy for
//! rules that cannot be expressed declaratively.
//!
//! Perk, skill, level and gold thresholds read the [`Character`] directly;
//! everything else reads the per-character [`AchievementStats`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::progress::AchievementProgress;
use super::stats::AchievementStats;
use crate::entities::Character;

/// Strategy for requirements that need arbitrary logic
pub trait CustomRequirement: Send + Sync {
    /// Stable identifier, used for display and debugging
    fn key(&self) -> &str;

    fn is_met(&self, stats: &AchievementStats, character: &Character) -> bool;

    /// `(current, target)` for progress display. Defaults to all-or-nothing.
    fn progress(&self, stats: &AchievementStats, character: &Character) -> Option<(u64, u64)> {
        let _ = (stats, character);
        None
    }
}

/// Shared handle to a [`CustomRequirement`]
#[derive(Clone)]
pub struct CustomRule(Arc<dyn CustomRequirement>);

impl CustomRule {
    pub fn new(rule: impl CustomRequirement + 'static) -> Self {
        Self(Arc::new(rule))
    }

    pub fn key(&self) -> &str {
        self.0.key()
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomRule").field(&self.0.key()).finish()
    }
}

/// Requirement for unlocking an achievement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Requirement {
    // ==========================================================================
    // Combat
    // ==========================================================================
    CombatWins { count: u64 },
    EnemiesKilled { count: u64 },
    EnemyTypeKilled { enemy_type: String, count: u64 },
    BossesDefeated { count: u64 },
    Deaths { count: u64 },
    DamageDealt { amount: u64 },
    CriticalHits { count: u64 },

    // ==========================================================================
    // Magic
    // ==========================================================================
    SpellsCast { count: u64 },
    SchoolSpellsCast { school: String, count: u64 },

    // ==========================================================================
    // Economy & items
    // ==========================================================================
    GoldEarned { amount: u64 },
    GoldSpent { amount: u64 },
    GoldHeld { amount: u64 },
    ItemsCollected { count: u64 },
    ItemsCrafted { count: u64 },
    PotionsConsumed { count: u64 },
    PotionsBrewed { count: u64 },

    // ==========================================================================
    // Exploration, questing & social
    // ==========================================================================
    LocationsDiscovered { count: u64 },
    DungeonClears { count: u64 },
    QuestsCompleted { count: u64 },
    NpcsMet { count: u64 },
    CompanionsRecruited { count: u64 },

    // ==========================================================================
    // Stealth
    // ==========================================================================
    Pickpockets { count: u64 },
    LocksPicked { count: u64 },
    SneakAttacks { count: u64 },

    // ==========================================================================
    // Character progression
    // ==========================================================================
    LevelReached { level: u32 },
    SkillLevel { skill: String, level: u32 },
    AnySkillLevel { level: u32 },
    PerksUnlocked { count: u64 },

    // ==========================================================================
    // Misc
    // ==========================================================================
    RestsTaken { count: u64 },
    PlayTime { minutes: u64 },

    // ==========================================================================
    // Membership
    // ==========================================================================
    SpecificLocation { location_id: String },
    SpecificNpc { npc_id: String },
    SpecificItem { item_id: String },

    // ==========================================================================
    // Composite
    // ==========================================================================
    /// Every nested requirement must be met
    Combo { requirements: Vec<Requirement> },

    /// Arbitrary predicate; never serialized
    #[serde(skip)]
    Custom { rule: CustomRule },

    /// Unrecognized kind from a newer catalog; never satisfied
    #[serde(other)]
    Unknown,
}

impl Requirement {
    pub fn combo(requirements: impl IntoIterator<Item = Requirement>) -> Self {
        Self::Combo {
            requirements: requirements.into_iter().collect(),
        }
    }

    pub fn custom(rule: impl CustomRequirement + 'static) -> Self {
        Self::Custom {
            rule: CustomRule::new(rule),
        }
    }

    /// `(current, target)` for leaf kinds; `None` for combo, custom and unknown
    fn measure(&self, stats: &AchievementStats, character: &Character) -> Option<(u64, u64)> {
        let pair = match self {
            Self::CombatWins { count } => (stats.combat_wins, *count),
            Self::EnemiesKilled { count } => (stats.enemies_killed, *count),
            Self::EnemyTypeKilled { enemy_type, count } => (stats.kills_of(enemy_type), *count),
            Self::BossesDefeated { count } => (stats.bosses_defeated, *count),
            Self::Deaths { count } => (stats.deaths, *count),
            Self::DamageDealt { amount } => (stats.damage_dealt, *amount),
            Self::CriticalHits { count } => (stats.critical_hits, *count),
            Self::SpellsCast { count } => (stats.total_spells_cast(), *count),
            Self::SchoolSpellsCast { school, count } => (stats.spells_cast_in(school), *count),
            Self::GoldEarned { amount } => (stats.gold_earned, *amount),
            Self::GoldSpent { amount } => (stats.gold_spent, *amount),
            Self::GoldHeld { amount } => (character.gold, *amount),
            Self::ItemsCollected { count } => (stats.items_collected, *count),
            Self::ItemsCrafted { count } => (stats.items_crafted, *count),
            Self::PotionsConsumed { count } => (stats.potions_consumed, *count),
            Self::PotionsBrewed { count } => (stats.potions_brewed, *count),
            Self::LocationsDiscovered { count } => (stats.location_count(), *count),
            Self::DungeonClears { count } => (stats.dungeon_clears, *count),
            Self::QuestsCompleted { count } => (stats.quests_completed, *count),
            Self::NpcsMet { count } => (stats.npcs_met_count(), *count),
            Self::CompanionsRecruited { count } => (stats.companions_recruited, *count),
            Self::Pickpockets { count } => (stats.pickpockets, *count),
            Self::LocksPicked { count } => (stats.locks_picked, *count),
            Self::SneakAttacks { count } => (stats.sneak_attacks, *count),
            Self::LevelReached { level } => (u64::from(character.level()), u64::from(*level)),
            Self::SkillLevel { skill, level } => (
                u64::from(character.skill_level(skill)),
                u64::from(*level),
            ),
            Self::AnySkillLevel { level } => (
                u64::from(character.highest_skill_level()),
                u64::from(*level),
            ),
            Self::PerksUnlocked { count } => (u64::from(character.perk_count()), *count),
            Self::RestsTaken { count } => (stats.rests_taken, *count),
            Self::PlayTime { minutes } => (stats.play_time_minutes, *minutes),
            Self::SpecificLocation { location_id } => {
                let found = stats.has_discovered(location_id)
                    || character
                        .discovered_locations
                        .iter()
                        .any(|l| l.eq_ignore_ascii_case(location_id.trim()));
                (u64::from(found), 1)
            }
            Self::SpecificNpc { npc_id } => (u64::from(stats.has_met(npc_id)), 1),
            Self::SpecificItem { item_id } => (u64::from(stats.has_found(item_id)), 1),
            Self::Combo { .. } | Self::Custom { .. } | Self::Unknown => return None,
        };
        Some(pair)
    }

    /// Whether the requirement is satisfied
    pub fn is_met(&self, stats: &AchievementStats, character: &Character) -> bool {
        match self {
            Self::Combo { requirements } => {
                requirements.iter().all(|r| r.is_met(stats, character))
            }
            Self::Custom { rule } => rule.0.is_met(stats, character),
            Self::Unknown => false,
            leaf => leaf
                .measure(stats, character)
                .is_some_and(|(current, target)| current >= target),
        }
    }

    /// Display progress toward the requirement
    ///
    /// A combo reports its least complete leaf, so it never shows 100% until
    /// every part is met.
    pub fn progress(&self, stats: &AchievementStats, character: &Character) -> AchievementProgress {
        match self {
            Self::Combo { requirements } => requirements
                .iter()
                .map(|r| r.progress(stats, character))
                .min_by(|a, b| a.fraction().total_cmp(&b.fraction()))
                .unwrap_or_else(|| AchievementProgress::from_counts(0, 0)),
            Self::Custom { rule } => match rule.0.progress(stats, character) {
                Some((current, target)) => AchievementProgress::from_counts(current, target),
                None => {
                    AchievementProgress::from_counts(u64::from(rule.0.is_met(stats, character)), 1)
                }
            },
            Self::Unknown => AchievementProgress::from_counts(0, 1),
            leaf => {
                let (current, target) = leaf.measure(stats, character).unwrap_or((0, 1));
                AchievementProgress::from_counts(current, target)
            }
        }
    }

    /// Human-readable description of the requirement
    pub fn description(&self) -> String {
        match self {
            Self::CombatWins { count } => format!("Win {} battles", count),
            Self::EnemiesKilled { count } => format!("Defeat {} enemies", count),
            Self::EnemyTypeKilled { enemy_type, count } => {
                format!("Defeat {} {}", count, enemy_type)
            }
            Self::BossesDefeated { count } => format!("Defeat {} bosses", count),
            Self::Deaths { count } => format!("Fall in battle {} times", count),
            Self::DamageDealt { amount } => format!("Deal {} damage", amount),
            Self::CriticalHits { count } => format!("Land {} critical hits", count),
            Self::SpellsCast { count } => format!("Cast {} spells", count),
            Self::SchoolSpellsCast { school, count } => {
                format!("Cast {} {} spells", count, school)
            }
            Self::GoldEarned { amount } => format!("Earn {} gold", amount),
            Self::GoldSpent { amount } => format!("Spend {} gold", amount),
            Self::GoldHeld { amount } => format!("Hold {} gold at once", amount),
            Self::ItemsCollected { count } => format!("Collect {} items", count),
            Self::ItemsCrafted { count } => format!("Craft {} items", count),
            Self::PotionsConsumed { count } => format!("Drink {} potions", count),
            Self::PotionsBrewed { count } => format!("Brew {} potions", count),
            Self::LocationsDiscovered { count } => format!("Discover {} locations", count),
            Self::DungeonClears { count } => format!("Clear {} dungeons", count),
            Self::QuestsCompleted { count } => format!("Complete {} quests", count),
            Self::NpcsMet { count } => format!("Meet {} people", count),
            Self::CompanionsRecruited { count } => format!("Recruit {} companions", count),
            Self::Pickpockets { count } => format!("Pick {} pockets", count),
            Self::LocksPicked { count } => format!("Pick {} locks", count),
            Self::SneakAttacks { count } => format!("Land {} sneak attacks", count),
            Self::LevelReached { level } => format!("Reach level {}", level),
            Self::SkillLevel { skill, level } => format!("Raise {} to {}", skill, level),
            Self::AnySkillLevel { level } => format!("Raise any skill to {}", level),
            Self::PerksUnlocked { count } => format!("Unlock {} perks", count),
            Self::RestsTaken { count } => format!("Rest {} times", count),
            Self::PlayTime { minutes } => format!("Play for {} minutes", minutes),
            Self::SpecificLocation { location_id } => format!("Discover {}", location_id),
            Self::SpecificNpc { npc_id } => format!("Meet {}", npc_id),
            Self::SpecificItem { item_id } => format!("Find {}", item_id),
            Self::Combo { requirements } => requirements
                .iter()
                .map(Requirement::description)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Custom { rule } => rule.key().to_string(),
            Self::Unknown => "Unknown requirement".to_string(),
        }
    }
}
