//! Per-character achievement statistics.
//!
//! A stats snapshot is the sole stats input to requirement evaluation. It is
//! owned by one character's [`AchievementState`](super::AchievementState)
//! and is never shared between characters.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Flat aggregation of everything achievements count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementStats {
    // ==========================================================================
    // Combat
    // ==========================================================================
    pub combat_wins: u64,
    pub enemies_killed: u64,
    /// Kill counts keyed by lowercase enemy type (e.g. "dragon", "draugr")
    pub enemies_killed_by_type: BTreeMap<String, u64>,
    pub bosses_defeated: u64,
    pub deaths: u64,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub critical_hits: u64,

    // ==========================================================================
    // Magic
    // ==========================================================================
    /// Spell casts keyed by lowercase school (e.g. "destruction")
    pub spells_cast_by_school: BTreeMap<String, u64>,

    // ==========================================================================
    // Economy & items
    // ==========================================================================
    pub gold_earned: u64,
    pub gold_spent: u64,
    pub items_collected: u64,
    pub items_crafted: u64,
    pub potions_brewed: u64,
    pub potions_consumed: u64,
    pub items_found: BTreeSet<String>,

    // ==========================================================================
    // Exploration & questing
    // ==========================================================================
    pub locations_discovered: u64,
    pub discovered_locations: BTreeSet<String>,
    pub dungeon_clears: u64,
    pub quests_completed: u64,
    pub npcs_met: BTreeSet<String>,
    pub companions_recruited: u64,

    // ==========================================================================
    // Stealth
    // ==========================================================================
    pub pickpockets: u64,
    pub locks_picked: u64,
    pub sneak_attacks: u64,

    // ==========================================================================
    // Character progression
    // ==========================================================================
    /// Skill levels keyed by lowercase skill name
    pub skill_levels: BTreeMap<String, u32>,
    pub perks_unlocked: u32,

    // ==========================================================================
    // Misc
    // ==========================================================================
    pub rests_taken: u64,
    pub play_time_minutes: u64,
}

/// A gameplay event that moves one or more counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum StatEvent {
    CombatWon,
    EnemyKilled {
        enemy_type: String,
        #[serde(default)]
        is_boss: bool,
    },
    Died,
    DamageDealt { amount: u64 },
    DamageTaken { amount: u64 },
    CriticalHit,
    SpellCast { school: String },
    GoldEarned { amount: u64 },
    GoldSpent { amount: u64 },
    ItemCollected { item_id: String, quantity: u64 },
    ItemCrafted,
    PotionBrewed,
    PotionConsumed,
    LocationDiscovered { location_id: String },
    DungeonCleared,
    QuestCompleted,
    NpcMet { npc_id: String },
    CompanionRecruited,
    Pickpocket,
    LockPicked,
    SneakAttack,
    SkillIncreased { skill: String, level: u32 },
    PerkUnlocked,
    Rested,
    PlayTime { minutes: u64 },
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl AchievementStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a gameplay event to the counters.
    pub fn record(&mut self, event: StatEvent) {
        match event {
            StatEvent::CombatWon => self.combat_wins = self.combat_wins.saturating_add(1),
            StatEvent::EnemyKilled {
                enemy_type,
                is_boss,
            } => {
                self.enemies_killed = self.enemies_killed.saturating_add(1);
                let kills = self.enemies_killed_by_type.entry(key(&enemy_type)).or_insert(0);
                *kills = kills.saturating_add(1);
                if is_boss {
                    self.bosses_defeated = self.bosses_defeated.saturating_add(1);
                }
            }
            StatEvent::Died => self.deaths = self.deaths.saturating_add(1),
            StatEvent::DamageDealt { amount } => {
                self.damage_dealt = self.damage_dealt.saturating_add(amount)
            }
            StatEvent::DamageTaken { amount } => {
                self.damage_taken = self.damage_taken.saturating_add(amount)
            }
            StatEvent::CriticalHit => self.critical_hits = self.critical_hits.saturating_add(1),
            StatEvent::SpellCast { school } => {
                let casts = self.spells_cast_by_school.entry(key(&school)).or_insert(0);
                *casts = casts.saturating_add(1);
            }
            StatEvent::GoldEarned { amount } => {
                self.gold_earned = self.gold_earned.saturating_add(amount)
            }
            StatEvent::GoldSpent { amount } => {
                self.gold_spent = self.gold_spent.saturating_add(amount)
            }
            StatEvent::ItemCollected { item_id, quantity } => {
                self.items_collected = self.items_collected.saturating_add(quantity);
                self.items_found.insert(key(&item_id));
            }
            StatEvent::ItemCrafted => self.items_crafted = self.items_crafted.saturating_add(1),
            StatEvent::PotionBrewed => self.potions_brewed = self.potions_brewed.saturating_add(1),
            StatEvent::PotionConsumed => {
                self.potions_consumed = self.potions_consumed.saturating_add(1)
            }
            StatEvent::LocationDiscovered { location_id } => {
                if self.discovered_locations.insert(key(&location_id)) {
                    self.locations_discovered = self.locations_discovered.saturating_add(1);
                }
            }
            StatEvent::DungeonCleared => {
                self.dungeon_clears = self.dungeon_clears.saturating_add(1)
            }
            StatEvent::QuestCompleted => {
                self.quests_completed = self.quests_completed.saturating_add(1)
            }
            StatEvent::NpcMet { npc_id } => {
                self.npcs_met.insert(key(&npc_id));
            }
            StatEvent::CompanionRecruited => {
                self.companions_recruited = self.companions_recruited.saturating_add(1)
            }
            StatEvent::Pickpocket => self.pickpockets = self.pickpockets.saturating_add(1),
            StatEvent::LockPicked => self.locks_picked = self.locks_picked.saturating_add(1),
            StatEvent::SneakAttack => self.sneak_attacks = self.sneak_attacks.saturating_add(1),
            StatEvent::SkillIncreased { skill, level } => {
                let entry = self.skill_levels.entry(key(&skill)).or_insert(0);
                *entry = (*entry).max(level);
            }
            StatEvent::PerkUnlocked => self.perks_unlocked = self.perks_unlocked.saturating_add(1),
            StatEvent::Rested => self.rests_taken = self.rests_taken.saturating_add(1),
            StatEvent::PlayTime { minutes } => {
                self.play_time_minutes = self.play_time_minutes.saturating_add(minutes)
            }
        }
    }

    pub fn kills_of(&self, enemy_type: &str) -> u64 {
        self.enemies_killed_by_type
            .get(&key(enemy_type))
            .copied()
            .unwrap_or(0)
    }

    pub fn spells_cast_in(&self, school: &str) -> u64 {
        self.spells_cast_by_school
            .get(&key(school))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_spells_cast(&self) -> u64 {
        self.spells_cast_by_school
            .values()
            .fold(0u64, |total, casts| total.saturating_add(*casts))
    }

    /// Discovered location count, whichever of counter and set is larger
    pub fn location_count(&self) -> u64 {
        self.locations_discovered
            .max(self.discovered_locations.len() as u64)
    }

    pub fn npcs_met_count(&self) -> u64 {
        self.npcs_met.len() as u64
    }

    pub fn has_discovered(&self, location_id: &str) -> bool {
        self.discovered_locations.contains(&key(location_id))
    }

    pub fn has_met(&self, npc_id: &str) -> bool {
        self.npcs_met.contains(&key(npc_id))
    }

    pub fn has_found(&self, item_id: &str) -> bool {
        self.items_found.contains(&key(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_kills_are_tracked_per_type() {
        let mut stats = AchievementStats::new();
        stats.record(StatEvent::EnemyKilled {
            enemy_type: "Dragon".into(),
            is_boss: true,
        });
        stats.record(StatEvent::EnemyKilled {
            enemy_type: "draugr".into(),
            is_boss: false,
        });
        stats.record(StatEvent::EnemyKilled {
            enemy_type: "Draugr ".into(),
            is_boss: false,
        });

        assert_eq!(stats.enemies_killed, 3);
        assert_eq!(stats.bosses_defeated, 1);
        assert_eq!(stats.kills_of("dragon"), 1);
        assert_eq!(stats.kills_of("DRAUGR"), 2);
        assert_eq!(stats.kills_of("giant"), 0);
    }

    #[test]
    fn spells_sum_across_schools() {
        let mut stats = AchievementStats::new();
        for school in ["Destruction", "destruction", "Restoration"] {
            stats.record(StatEvent::SpellCast {
                school: school.into(),
            });
        }
        assert_eq!(stats.spells_cast_in("destruction"), 2);
        assert_eq!(stats.total_spells_cast(), 3);
    }

    #[test]
    fn rediscovering_a_location_does_not_double_count() {
        let mut stats = AchievementStats::new();
        for _ in 0..2 {
            stats.record(StatEvent::LocationDiscovered {
                location_id: "whiterun".into(),
            });
        }
        assert_eq!(stats.locations_discovered, 1);
        assert!(stats.has_discovered("Whiterun"));
    }

    #[test]
    fn skill_levels_never_decrease() {
        let mut stats = AchievementStats::new();
        stats.record(StatEvent::SkillIncreased {
            skill: "Smithing".into(),
            level: 40,
        });
        stats.record(StatEvent::SkillIncreased {
            skill: "smithing".into(),
            level: 35,
        });
        assert_eq!(stats.skill_levels.get("smithing"), Some(&40));
    }

    #[test]
    fn counters_saturate_at_max() {
        let mut stats = AchievementStats::new();
        stats.combat_wins = u64::MAX;
        stats.perks_unlocked = u32::MAX;
        stats.spells_cast_by_school.insert("destruction".into(), u64::MAX);
        stats.spells_cast_by_school.insert("alteration".into(), 7);

        stats.record(StatEvent::CombatWon);
        stats.record(StatEvent::PerkUnlocked);
        stats.record(StatEvent::SpellCast {
            school: "destruction".into(),
        });

        assert_eq!(stats.combat_wins, u64::MAX);
        assert_eq!(stats.perks_unlocked, u32::MAX);
        assert_eq!(stats.spells_cast_in("destruction"), u64::MAX);
        assert_eq!(stats.total_spells_cast(), u64::MAX);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: AchievementStats =
            serde_json::from_str(r#"{"combatWins": 4}"#).expect("deserialize");
        assert_eq!(stats.combat_wins, 4);
        assert_eq!(stats.quests_completed, 0);
        assert!(stats.discovered_locations.is_empty());
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: StatEvent =
            serde_json::from_str(r#"{"type": "spell_cast", "school": "illusion"}"#)
                .expect("deserialize");
        assert_eq!(
            event,
            StatEvent::SpellCast {
                school: "illusion".into()
            }
        );
    }
}
