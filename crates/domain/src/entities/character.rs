//! Character snapshot - the per-character view the progression core reads.
//!
//! The UI and persistence layers own the full character document. This
//! struct carries only the fields that leveling, achievement evaluation and
//! reward claiming look at.

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::progression::{Experience, LevelCurve, LevelUp};

/// A trained skill and its current level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSkill {
    pub name: String,
    pub level: u32,
}

impl CharacterSkill {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// A dungeon the character has cleared at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedDungeon {
    pub id: String,
    pub name: String,
    #[serde(default = "default_clear_count")]
    pub clear_count: u32,
}

fn default_clear_count() -> u32 {
    1
}

/// Player character as seen by the progression core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub skills: Vec<CharacterSkill>,
    /// Unlocked perk identifiers
    #[serde(default)]
    pub perks: Vec<String>,
    /// Unspent perk points
    #[serde(default)]
    pub perk_points: u32,
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub discovered_locations: Vec<String>,
    #[serde(default)]
    pub cleared_dungeons: Vec<ClearedDungeon>,
}

impl Character {
    /// A brand-new level 1 character with no progress
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            experience: Experience::default(),
            gold: 0,
            skills: Vec::new(),
            perks: Vec::new(),
            perk_points: 0,
            titles: Vec::new(),
            discovered_locations: Vec::new(),
            cleared_dungeons: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_experience(mut self, total_xp: u64, curve: &LevelCurve) -> Self {
        self.experience = Experience::new(total_xp, curve);
        self
    }

    pub fn with_gold(mut self, gold: u64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_skill(mut self, name: impl Into<String>, level: u32) -> Self {
        self.skills.push(CharacterSkill::new(name, level));
        self
    }

    pub fn with_perk(mut self, perk: impl Into<String>) -> Self {
        self.perks.push(perk.into());
        self
    }

    pub fn with_discovered_location(mut self, location: impl Into<String>) -> Self {
        self.discovered_locations.push(location.into());
        self
    }

    pub fn with_cleared_dungeon(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        clear_count: u32,
    ) -> Self {
        self.cleared_dungeons.push(ClearedDungeon {
            id: id.into(),
            name: name.into(),
            clear_count,
        });
        self
    }

    pub fn level(&self) -> u32 {
        self.experience.level()
    }

    pub fn total_xp(&self) -> u64 {
        self.experience.total_xp()
    }

    /// Level of a named skill (case-insensitive), 0 if untrained
    pub fn skill_level(&self, name: &str) -> u32 {
        self.skills
            .iter()
            .filter(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.level)
            .max()
            .unwrap_or(0)
    }

    /// Highest level across all skills, 0 if none
    pub fn highest_skill_level(&self) -> u32 {
        self.skills.iter().map(|s| s.level).max().unwrap_or(0)
    }

    pub fn perk_count(&self) -> u32 {
        self.perks.len() as u32
    }

    pub fn total_dungeon_clears(&self) -> u64 {
        self.cleared_dungeons
            .iter()
            .fold(0u64, |total, d| total.saturating_add(u64::from(d.clear_count)))
    }

    pub fn gain_experience(&mut self, amount: u64, curve: &LevelCurve) -> Option<LevelUp> {
        self.experience.gain(amount, curve)
    }

    /// Grant a title once; returns false if already held
    pub fn grant_title(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.titles.contains(&title) {
            return false;
        }
        self.titles.push(title);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_has_no_progress() {
        let character = Character::new("Lydia");
        assert_eq!(character.level(), 1);
        assert_eq!(character.total_xp(), 0);
        assert_eq!(character.perk_count(), 0);
        assert_eq!(character.highest_skill_level(), 0);
        assert_eq!(character.total_dungeon_clears(), 0);
    }

    #[test]
    fn skill_lookup_is_case_insensitive() {
        let character = Character::new("Brynjolf")
            .with_skill("Sneak", 40)
            .with_skill("Lockpicking", 55);
        assert_eq!(character.skill_level("sneak"), 40);
        assert_eq!(character.skill_level("Pickpocket"), 0);
        assert_eq!(character.highest_skill_level(), 55);
    }

    #[test]
    fn dungeon_clears_sum_clear_counts() {
        let character = Character::new("Farkas")
            .with_cleared_dungeon("bleak_falls_barrow", "Bleak Falls Barrow", 2)
            .with_cleared_dungeon("ustengrav", "Ustengrav", 1);
        assert_eq!(character.total_dungeon_clears(), 3);
    }

    #[test]
    fn dungeon_clears_do_not_overflow() {
        let character = Character::new("Vilkas")
            .with_cleared_dungeon("labyrinthian", "Labyrinthian", 3_000_000_000)
            .with_cleared_dungeon("ysgramors_tomb", "Ysgramor's Tomb", 3_000_000_000);
        assert_eq!(character.total_dungeon_clears(), 6_000_000_000);
    }

    #[test]
    fn titles_are_granted_once() {
        let mut character = Character::new("Aela");
        assert!(character.grant_title("Huntress"));
        assert!(!character.grant_title("Huntress"));
        assert_eq!(character.titles.len(), 1);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let id = CharacterId::new();
        let json = format!(r#"{{"id": "{id}", "name": "Serana"}}"#);
        let character: Character = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(character.id, id);
        assert_eq!(character.level(), 1);
        assert!(character.perks.is_empty());
    }
}
