//! Built-in Skyrim achievement catalog.

use super::definition::{Achievement, AchievementCategory, AchievementRarity, AchievementReward};
use super::requirement::{CustomRequirement, Requirement};
use super::stats::AchievementStats;
use crate::entities::Character;

use AchievementCategory as Cat;
use AchievementRarity as Rarity;

/// Ordered collection of achievement definitions
#[derive(Debug, Clone, Default)]
pub struct AchievementCatalog {
    achievements: Vec<Achievement>,
}

impl AchievementCatalog {
    pub fn new(achievements: Vec<Achievement>) -> Self {
        Self { achievements }
    }

    /// The catalog shipped with the game
    pub fn standard() -> Self {
        Self::new(standard_achievements())
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter()
    }

    pub fn by_category(&self, category: AchievementCategory) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(move |a| a.category == category)
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }
}

/// Reach 30 in a warrior, mage and thief skill.
#[derive(Debug)]
pub struct JackOfAllTrades;

impl JackOfAllTrades {
    const SKILLS: [&'static str; 3] = ["one-handed", "destruction", "sneak"];
    const LEVEL: u32 = 30;
}

impl CustomRequirement for JackOfAllTrades {
    fn key(&self) -> &str {
        "jack_of_all_trades"
    }

    fn is_met(&self, _stats: &AchievementStats, character: &Character) -> bool {
        Self::SKILLS
            .iter()
            .all(|s| character.skill_level(s) >= Self::LEVEL)
    }

    fn progress(&self, _stats: &AchievementStats, character: &Character) -> Option<(u64, u64)> {
        let current: u32 = Self::SKILLS
            .iter()
            .map(|s| character.skill_level(s).min(Self::LEVEL))
            .sum();
        Some((u64::from(current), u64::from(Self::LEVEL) * Self::SKILLS.len() as u64))
    }
}

fn standard_achievements() -> Vec<Achievement> {
    vec![
        // Combat
        Achievement::new(
            "first_blood",
            "First Blood",
            "Defeat your first enemy",
            Cat::Combat,
            Rarity::Common,
            Requirement::EnemiesKilled { count: 1 },
        )
        .with_reward(AchievementReward::gold(25)),
        Achievement::new(
            "warrior_initiate",
            "Warrior Initiate",
            "Win 10 battles",
            Cat::Combat,
            Rarity::Common,
            Requirement::CombatWins { count: 10 },
        )
        .with_reward(AchievementReward::xp(50)),
        Achievement::new(
            "seasoned_warrior",
            "Seasoned Warrior",
            "Win 100 battles",
            Cat::Combat,
            Rarity::Rare,
            Requirement::CombatWins { count: 100 },
        )
        .requires("warrior_initiate")
        .with_reward(AchievementReward::xp(300).with_title("Veteran")),
        Achievement::new(
            "draugr_bane",
            "Draugr Bane",
            "Lay 25 draugr to rest",
            Cat::Combat,
            Rarity::Uncommon,
            Requirement::EnemyTypeKilled {
                enemy_type: "draugr".into(),
                count: 25,
            },
        )
        .with_reward(AchievementReward::gold(150)),
        Achievement::new(
            "dragon_slayer",
            "Dragon Slayer",
            "Slay a dragon",
            Cat::Combat,
            Rarity::Epic,
            Requirement::EnemyTypeKilled {
                enemy_type: "dragon".into(),
                count: 1,
            },
        )
        .with_reward(AchievementReward::xp(500).with_title("Dragonslayer")),
        Achievement::new(
            "boss_hunter",
            "Boss Hunter",
            "Defeat 5 bosses",
            Cat::Combat,
            Rarity::Rare,
            Requirement::BossesDefeated { count: 5 },
        )
        .with_reward(AchievementReward::gold(500)),
        Achievement::new(
            "critical_eye",
            "Critical Eye",
            "Land 50 critical hits",
            Cat::Combat,
            Rarity::Uncommon,
            Requirement::CriticalHits { count: 50 },
        ),
        // Magic
        Achievement::new(
            "apprentice_mage",
            "Apprentice Mage",
            "Cast 25 spells",
            Cat::Magic,
            Rarity::Common,
            Requirement::SpellsCast { count: 25 },
        )
        .with_reward(AchievementReward::xp(50)),
        Achievement::new(
            "destruction_adept",
            "Destruction Adept",
            "Cast 100 destruction spells",
            Cat::Magic,
            Rarity::Rare,
            Requirement::SchoolSpellsCast {
                school: "destruction".into(),
                count: 100,
            },
        )
        .with_reward(AchievementReward::default().with_item("Staff of Firebolts")),
        // Stealth
        Achievement::new(
            "light_fingers",
            "Light Fingers",
            "Pick 5 pockets",
            Cat::Stealth,
            Rarity::Common,
            Requirement::Pickpockets { count: 5 },
        ),
        Achievement::new(
            "shadow_walker",
            "Shadow Walker",
            "Master the thief's trade: pockets, locks and blades in the dark",
            Cat::Stealth,
            Rarity::Epic,
            Requirement::combo([
                Requirement::Pickpockets { count: 10 },
                Requirement::LocksPicked { count: 25 },
                Requirement::SneakAttacks { count: 15 },
            ]),
        )
        .with_reward(
            AchievementReward::default()
                .with_perk_points(1)
                .with_title("Shadow Walker"),
        ),
        // Exploration
        Achievement::new(
            "explorer",
            "Explorer",
            "Discover 10 locations",
            Cat::Exploration,
            Rarity::Common,
            Requirement::LocationsDiscovered { count: 10 },
        )
        .with_reward(AchievementReward::xp(100)),
        Achievement::new(
            "cartographer",
            "Cartographer",
            "Discover 50 locations",
            Cat::Exploration,
            Rarity::Rare,
            Requirement::LocationsDiscovered { count: 50 },
        )
        .requires("explorer")
        .with_reward(AchievementReward::xp(400)),
        Achievement::new(
            "dungeon_crawler",
            "Dungeon Crawler",
            "Clear 5 dungeons",
            Cat::Exploration,
            Rarity::Uncommon,
            Requirement::DungeonClears { count: 5 },
        )
        .with_reward(AchievementReward::gold(200)),
        Achievement::new(
            "seven_thousand_steps",
            "Seven Thousand Steps",
            "Reach High Hrothgar",
            Cat::Exploration,
            Rarity::Uncommon,
            Requirement::SpecificLocation {
                location_id: "high_hrothgar".into(),
            },
        ),
        // Questing
        Achievement::new(
            "quest_starter",
            "Quest Starter",
            "Complete your first quest",
            Cat::Questing,
            Rarity::Common,
            Requirement::QuestsCompleted { count: 1 },
        )
        .with_reward(AchievementReward::gold(50)),
        Achievement::new(
            "quest_master",
            "Quest Master",
            "Complete 50 quests",
            Cat::Questing,
            Rarity::Epic,
            Requirement::QuestsCompleted { count: 50 },
        )
        .requires("quest_starter")
        .with_reward(AchievementReward::xp(1000).with_title("Hero of Skyrim")),
        // Crafting
        Achievement::new(
            "artisan",
            "Artisan",
            "Craft 20 items",
            Cat::Crafting,
            Rarity::Uncommon,
            Requirement::ItemsCrafted { count: 20 },
        ),
        Achievement::new(
            "alchemist",
            "Alchemist",
            "Brew 10 potions",
            Cat::Crafting,
            Rarity::Uncommon,
            Requirement::PotionsBrewed { count: 10 },
        ),
        Achievement::new(
            "potion_enthusiast",
            "Potion Enthusiast",
            "Drink 25 potions",
            Cat::Crafting,
            Rarity::Common,
            Requirement::PotionsConsumed { count: 25 },
        ),
        Achievement::new(
            "collector",
            "Collector",
            "Collect 100 items",
            Cat::Crafting,
            Rarity::Uncommon,
            Requirement::ItemsCollected { count: 100 },
        ),
        // Wealth
        Achievement::new(
            "wealthy",
            "Wealthy",
            "Hold 1000 gold at once",
            Cat::Wealth,
            Rarity::Uncommon,
            Requirement::GoldHeld { amount: 1000 },
        ),
        Achievement::new(
            "big_spender",
            "Big Spender",
            "Spend 5000 gold",
            Cat::Wealth,
            Rarity::Rare,
            Requirement::GoldSpent { amount: 5000 },
        ),
        // Social
        Achievement::new(
            "friendly_face",
            "Friendly Face",
            "Meet 20 people",
            Cat::Social,
            Rarity::Common,
            Requirement::NpcsMet { count: 20 },
        ),
        Achievement::new(
            "loyal_companion",
            "Loyal Companion",
            "Recruit a companion",
            Cat::Social,
            Rarity::Common,
            Requirement::CompanionsRecruited { count: 1 },
        ),
        // Progression
        Achievement::new(
            "level_10",
            "Adventurer",
            "Reach level 10",
            Cat::Progression,
            Rarity::Common,
            Requirement::LevelReached { level: 10 },
        )
        .with_reward(AchievementReward::gold(100)),
        Achievement::new(
            "level_25",
            "Hero",
            "Reach level 25",
            Cat::Progression,
            Rarity::Rare,
            Requirement::LevelReached { level: 25 },
        )
        .requires("level_10")
        .with_reward(AchievementReward::gold(500).with_perk_points(1)),
        Achievement::new(
            "level_50",
            "Legend",
            "Reach level 50",
            Cat::Progression,
            Rarity::Legendary,
            Requirement::LevelReached { level: 50 },
        )
        .requires("level_25")
        .with_reward(AchievementReward::gold(2000).with_title("Legend")),
        Achievement::new(
            "perk_novice",
            "Perk Novice",
            "Unlock your first perk",
            Cat::Progression,
            Rarity::Common,
            Requirement::PerksUnlocked { count: 1 },
        ),
        Achievement::new(
            "perk_master",
            "Perk Master",
            "Unlock 25 perks",
            Cat::Progression,
            Rarity::Epic,
            Requirement::PerksUnlocked { count: 25 },
        )
        .requires("perk_novice"),
        Achievement::new(
            "skill_adept",
            "Adept",
            "Raise any skill to 50",
            Cat::Progression,
            Rarity::Uncommon,
            Requirement::AnySkillLevel { level: 50 },
        ),
        Achievement::new(
            "skill_master",
            "Master",
            "Raise any skill to 100",
            Cat::Progression,
            Rarity::Legendary,
            Requirement::AnySkillLevel { level: 100 },
        )
        .requires("skill_adept")
        .with_reward(AchievementReward::default().with_perk_points(2)),
        Achievement::new(
            "well_rested",
            "Well Rested",
            "Rest 30 times",
            Cat::Progression,
            Rarity::Common,
            Requirement::RestsTaken { count: 30 },
        ),
        Achievement::new(
            "marathon",
            "Marathon",
            "Play for 10 hours",
            Cat::Progression,
            Rarity::Uncommon,
            Requirement::PlayTime { minutes: 600 },
        ),
        // Secret
        Achievement::new(
            "death_is_not_the_end",
            "Death Is Not the End",
            "Fall in battle",
            Cat::Secret,
            Rarity::Common,
            Requirement::Deaths { count: 1 },
        )
        .hidden(),
        Achievement::new(
            "audience_with_paarthurnax",
            "Audience with Paarthurnax",
            "Speak with the dragon atop the Throat of the World",
            Cat::Secret,
            Rarity::Legendary,
            Requirement::SpecificNpc {
                npc_id: "paarthurnax".into(),
            },
        )
        .hidden()
        .with_reward(AchievementReward::xp(750)),
        Achievement::new(
            "wuuthrad_recovered",
            "Wuuthrad Recovered",
            "Recover the axe of Ysgramor",
            Cat::Secret,
            Rarity::Rare,
            Requirement::SpecificItem {
                item_id: "wuuthrad".into(),
            },
        )
        .hidden(),
        Achievement::new(
            "jack_of_all_trades",
            "Jack of All Trades",
            "Reach 30 in One-Handed, Destruction and Sneak",
            Cat::Secret,
            Rarity::Legendary,
            Requirement::custom(JackOfAllTrades),
        )
        .hidden()
        .with_reward(AchievementReward::default().with_perk_points(1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_ids_are_unique() {
        let catalog = AchievementCatalog::standard();
        let ids: HashSet<_> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn prerequisites_reference_known_entries() {
        let catalog = AchievementCatalog::standard();
        for achievement in catalog.iter() {
            if let Some(pre) = &achievement.prerequisite {
                assert!(catalog.get(pre).is_some(), "{} -> {}", achievement.id, pre);
            }
        }
    }

    #[test]
    fn every_category_is_populated() {
        let catalog = AchievementCatalog::standard();
        for category in AchievementCategory::ALL {
            assert!(
                catalog.by_category(category).next().is_some(),
                "{category} has no entries"
            );
        }
    }

    #[test]
    fn jack_of_all_trades_tracks_three_skills() {
        let rule = JackOfAllTrades;
        let stats = AchievementStats::new();
        let partial = Character::new("Test")
            .with_skill("One-Handed", 45)
            .with_skill("Sneak", 15);
        assert!(!rule.is_met(&stats, &partial));
        assert_eq!(rule.progress(&stats, &partial), Some((45, 90)));

        let done = partial.with_skill("Destruction", 30).with_skill("Sneak", 30);
        assert!(rule.is_met(&stats, &done));
    }
}
