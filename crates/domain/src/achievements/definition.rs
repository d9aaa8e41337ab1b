//! Achievement catalog entries and their classification enums.

use serde::{Deserialize, Serialize};

use super::requirement::Requirement;
use crate::error::DomainError;

/// Achievement grouping shown as tabs in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Combat,
    Magic,
    Stealth,
    Exploration,
    Questing,
    Crafting,
    Wealth,
    Social,
    Progression,
    Secret,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 10] = [
        Self::Combat,
        Self::Magic,
        Self::Stealth,
        Self::Exploration,
        Self::Questing,
        Self::Crafting,
        Self::Wealth,
        Self::Social,
        Self::Progression,
        Self::Secret,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Combat => "Combat",
            Self::Magic => "Magic",
            Self::Stealth => "Stealth",
            Self::Exploration => "Exploration",
            Self::Questing => "Questing",
            Self::Crafting => "Crafting",
            Self::Wealth => "Wealth",
            Self::Social => "Social",
            Self::Progression => "Progression",
            Self::Secret => "Secret",
        }
    }
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for AchievementCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown achievement category: {}", s)))
    }
}

/// How rare an achievement is, from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl AchievementRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for AchievementRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for AchievementRarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "epic" => Ok(Self::Epic),
            "legendary" => Ok(Self::Legendary),
            _ => Err(DomainError::parse(format!("Unknown achievement rarity: {}", s))),
        }
    }
}

/// One-time reward granted when an achievement is claimed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementReward {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perk_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AchievementReward {
    pub fn gold(amount: u64) -> Self {
        Self {
            gold: Some(amount),
            ..Self::default()
        }
    }

    pub fn xp(amount: u64) -> Self {
        Self {
            xp: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_gold(mut self, amount: u64) -> Self {
        self.gold = Some(amount);
        self
    }

    pub fn with_xp(mut self, amount: u64) -> Self {
        self.xp = Some(amount);
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn with_perk_points(mut self, points: u32) -> Self {
        self.perk_points = Some(points);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub rarity: AchievementRarity,
    pub requirement: Requirement,
    #[serde(default)]
    pub reward: AchievementReward,
    /// Hidden entries are masked until unlocked but still evaluated
    #[serde(default)]
    pub hidden: bool,
    /// Achievement that must be unlocked first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
}

impl Achievement {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: AchievementCategory,
        rarity: AchievementRarity,
        requirement: Requirement,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            rarity,
            requirement,
            reward: AchievementReward::default(),
            hidden: false,
            prerequisite: None,
        }
    }

    pub fn with_reward(mut self, reward: AchievementReward) -> Self {
        self.reward = reward;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn requires(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }
}
