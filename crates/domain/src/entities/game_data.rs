//! Raw game-data records used as ground truth by the stats audit.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a quest in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
    /// Unknown status for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A quest journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: QuestStatus,
}

impl QuestRecord {
    pub fn new(name: impl Into<String>, status: QuestStatus) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase().replace(' ', "_"),
            name,
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }
}

/// An item stack currently carried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        let name = name.into();
        Self {
            id: name.to_lowercase().replace(' ', "_"),
            name,
            quantity,
        }
    }
}

/// An inventory ledger entry
///
/// `added == false` marks items leaving the inventory (consumed, sold,
/// dropped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTransaction {
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub added: bool,
}

impl ItemTransaction {
    pub fn added(item_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            added: true,
        }
    }

    pub fn removed(item_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            added: false,
        }
    }
}

/// A follower the character has met
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub recruited: bool,
}

/// Everything the stats audit reconciles against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDataSnapshot {
    #[serde(default)]
    pub quests: Vec<QuestRecord>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub transactions: Vec<ItemTransaction>,
    #[serde(default)]
    pub companions: Vec<CompanionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_time_minutes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_quest_status_deserializes() {
        let quest: QuestRecord =
            serde_json::from_str(r#"{"status": "abandoned"}"#).expect("deserialize");
        assert_eq!(quest.status, QuestStatus::Unknown);
        assert!(!quest.is_completed());
    }

    #[test]
    fn snapshot_defaults_missing_collections() {
        let snapshot: GameDataSnapshot =
            serde_json::from_str(r#"{"quests": [{"status": "completed"}]}"#).expect("deserialize");
        assert_eq!(snapshot.quests.len(), 1);
        assert!(snapshot.inventory.is_empty());
        assert!(snapshot.play_time_minutes.is_none());
    }
}
