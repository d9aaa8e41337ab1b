//! Entities read by the progression core

mod character;
mod game_data;

pub use character::{Character, CharacterSkill, ClearedDungeon};
pub use game_data::{
    CompanionRecord, GameDataSnapshot, InventoryItem, ItemTransaction, QuestRecord, QuestStatus,
};
