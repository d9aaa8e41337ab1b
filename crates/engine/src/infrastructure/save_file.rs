//! JSON save files consumed by the CLI.
//!
//! A save bundles one character with its own achievement state, plus
//! optional raw game data for the audit and pending gameplay deltas.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skyrp_domain::{AchievementState, Character, GameDataSnapshot, StatEvent};

/// Save file errors.
#[derive(Debug, thiserror::Error)]
pub enum SaveFileError {
    #[error("Failed to read save file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed save file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk save layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    pub character: Character,
    /// Missing state means the character has never unlocked anything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<AchievementState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_data: Option<GameDataSnapshot>,
    /// XP earned since the last save was processed
    #[serde(default)]
    pub pending_xp: u64,
    /// Gameplay events not yet folded into the stats
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending_events: Vec<StatEvent>,
}

impl SaveFile {
    pub fn load(path: &Path) -> Result<Self, SaveFileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SaveFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SaveFileError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SaveFileError> {
        let raw = serde_json::to_string_pretty(self).map_err(|source| SaveFileError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, raw).map_err(|source| SaveFileError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// The character's achievement state, created empty when absent
    pub fn take_achievement_state(&mut self) -> AchievementState {
        self.achievements
            .take()
            .unwrap_or_else(|| AchievementState::new(self.character.id))
    }
}
