//! Stats audit - recompute derived counters from authoritative game data.
//!
//! Incrementally tracked counters can drift when events are missed. The audit
//! rebuilds them from quests, inventory, the item ledger, companions and the
//! character itself, and leaves untouched counters that have no ground truth
//! (combat, magic, stealth).

use super::stats::AchievementStats;
use crate::entities::{Character, GameDataSnapshot, ItemTransaction};

/// Name fragments that mark an item as a potion
pub const POTION_KEYWORDS: [&str; 5] = ["potion", "elixir", "draught", "philter", "tonic"];

pub fn is_potion(item_name: &str) -> bool {
    let name = item_name.to_lowercase();
    POTION_KEYWORDS.iter().any(|k| name.contains(k))
}

fn potions_consumed(transactions: &[ItemTransaction]) -> u64 {
    transactions
        .iter()
        .filter(|t| !t.added && is_potion(&t.item_name))
        .fold(0u64, |total, t| total.saturating_add(u64::from(t.quantity)))
}

/// Return a reconciled copy of `stats`. The input is not modified.
pub fn audit_stats_from_game_data(
    stats: &AchievementStats,
    character: &Character,
    game_data: &GameDataSnapshot,
) -> AchievementStats {
    let mut audited = stats.clone();

    audited.quests_completed = game_data.quests.iter().filter(|q| q.is_completed()).count() as u64;

    audited.discovered_locations.extend(
        character
            .discovered_locations
            .iter()
            .map(|l| l.trim().to_lowercase()),
    );
    audited.locations_discovered = audited.discovered_locations.len() as u64;

    audited.dungeon_clears = character.total_dungeon_clears();

    audited.items_collected = game_data
        .inventory
        .iter()
        .fold(0u64, |total, i| total.saturating_add(u64::from(i.quantity)));

    audited.potions_consumed = potions_consumed(&game_data.transactions);

    audited.skill_levels = character
        .skills
        .iter()
        .map(|s| (s.name.trim().to_lowercase(), s.level))
        .collect();

    audited.perks_unlocked = character.perk_count();

    audited.companions_recruited =
        game_data.companions.iter().filter(|c| c.recruited).count() as u64;

    if let Some(minutes) = game_data.play_time_minutes {
        audited.play_time_minutes = minutes;
    }

    audited
}
