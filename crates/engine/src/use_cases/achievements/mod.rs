//! Achievement use cases.
//!
//! Evaluation, reward claiming and the journal listing. All three operate on
//! a single character's [`AchievementState`](skyrp_domain::AchievementState).

use std::sync::Arc;

mod claim;
mod error;
mod evaluate;
mod list;

pub use claim::{ClaimAchievementReward, ClaimedReward};
pub use error::AchievementError;
pub use evaluate::{EvaluateAchievements, UnlockedAchievement};
pub use list::ListAchievementProgress;

/// Container for achievement use cases.
pub struct AchievementUseCases {
    pub evaluate: Arc<EvaluateAchievements>,
    pub claim: Arc<ClaimAchievementReward>,
    pub list: Arc<ListAchievementProgress>,
}

impl AchievementUseCases {
    pub fn new(
        evaluate: Arc<EvaluateAchievements>,
        claim: Arc<ClaimAchievementReward>,
        list: Arc<ListAchievementProgress>,
    ) -> Self {
        Self {
            evaluate,
            claim,
            list,
        }
    }
}
