//! Achievement progress value object

use serde::{Deserialize, Serialize};

/// Progress toward a locked achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub current: u64,
    pub target: u64,
    /// `round(min(100, current / target * 100))`
    pub percent: u8,
}

impl AchievementProgress {
    pub fn from_counts(current: u64, target: u64) -> Self {
        let percent = if target == 0 {
            100
        } else {
            (current as f64 / target as f64 * 100.0).min(100.0).round() as u8
        };
        Self {
            current,
            target,
            percent,
        }
    }

    /// Completion as a fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.current as f64 / self.target as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_rounded() {
        assert_eq!(AchievementProgress::from_counts(1, 3).percent, 33);
        assert_eq!(AchievementProgress::from_counts(2, 3).percent, 67);
    }

    #[test]
    fn percent_is_capped_at_100() {
        let progress = AchievementProgress::from_counts(250, 100);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.fraction(), 1.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn zero_target_is_complete() {
        assert_eq!(AchievementProgress::from_counts(0, 0).percent, 100);
    }
}
