//! Leveling engine - converts experience totals into character levels.
//!
//! The curve is a pure function of level:
//!
//! ```text
//! xp_for_next_level(L) = round(base_xp * L^exponent + L * linear_scale)
//! ```
//!
//! A character's level is always derived from its total XP, never stored
//! independently, so the `(total_xp, level)` pair cannot drift.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Parameters of the experience curve.
///
/// Deserialization goes through [`LevelCurve::new`], so a loaded curve is
/// always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CurveParams")]
pub struct LevelCurve {
    /// XP multiplier applied to `level^exponent`
    pub base_xp: f64,
    /// Growth exponent
    pub exponent: f64,
    /// Flat XP added per level
    pub linear_scale: f64,
    /// Highest reachable level; accumulation stops silently here
    pub max_level: u32,
}

impl LevelCurve {
    /// The curve used by the live game.
    pub const STANDARD: LevelCurve = LevelCurve {
        base_xp: 50.0,
        exponent: 1.5,
        linear_scale: 25.0,
        max_level: 100,
    };

    /// Build a validated curve.
    pub fn new(
        base_xp: f64,
        exponent: f64,
        linear_scale: f64,
        max_level: u32,
    ) -> Result<Self, DomainError> {
        if !base_xp.is_finite() || base_xp <= 0.0 {
            return Err(DomainError::validation("base_xp must be a positive number"));
        }
        if !exponent.is_finite() || exponent < 0.0 {
            return Err(DomainError::validation("exponent must be non-negative"));
        }
        if !linear_scale.is_finite() || linear_scale < 0.0 {
            return Err(DomainError::validation("linear_scale must be non-negative"));
        }
        if max_level == 0 {
            return Err(DomainError::validation("max_level must be at least 1"));
        }
        Ok(Self {
            base_xp,
            exponent,
            linear_scale,
            max_level,
        })
    }

    /// XP needed to advance from `level` to `level + 1`.
    pub fn xp_for_next_level(&self, level: u32) -> u64 {
        if level < 1 {
            return self.base_xp.round() as u64;
        }
        let l = f64::from(level);
        (self.base_xp * l.powf(self.exponent) + l * self.linear_scale).round() as u64
    }

    /// Cumulative XP needed to reach `level` from zero.
    pub fn total_xp_for_level(&self, level: u32) -> u64 {
        (1..level).fold(0u64, |total, l| {
            total.saturating_add(self.xp_for_next_level(l))
        })
    }

    /// Level corresponding to a total XP amount, bounded by `max_level`.
    pub fn level_from_total_xp(&self, total_xp: u64) -> u32 {
        let mut level = 1;
        let mut accumulated = 0u64;
        while level < self.max_level {
            let next = accumulated.saturating_add(self.xp_for_next_level(level));
            if next > total_xp {
                break;
            }
            accumulated = next;
            level += 1;
        }
        level
    }

    /// Detect one or more level-ups since `current_level`.
    ///
    /// Returns `None` when the XP earned since the start of `current_level`
    /// does not clear its threshold, or when the cap is already reached.
    pub fn check_level_up(&self, total_xp: u64, current_level: u32) -> Option<LevelUp> {
        let current_level = current_level.max(1);
        if current_level >= self.max_level {
            return None;
        }

        let earned = total_xp.saturating_sub(self.total_xp_for_level(current_level));
        if earned < self.xp_for_next_level(current_level) {
            return None;
        }

        let mut new_level = current_level;
        let mut threshold = self.total_xp_for_level(current_level);
        while new_level < self.max_level {
            let next = threshold.saturating_add(self.xp_for_next_level(new_level));
            if total_xp < next {
                break;
            }
            threshold = next;
            new_level += 1;
        }

        Some(LevelUp {
            previous_level: current_level,
            new_level,
            total_xp,
        })
    }

    /// Progress through `current_level` toward the next one.
    pub fn xp_progress(&self, total_xp: u64, current_level: u32) -> XpProgress {
        let current = total_xp.saturating_sub(self.total_xp_for_level(current_level));
        let required = self.xp_for_next_level(current_level);
        let percentage = if required == 0 {
            100.0
        } else {
            (current as f64 / required as f64 * 100.0).clamp(0.0, 100.0)
        };
        XpProgress {
            current,
            required,
            percentage,
            total_xp,
        }
    }
}

/// Unvalidated wire form of [`LevelCurve`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurveParams {
    base_xp: f64,
    exponent: f64,
    linear_scale: f64,
    max_level: u32,
}

impl TryFrom<CurveParams> for LevelCurve {
    type Error = DomainError;

    fn try_from(params: CurveParams) -> Result<Self, Self::Error> {
        Self::new(
            params.base_xp,
            params.exponent,
            params.linear_scale,
            params.max_level,
        )
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A detected level-up.
///
/// `total_xp` is the character's full total, not a remainder: levels are
/// derived from totals, so nothing is ever subtracted on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub previous_level: u32,
    pub new_level: u32,
    pub total_xp: u64,
}

impl LevelUp {
    pub fn levels_gained(&self) -> u32 {
        self.new_level.saturating_sub(self.previous_level)
    }
}

/// Display-ready XP progress within a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpProgress {
    /// XP earned since the start of the current level
    pub current: u64,
    /// XP needed to clear the current level
    pub required: u64,
    /// `current / required` as a percentage in `[0, 100]`
    pub percentage: f64,
    pub total_xp: u64,
}

/// Experience total and the level derived from it.
///
/// A stored `level` is ignored on load and re-derived from `totalXp` on the
/// standard curve; call [`Experience::recalculate`] for any other curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredExperience")]
pub struct Experience {
    total_xp: u64,
    level: u32,
}

impl Experience {
    pub fn new(total_xp: u64, curve: &LevelCurve) -> Self {
        Self {
            total_xp,
            level: curve.level_from_total_xp(total_xp),
        }
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Add XP and re-derive the level.
    pub fn gain(&mut self, amount: u64, curve: &LevelCurve) -> Option<LevelUp> {
        self.total_xp = self.total_xp.saturating_add(amount);
        let level_up = curve.check_level_up(self.total_xp, self.level);
        self.level = curve.level_from_total_xp(self.total_xp);
        level_up
    }

    /// Re-derive the level after loading from storage or changing curves.
    pub fn recalculate(&mut self, curve: &LevelCurve) {
        self.level = curve.level_from_total_xp(self.total_xp);
    }

    pub fn progress(&self, curve: &LevelCurve) -> XpProgress {
        curve.xp_progress(self.total_xp, self.level)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredExperience {
    #[serde(default)]
    total_xp: u64,
}

impl From<StoredExperience> for Experience {
    fn from(stored: StoredExperience) -> Self {
        Self::new(stored.total_xp, &LevelCurve::STANDARD)
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
        }
    }
}

/// XP to advance from `level` on the standard curve.
pub fn xp_for_next_level(level: u32) -> u64 {
    LevelCurve::STANDARD.xp_for_next_level(level)
}

/// Cumulative XP to reach `level` on the standard curve.
pub fn total_xp_for_level(level: u32) -> u64 {
    LevelCurve::STANDARD.total_xp_for_level(level)
}

/// Level for a total XP amount on the standard curve.
pub fn level_from_total_xp(total_xp: u64) -> u32 {
    LevelCurve::STANDARD.level_from_total_xp(total_xp)
}

/// Level-up detection on the standard curve.
pub fn check_level_up(total_xp: u64, current_level: u32) -> Option<LevelUp> {
    LevelCurve::STANDARD.check_level_up(total_xp, current_level)
}

/// Progress within a level on the standard curve.
pub fn xp_progress(total_xp: u64, current_level: u32) -> XpProgress {
    LevelCurve::STANDARD.xp_progress(total_xp, current_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_for_next_level_follows_curve() {
        // round(50 * 1 + 25)
        assert_eq!(xp_for_next_level(1), 75);
        // round(50 * 2^1.5 + 50) = round(191.42)
        assert_eq!(xp_for_next_level(2), 191);
        // round(50 * 3^1.5 + 75) = round(334.81)
        assert_eq!(xp_for_next_level(3), 335);
    }

    #[test]
    fn xp_for_level_zero_is_base() {
        assert_eq!(xp_for_next_level(0), 50);
    }

    #[test]
    fn total_xp_accumulates_previous_levels() {
        assert_eq!(total_xp_for_level(0), 0);
        assert_eq!(total_xp_for_level(1), 0);
        assert_eq!(total_xp_for_level(2), 75);
        assert_eq!(total_xp_for_level(3), 266);
        assert_eq!(total_xp_for_level(4), 601);
    }

    #[test]
    fn level_from_total_inverts_total_for_level() {
        for level in 1..=100 {
            assert_eq!(
                level_from_total_xp(total_xp_for_level(level)),
                level,
                "level {level}"
            );
        }
    }

    #[test]
    fn one_below_threshold_stays_on_previous_level() {
        for level in 2..=100 {
            assert_eq!(level_from_total_xp(total_xp_for_level(level) - 1), level - 1);
        }
    }

    #[test]
    fn zero_xp_is_level_one() {
        assert_eq!(level_from_total_xp(0), 1);
        assert!(check_level_up(0, 1).is_none());
        let progress = xp_progress(0, 1);
        assert_eq!(progress.current, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn level_is_capped() {
        assert_eq!(level_from_total_xp(u64::MAX), 100);
        assert!(check_level_up(u64::MAX, 100).is_none());
    }

    #[test]
    fn custom_cap_bounds_levels() {
        let curve = LevelCurve::new(50.0, 1.5, 25.0, 10).expect("valid curve");
        assert_eq!(curve.level_from_total_xp(u64::MAX), 10);
        let up = curve.check_level_up(u64::MAX, 1).expect("level up");
        assert_eq!(up.new_level, 10);
    }

    #[test]
    fn invalid_curves_are_rejected() {
        assert!(LevelCurve::new(0.0, 1.5, 25.0, 100).is_err());
        assert!(LevelCurve::new(50.0, f64::NAN, 25.0, 100).is_err());
        assert!(LevelCurve::new(50.0, 1.5, -1.0, 100).is_err());
        assert!(LevelCurve::new(50.0, 1.5, 25.0, 0).is_err());
    }

    #[test]
    fn multi_level_up_in_one_update() {
        let xp = xp_for_next_level(1) + xp_for_next_level(2) + 10;
        let up = check_level_up(xp, 1).expect("should level up");
        assert_eq!(up.new_level, 3);
        assert_eq!(up.levels_gained(), 2);
        // Total, not a remainder
        assert_eq!(up.total_xp, xp);
    }

    #[test]
    fn exact_threshold_levels_up() {
        let up = check_level_up(xp_for_next_level(1), 1).expect("should level up");
        assert_eq!(up.new_level, 2);
        assert!(check_level_up(xp_for_next_level(1) - 1, 1).is_none());
    }

    #[test]
    fn level_up_iff_threshold_cleared() {
        for level in 1..100u32 {
            let base = total_xp_for_level(level);
            let need = xp_for_next_level(level);
            for xp in [base, base + need - 1, base + need, base + need * 3] {
                let cleared = xp.saturating_sub(base) >= need;
                assert_eq!(check_level_up(xp, level).is_some(), cleared, "xp {xp} level {level}");
            }
        }
    }

    #[test]
    fn progress_is_clamped_for_out_of_range_totals() {
        // Far below the level's baseline
        let below = xp_progress(0, 50);
        assert_eq!(below.current, 0);
        assert_eq!(below.percentage, 0.0);

        // Far above the level's ceiling
        let above = xp_progress(u64::MAX / 2, 1);
        assert_eq!(above.percentage, 100.0);
    }

    #[test]
    fn progress_midway_through_level() {
        let progress = xp_progress(total_xp_for_level(2) + 50, 2);
        assert_eq!(progress.current, 50);
        assert_eq!(progress.required, 191);
        assert!(progress.percentage > 26.0 && progress.percentage < 27.0);
        assert_eq!(progress.total_xp, 125);
    }

    #[test]
    fn experience_gain_keeps_level_consistent() {
        let curve = LevelCurve::default();
        let mut xp = Experience::default();
        assert!(xp.gain(10, &curve).is_none());
        assert_eq!(xp.level(), 1);

        let up = xp.gain(300, &curve).expect("level up");
        assert_eq!(up.previous_level, 1);
        assert_eq!(xp.level(), curve.level_from_total_xp(310));
        assert_eq!(xp.total_xp(), 310);
    }

    #[test]
    fn stored_level_is_rederived_on_load() {
        let stale: Experience =
            serde_json::from_str(r#"{"totalXp": 700, "level": 1}"#).expect("deserialize");
        assert_eq!(stale.level(), 4);

        let inflated: Experience =
            serde_json::from_str(r#"{"totalXp": 0, "level": 60}"#).expect("deserialize");
        assert_eq!(inflated.level(), 1);
        assert_eq!(inflated.total_xp(), 0);
    }

    #[test]
    fn recalculate_applies_another_curve() {
        let mut xp = Experience::new(700, &LevelCurve::STANDARD);
        let capped = LevelCurve::new(50.0, 1.5, 25.0, 2).expect("valid curve");
        xp.recalculate(&capped);
        assert_eq!(xp.level(), 2);
    }

    #[test]
    fn deserialized_curve_is_validated() {
        let curve: LevelCurve = serde_json::from_str(
            r#"{"baseXp": 80, "exponent": 1.5, "linearScale": 25, "maxLevel": 60}"#,
        )
        .expect("valid curve");
        assert_eq!(curve.max_level, 60);

        let zero_cap = serde_json::from_str::<LevelCurve>(
            r#"{"baseXp": 50, "exponent": 1.5, "linearScale": 25, "maxLevel": 0}"#,
        );
        assert!(zero_cap.is_err());
    }
}
