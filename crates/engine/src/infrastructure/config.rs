//! Engine configuration loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SKYRP_BASE_XP` | 50 |
//! | `SKYRP_XP_EXPONENT` | 1.5 |
//! | `SKYRP_XP_LINEAR_SCALE` | 25 |
//! | `SKYRP_MAX_LEVEL` | 100 |
//! | `SKYRP_SAVE_PATH` | unset |
//!
//! Values may also come from a `.env` file; variables already set in the
//! process environment take precedence over the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use skyrp_domain::LevelCurve;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub curve: LevelCurve,
    pub save_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            curve: LevelCurve::STANDARD,
            save_path: None,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
            default
        }),
        None => default,
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from the process environment, falling back to the
    /// entries of a dotenv file. A missing file is not an error.
    pub fn from_env_file(path: &Path) -> Result<Self, dotenvy::Error> {
        if !path.exists() {
            return Ok(Self::from_env());
        }
        let file_vars: HashMap<String, String> =
            dotenvy::from_path_iter(path)?.collect::<Result<_, _>>()?;
        tracing::debug!(path = %path.display(), entries = file_vars.len(), "Loaded env file");
        Ok(Self::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| file_vars.get(key).cloned())
        }))
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let standard = LevelCurve::STANDARD;
        let base_xp = parse_or(&lookup, "SKYRP_BASE_XP", standard.base_xp);
        let exponent = parse_or(&lookup, "SKYRP_XP_EXPONENT", standard.exponent);
        let linear_scale = parse_or(&lookup, "SKYRP_XP_LINEAR_SCALE", standard.linear_scale);
        let max_level = parse_or(&lookup, "SKYRP_MAX_LEVEL", standard.max_level);

        let curve = LevelCurve::new(base_xp, exponent, linear_scale, max_level).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid level curve configuration, using standard curve");
            standard
        });

        let save_path = lookup("SKYRP_SAVE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Self { curve, save_path }
    }
}
