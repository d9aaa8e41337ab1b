//! Skyrp Engine - save file processor.
//!
//! Usage: `skyrp-engine [save.json] [--write]`
//!
//! Loads a save, records its pending events, awards pending XP, evaluates
//! achievements and prints a JSON report. With `--write` the updated save is
//! written back in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyrp_domain::AchievementCatalog;
use skyrp_engine::infrastructure::{clock::SystemClock, config::EngineConfig, save_file::SaveFile};
use skyrp_engine::App;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyrp_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env_file(Path::new(".env"))?;

    let mut write_back = false;
    let mut path_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--write" => write_back = true,
            _ => path_arg = Some(PathBuf::from(arg)),
        }
    }
    let save_path = path_arg
        .or_else(|| config.save_path.clone())
        .context("No save file given; pass a path or set SKYRP_SAVE_PATH")?;

    tracing::info!(path = %save_path.display(), "Processing save file");

    let mut save = SaveFile::load(&save_path)?;
    let app = App::new(
        config,
        Arc::new(AchievementCatalog::standard()),
        Arc::new(SystemClock::new()),
    );

    let report = app.process_save(&mut save)?;

    if write_back {
        save.save(&save_path)?;
        tracing::info!(path = %save_path.display(), "Save file updated");
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
