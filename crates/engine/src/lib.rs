//! Skyrp Engine library.
//!
//! Orchestrates the pure `skyrp-domain` progression and achievement logic.
//!
//! ## Structure
//!
//! - `use_cases/` - XP awards, achievement evaluation, reward claims, journal listing
//! - `infrastructure/` - Clock port, environment configuration, save files
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::{App, SessionReport};
