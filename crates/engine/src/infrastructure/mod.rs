//! External dependency implementations (ports + adapters)

pub mod clock;
pub mod config;
pub mod ports;
pub mod save_file;
