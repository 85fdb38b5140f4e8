pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod metadata;
pub mod params;
pub mod plan;
pub mod runlog;
pub mod runner;
pub mod script;
pub mod toolkit;
pub mod utils;
pub mod validation;

/// ASCII art logo for sopline CLI
pub const LOGO: &str = "\
  ┌─┐┌─┐┌─┐┬  ┬┌┐┌┌─┐
  └─┐│ │├─┘│  ││││├┤
  └─┘└─┘┴  ┴─┘┴┘└┘└─┘";
