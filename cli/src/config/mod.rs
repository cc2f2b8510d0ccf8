//! Configuration management for the constkeeper CLI.
//!
//! Loads `~/.constkeeper/config.toml`, which names the environments the
//! form can be opened in, where constants are stored and which theme to
//! draw with.

mod app;
mod file;
mod types;

#[cfg(test)]
mod tests;

pub use app::AppConfig;

pub const CONSTKEEPER_HOME: &str = ".constkeeper";
pub const CONSTKEEPER_CONFIG_PATH: &str = ".constkeeper/config.toml";
pub const DEFAULT_STORE_FILE: &str = "constants.toml";
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "constkeeper.log";
