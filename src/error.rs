//! Error types for the media controls crate.
//!
//! The overlay itself never fails while drawing; these errors come from
//! loading configuration and decoding external player-state codes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A colour string could not be parsed
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// A player-state code outside the known contract
    #[error("Unknown player state code: {0}")]
    UnknownPlayerState(i32),

    /// Configuration values that parse but make no sense
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
