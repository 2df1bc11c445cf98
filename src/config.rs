//! Overlay configuration: fade timings and the accent colour.
//!
//! Loaded from TOML; every field is optional and falls back to the
//! defaults the overlay was designed around.

use egui::Color32;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_MAIN_COLOR: &str = "rgba(12, 83, 175, 0.9)";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Idle time before the overlay starts fading out
    pub fade_out_delay_ms: u64,
    /// Length of a single fade in or out
    pub fade_duration_ms: u64,
    /// Tint for the primary button and the scrubber
    pub main_color: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            fade_out_delay_ms: 5000,
            fade_duration_ms: 300,
            main_color: DEFAULT_MAIN_COLOR.to_owned(),
        }
    }
}

impl ControlsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded controls config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fade_duration_ms == 0 {
            return Err(Error::InvalidConfig(
                "fade_duration_ms must be greater than zero".to_owned(),
            ));
        }
        parse_color(&self.main_color)?;
        Ok(())
    }

    pub fn fade_out_delay(&self) -> Duration {
        Duration::from_millis(self.fade_out_delay_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }

    pub fn main_color32(&self) -> Result<Color32> {
        parse_color(&self.main_color)
    }
}

/// Parse `rgba(r, g, b, a)`, `rgb(r, g, b)`, `#rrggbb` or `#rrggbbaa`.
///
/// Channel values are 0-255, alpha in `rgba()` is 0.0-1.0.
pub fn parse_color(text: &str) -> Result<Color32> {
    let invalid = || Error::InvalidColor(text.to_owned());
    let trimmed = text.trim();

    if let Some(hex) = trimmed.strip_prefix('#') {
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        return Ok(Color32::from_rgba_unmultiplied(r, g, b, a));
    }

    let (has_alpha, body) = if let Some(body) = trimmed.strip_prefix("rgba(") {
        (true, body)
    } else if let Some(body) = trimmed.strip_prefix("rgb(") {
        (false, body)
    } else {
        return Err(invalid());
    };
    let body = body.strip_suffix(')').ok_or_else(invalid)?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid());
    }

    let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
    let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = if has_alpha {
        let alpha: f64 = parts[3].parse().map_err(|_| invalid())?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(invalid());
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };
    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}
