use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::geometry::Grid;

/// A color given as `#RGB` or `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
                Ok(Rgb(r * 17, g * 17, b * 17))
            }
            6 => Ok(Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Configuration for the game
///
/// Every field is optional in a config file; missing ones fall back to [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Tick period in milliseconds
    pub frame_interval: u64,
    /// Size of one cell when drawn
    pub point_size: u32,
    /// Rejected moves survived before the snake dies
    pub collision_tolerance: u32,

    pub snake_color: Rgb,
    pub snake_eye_color: Rgb,
    pub candy_color: Rgb,
    pub shrinking_candy_color: Rgb,
    pub score_board_color: Rgb,
    pub score_text_color: Rgb,
    pub background_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            frame_interval: 2000,
            point_size: 18,
            collision_tolerance: 2,
            snake_color: Rgb(0x53, 0xfc, 0x35),
            snake_eye_color: Rgb(0xfb, 0x4a, 0x41),
            candy_color: Rgb(0xb1, 0x1c, 0x1c),
            shrinking_candy_color: Rgb(0x19, 0x9c, 0x2c),
            score_board_color: Rgb(0x11, 0x11, 0x11),
            score_text_color: Rgb(0xfc, 0xe3, 0x41),
            background_color: Rgb(0, 0, 0),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Parse a JSON document, filling in defaults for any option it leaves out
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval)
    }

    /// Build the grid these options describe
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Check that a game can be built from these options
    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;
        if grid.capacity() < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.frame_interval == 0 {
            return Err(ConfigError::InvalidFrameInterval);
        }
        if self.point_size == 0 {
            return Err(ConfigError::InvalidPointSize);
        }
        Ok(())
    }
}
