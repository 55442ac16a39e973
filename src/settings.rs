//! Game settings and grid configuration
//!
//! Read once at startup (optionally from a JSON file) and immutable for the
//! rest of the session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DROP_COLUMN_OFFSETS;
use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Size of one grid cell in pixels
    pub cell_size: u32,
    /// Width and height of the square play field in pixels
    pub field_size: u32,

    // === Simulation ===
    /// RNG seed (None = derive from wall clock)
    pub seed: Option<u64>,
    /// Upper bound on fixed steps run in one host tick (None = unbounded)
    pub max_steps_per_tick: Option<u32>,
    /// Host tick cadence for the headless runner
    pub tick_hz: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: 20,
            field_size: 600,

            seed: None,
            // Two seconds of catch-up at 120 Hz
            max_steps_per_tick: Some(240),
            tick_hz: 60,

            master_volume: 1.0,
            muted: false,
        }
    }
}

/// Largest field the frame buffer accepts, per side
pub const MAX_FIELD_SIZE: u32 = 16_384;

/// Validated grid geometry derived from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cell_size: u32,
    pub field_size: u32,
    pub cols: u32,
    pub rows: u32,
}

impl GridConfig {
    /// Fewest columns that still fit every drop lane inside the grid
    pub fn min_cols() -> u32 {
        let reach = DROP_COLUMN_OFFSETS
            .iter()
            .map(|o| o.unsigned_abs())
            .max()
            .unwrap_or(0);
        // mid = cols / 2 must satisfy mid - reach >= 0 and mid + reach <= cols - 1
        2 * reach + 1
    }

    pub fn new(cell_size: u32, field_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if field_size < cell_size {
            return Err(ConfigError::FieldTooSmall {
                field_size,
                cell_size,
            });
        }
        if field_size > MAX_FIELD_SIZE {
            return Err(ConfigError::FieldTooLarge {
                field_size,
                max: MAX_FIELD_SIZE,
            });
        }
        let cols = field_size / cell_size;
        let min = Self::min_cols();
        if cols < min {
            return Err(ConfigError::TooFewColumns { cols, min });
        }
        Ok(Self {
            cell_size,
            field_size,
            cols,
            rows: cols,
        })
    }

    /// Column the grid treats as its middle
    pub fn mid_col(&self) -> i32 {
        (self.cols / 2) as i32
    }
}

impl Settings {
    /// Validate the grid section
    pub fn grid(&self) -> Result<GridConfig, ConfigError> {
        GridConfig::new(self.cell_size, self.field_size)
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.grid()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Resolve the seed, falling back to the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
