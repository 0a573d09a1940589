//! # Simulation Configuration
//!
//! Tuning values for every system, loadable from TOML. Every section has
//! defaults, so an empty document (or a missing section) yields the stock
//! behaviour.
//!
//! ```toml
//! max_frame_dt = 0.05
//!
//! [physics]
//! gravity = 1200.0
//!
//! [lighting]
//! ambient = 35
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Tile world settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World pixels per tile.
    pub tile_px: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { tile_px: 32 }
    }
}

/// Gravity and velocity limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Ceiling for downward speed in px/s.
    pub terminal_velocity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1200.0,
            terminal_velocity: 3000.0,
        }
    }
}

/// Light propagation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Floor intensity applied everywhere.
    pub ambient: u8,
    /// Attenuation per step leaving an open tile.
    pub open_decay: u8,
    /// Attenuation per step leaving a solid tile.
    pub solid_decay: u8,
    /// Tiles added around the camera view for the light grid.
    pub grid_margin: i32,
    /// Tiles added around the camera view by the tile renderer.
    pub render_margin: i32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 40,
            open_decay: 12,
            solid_decay: 18,
            grid_margin: 4,
            render_margin: 2,
        }
    }
}

/// Player controller settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Speed multiplier while sprint is held.
    pub sprint_multiplier: f32,
    /// Exponential smoothing rate for horizontal velocity, per second.
    pub smoothing_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprint_multiplier: 1.6,
            smoothing_rate: 18.0,
        }
    }
}

/// Camera settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Exponential follow rate, per second.
    pub follow_rate: f32,
    /// Smallest zoom factor.
    pub zoom_min: f32,
    /// Largest zoom factor.
    pub zoom_max: f32,
    /// Viewport width in screen pixels.
    pub viewport_width: f32,
    /// Viewport height in screen pixels.
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_rate: 6.0,
            zoom_min: 0.35,
            zoom_max: 4.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Largest frame delta a single tick will simulate, in seconds.
    pub max_frame_dt: f32,
    /// Tile world.
    pub world: WorldConfig,
    /// Physics.
    pub physics: PhysicsConfig,
    /// Lighting.
    pub lighting: LightingConfig,
    /// Player controller.
    pub player: PlayerConfig,
    /// Camera.
    pub camera: CameraConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_frame_dt: 0.05,
            world: WorldConfig::default(),
            physics: PhysicsConfig::default(),
            lighting: LightingConfig::default(),
            player: PlayerConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`SimulationConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Serialises the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a float is not representable in TOML (NaN is).
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.world.tile_px <= 0 {
            return Err(ConfigError::invalid("world.tile_px", "must be positive"));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(ConfigError::invalid(
                "max_frame_dt",
                format!("must be a positive number of seconds, got {}", self.max_frame_dt),
            ));
        }
        if !(self.physics.gravity.is_finite() && self.physics.gravity >= 0.0) {
            return Err(ConfigError::invalid("physics.gravity", "must be finite and non-negative"));
        }
        if !(self.physics.terminal_velocity.is_finite() && self.physics.terminal_velocity > 0.0) {
            return Err(ConfigError::invalid(
                "physics.terminal_velocity",
                "must be finite and positive",
            ));
        }
        if self.lighting.open_decay == 0 {
            return Err(ConfigError::invalid("lighting.open_decay", "must be non-zero"));
        }
        if self.lighting.solid_decay == 0 {
            return Err(ConfigError::invalid("lighting.solid_decay", "must be non-zero"));
        }
        if self.lighting.grid_margin < 0 {
            return Err(ConfigError::invalid("lighting.grid_margin", "must be non-negative"));
        }
        if self.lighting.render_margin < 0 {
            return Err(ConfigError::invalid("lighting.render_margin", "must be non-negative"));
        }
        if !(self.player.sprint_multiplier.is_finite() && self.player.sprint_multiplier > 0.0) {
            return Err(ConfigError::invalid("player.sprint_multiplier", "must be positive"));
        }
        if !(self.player.smoothing_rate.is_finite() && self.player.smoothing_rate >= 0.0) {
            return Err(ConfigError::invalid("player.smoothing_rate", "must be non-negative"));
        }
        if !(self.camera.follow_rate.is_finite() && self.camera.follow_rate >= 0.0) {
            return Err(ConfigError::invalid("camera.follow_rate", "must be non-negative"));
        }
        if !(self.camera.zoom_min > 0.0 && self.camera.zoom_min <= self.camera.zoom_max) {
            return Err(ConfigError::invalid(
                "camera.zoom_min",
                format!(
                    "zoom clamp {}..{} must be positive and ordered",
                    self.camera.zoom_min, self.camera.zoom_max
                ),
            ));
        }
        Ok(())
    }
}
