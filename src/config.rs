//! Engine tunables, loadable from a RON file.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```ron
//! (fov_deg: 75.0, move_speed: 4.0, shading: (falloff: 0.1))
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    renderer::{
        Rgba, Shading,
        software::{DEFAULT_GROUND, DEFAULT_SKY},
    },
    sim::{MAX_FRAME_DT, MOVE_SPEED, PlayerController, RUN_MULTIPLIER, TURN_SPEED},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Framebuffer size in pixels.
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view, degrees.
    pub fov_deg: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub run_multiplier: f32,
    pub max_frame_dt: f32,
    /// How far ahead of the eye the door probe sits.
    pub door_probe_distance: f32,
    pub door_use_radius: f32,
    pub shading: Shading,
    pub sky: Rgba,
    pub ground: Rgba,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_deg: 60.0,
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
            run_multiplier: RUN_MULTIPLIER,
            max_frame_dt: MAX_FRAME_DT,
            door_probe_distance: 0.5,
            door_use_radius: 1.2,
            shading: Shading::default(),
            sky: DEFAULT_SKY,
            ground: DEFAULT_GROUND,
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = ron::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the frame loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "framebuffer {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_deg {} not in (0, 180)",
                self.fov_deg
            )));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_dt {} must be positive",
                self.max_frame_dt
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_deg.to_radians()
    }

    pub fn controller(&self) -> PlayerController {
        PlayerController {
            move_speed: self.move_speed,
            turn_speed: self.turn_speed,
            run_multiplier: self.run_multiplier,
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
