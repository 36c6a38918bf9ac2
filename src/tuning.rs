//! Physics tuning
//!
//! Every force the simulation applies comes from here so a level pack can
//! ship its own feel as JSON. Defaults match `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    #[default]
    Normal,
    /// Lower gravity and softer impulses, for practice runs
    Floaty,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Normal => "Normal",
            TuningPreset::Floaty => "Floaty",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" | "default" => Some(TuningPreset::Normal),
            "floaty" | "practice" => Some(TuningPreset::Floaty),
            _ => None,
        }
    }
}

/// Physics parameters, all per 60 Hz tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Screen y of the ground line
    pub ground_y: f32,
    /// Edge length of one grid cell
    pub block_size: f32,
    /// Camera advance per tick
    pub scroll_speed: f32,

    // === Vertical forces ===
    pub gravity: f32,
    pub terminal_vel: f32,
    /// Cube jump velocity (scaled by gravity direction)
    pub jump_force: f32,
    pub ship_lift: f32,
    pub ship_gravity: f32,
    /// Velocity given when the ball flips polarity
    pub ball_kick: f32,
    pub ufo_jump: f32,
    pub robot_jump: f32,
    /// Extra velocity per tick while the robot boost lasts
    pub robot_boost: f32,
    pub robot_boost_ticks: u32,
    pub wave_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_y: GROUND_Y,
            block_size: BLOCK_SIZE,
            scroll_speed: SCROLL_SPEED,

            gravity: GRAVITY,
            terminal_vel: TERMINAL_VEL,
            jump_force: JUMP_FORCE,
            ship_lift: SHIP_LIFT,
            ship_gravity: SHIP_GRAVITY,
            ball_kick: BALL_KICK,
            ufo_jump: UFO_JUMP,
            robot_jump: ROBOT_JUMP,
            robot_boost: ROBOT_BOOST,
            robot_boost_ticks: ROBOT_BOOST_TICKS,
            wave_speed: WAVE_SPEED,
        }
    }
}

impl Tuning {
    /// Create tuning from a preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        let mut tuning = Self::default();
        if preset == TuningPreset::Floaty {
            tuning.gravity = 0.5;
            tuning.jump_force = -9.5;
            tuning.ship_gravity = 0.2;
            tuning.ufo_jump = -8.0;
        }
        tuning
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Result<Self> {
        TuningPreset::from_str(name)
            .map(Self::from_preset)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.block_size <= 0.0 {
            return Err(Error::InvalidTuning("block_size must be positive"));
        }
        if self.ground_y <= CEILING_Y {
            return Err(Error::InvalidTuning("ground_y must be below the ceiling"));
        }
        if self.terminal_vel <= 0.0 {
            return Err(Error::InvalidTuning("terminal_vel must be positive"));
        }
        if self.scroll_speed <= 0.0 {
            return Err(Error::InvalidTuning("scroll_speed must be positive"));
        }
        Ok(())
    }
}
