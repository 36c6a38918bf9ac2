//! Pulse Dash - A side-scrolling reflex platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player modes, physics, collisions, game state)
//! - `level`: Level descriptors and the loader that turns them into obstacles
//! - `scheduler`: Fixed timestep accumulator and tick-based timers
//! - `session`: Simulation context owned by the host loop
//! - `tuning`: Data-driven physics parameters

pub mod error;
pub mod level;
pub mod scheduler;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use level::{Level, LevelSet, Obstacle, ObstacleKind, RawObstacle};
pub use session::{FrameOutcome, FrameSnapshot, Presenter, Session};
pub use tuning::Tuning;

/// Game configuration constants (all per-tick values are tuned for 60 Hz)
pub mod consts {
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Largest wall-clock delta accepted per frame (tab stall / resume)
    pub const MAX_FRAME_DELTA: f64 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World layout
    pub const GROUND_Y: f32 = 380.0;
    pub const CEILING_Y: f32 = 0.0;
    pub const BLOCK_SIZE: f32 = 40.0;
    /// Trailing distance past the last obstacle before the level ends
    pub const LEVEL_END_MARGIN: f32 = 500.0;
    pub const VIEW_WIDTH: f32 = 800.0;

    /// Player defaults (screen x never changes, the camera scrolls)
    pub const PLAYER_SCREEN_X: f32 = 200.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const HITBOX_PADDING: f32 = 8.0;

    /// Forces (pixels per tick, pixels per tick²)
    pub const SCROLL_SPEED: f32 = 6.5;
    pub const GRAVITY: f32 = 0.65;
    pub const JUMP_FORCE: f32 = -10.5;
    pub const SHIP_LIFT: f32 = -0.35;
    pub const SHIP_GRAVITY: f32 = 0.25;
    pub const BALL_KICK: f32 = 2.0;
    pub const UFO_JUMP: f32 = -9.0;
    pub const ROBOT_JUMP: f32 = -8.0;
    pub const ROBOT_BOOST: f32 = -0.6;
    pub const ROBOT_BOOST_TICKS: u32 = 15;
    pub const WAVE_SPEED: f32 = 7.0;
    pub const TERMINAL_VEL: f32 = 12.0;

    /// Rotation (degrees)
    pub const SPIN_PER_TICK: f32 = 5.0;
    pub const SHIP_TILT: f32 = 2.5;
    pub const WAVE_TILT: f32 = 5.0;

    /// Block contact classification band (pixels)
    pub const CONTACT_TOLERANCE: f32 = 15.0;
    /// Broad phase window relative to the camera
    pub const NEARBY_MIN: f32 = 100.0;
    pub const NEARBY_MAX: f32 = 500.0;

    /// Crash timers (ticks at 60 Hz: 100 ms and 600 ms)
    pub const CRASH_FLASH_TICKS: u64 = 6;
    pub const CRASH_RESET_TICKS: u64 = 36;
}

/// Snap an angle in degrees to the nearest multiple of 90
#[inline]
pub fn snap_to_right_angle(degrees: f32) -> f32 {
    (degrees / 90.0).round() * 90.0
}

/// Grid cell to world position (grid y = 0 sits on the ground)
#[inline]
pub fn grid_to_world(grid_x: i32, grid_y: i32, block_size: f32, ground_y: f32) -> glam::Vec2 {
    glam::Vec2::new(
        grid_x as f32 * block_size,
        ground_y - grid_y as f32 * block_size - block_size,
    )
}
