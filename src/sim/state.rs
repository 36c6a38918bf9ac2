//! Game state and core simulation types
//!
//! Everything the physics step reads or writes lives here. The host never
//! mutates these directly during play; it goes through `Session`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::{Level, Obstacle};
use crate::tuning::Tuning;

/// Top-level phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Not simulating; waiting for a level start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
}

/// Player movement mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayerMode {
    #[default]
    Cube,
    Ship,
    Ball,
    Ufo,
    Wave,
    Robot,
}

impl PlayerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerMode::Cube => "CUBE",
            PlayerMode::Ship => "SHIP",
            PlayerMode::Ball => "BALL",
            PlayerMode::Ufo => "UFO",
            PlayerMode::Wave => "WAVE",
            PlayerMode::Robot => "ROBOT",
        }
    }

    /// Modes whose rotation snaps upright on landing
    pub fn snaps_on_landing(&self) -> bool {
        matches!(self, PlayerMode::Cube | PlayerMode::Robot)
    }
}

impl std::fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The player shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Screen x is fixed; y is the top edge in screen space (down is positive)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per tick, positive is downward)
    pub vel_y: f32,
    /// Degrees
    pub rotation: f32,
    pub mode: PlayerMode,
    pub on_ground: bool,
    /// +1 or -1; only Ball ever flips it
    pub gravity_scale: f32,
    /// Ticks of robot boost left in the current jump
    pub robot_boost_ticks: u32,
    pub dead: bool,
}

impl Player {
    /// Player standing on the ground at the level start
    pub fn spawn(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_SCREEN_X, ground_y - PLAYER_SIZE),
            size: Vec2::splat(PLAYER_SIZE),
            vel_y: 0.0,
            rotation: 0.0,
            mode: PlayerMode::Cube,
            on_ground: true,
            gravity_scale: 1.0,
            robot_boost_ticks: 0,
            dead: false,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn gravity_flipped(&self) -> bool {
        self.gravity_scale < 0.0
    }

    /// Switch mode; any mode change cancels a ball flip and a robot boost
    pub fn set_mode(&mut self, mode: PlayerMode) {
        self.mode = mode;
        self.gravity_scale = 1.0;
        self.robot_boost_ticks = 0;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn(GROUND_Y)
    }
}

/// Input signals delivered by the host's input conditioner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSignals {
    /// Primary input is held down (never cleared by the simulation)
    pub hold: bool,
    /// One-shot edge set on press, consumed by Ball and UFO
    pub jump_pressed: bool,
    /// UFO debounce latch: one press yields one impulse until released
    pub click_processed: bool,
}

impl InputSignals {
    /// Input-down edge
    pub fn press(&mut self) {
        self.hold = true;
        self.jump_pressed = true;
        self.click_processed = false;
    }

    /// Input-up edge
    pub fn release(&mut self) {
        self.hold = false;
        self.jump_pressed = false;
    }

    /// Take the pending press, if any
    pub fn consume_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_pressed)
    }
}

/// Notifications for the HUD/menu collaborator (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { index: usize },
    ModeChanged(PlayerMode),
    AttemptsChanged(u32),
    /// Player died this tick; the scheduler queues the reset timers
    Crashed,
    CrashFlash { active: bool },
    PlayerReset,
    LevelComplete,
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub level_index: usize,
    /// World x of the screen's left edge
    pub camera_x: f32,
    /// Starts at 1 on level start, +1 per crash
    pub attempts: u32,
    pub obstacles: Vec<Obstacle>,
    pub level_length: f32,
    pub player: Player,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            level_index: 0,
            camera_x: 0.0,
            attempts: 1,
            obstacles: Vec::new(),
            level_length: 0.0,
            player: Player::spawn(tuning.ground_y),
            tuning,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Install a loaded level and enter Playing with a fresh player.
    ///
    /// An empty level keeps the previous level length.
    pub fn start_level(&mut self, index: usize, level: Level) {
        self.level_index = index;
        self.attempts = 1;
        self.obstacles = level.obstacles;
        if let Some(length) = level.length {
            self.level_length = length;
        }
        self.phase = GamePhase::Playing;
        log::info!(
            "Level {} started: {} obstacles, length {}",
            index,
            self.obstacles.len(),
            self.level_length
        );
        self.events.push(GameEvent::LevelStarted { index });
        self.events.push(GameEvent::AttemptsChanged(self.attempts));
        super::tick::reset_player(self);
    }

    /// Leave Playing (level complete or host request)
    pub fn exit_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
