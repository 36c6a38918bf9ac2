//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level authoring order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod modes;
pub mod state;
pub mod tick;

pub use collision::{BlockContact, Rect, classify_block_contact, nearby_obstacles, player_hitbox};
pub use modes::apply_mode_rules;
pub use state::{GameEvent, GamePhase, GameState, InputSignals, Player, PlayerMode};
pub use tick::{crash, progress_percent, reset_player, tick};
