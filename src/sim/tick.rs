//! Fixed timestep simulation tick
//!
//! Advances the player by one step: scroll, mode rule, clamp, integrate,
//! bounds, obstacle contacts, completion.

use super::collision::{BlockContact, Rect, classify_block_contact, nearby_obstacles, player_hitbox};
use super::modes::apply_mode_rules;
use super::state::{GameEvent, GameState, InputSignals, Player, PlayerMode};
use crate::consts::CEILING_Y;
use crate::level::{Obstacle, ObstacleKind};
use crate::snap_to_right_angle;

/// Advance the game state by one fixed timestep.
///
/// Does nothing outside Playing or while the player is dead (waiting for the
/// reset timer).
pub fn tick(state: &mut GameState, input: &mut InputSignals) {
    if !state.is_playing() || state.player.dead {
        return;
    }

    state.time_ticks += 1;
    let tuning = state.tuning;

    state.camera_x += tuning.scroll_speed;

    let player = &mut state.player;
    apply_mode_rules(player, input, &tuning);

    player.vel_y = player.vel_y.clamp(-tuning.terminal_vel, tuning.terminal_vel);
    player.pos.y += player.vel_y;

    player.on_ground = false;
    resolve_bounds(state);
    resolve_obstacles(state);

    if state.camera_x > state.level_length {
        log::info!(
            "Level {} complete after {} attempts",
            state.level_index,
            state.attempts
        );
        state.exit_to_menu();
        state.events.push(GameEvent::LevelComplete);
    }
}

/// Floor and ceiling handling, per mode
fn resolve_bounds(state: &mut GameState) {
    let ground_y = state.tuning.ground_y;
    let player = &mut state.player;

    match player.mode {
        PlayerMode::Ship => {
            if player.top() < CEILING_Y {
                player.pos.y = CEILING_Y;
                player.vel_y = 0.0;
            }
            if player.bottom() > ground_y {
                player.pos.y = ground_y - player.size.y;
                player.vel_y = 0.0;
                player.rotation = 0.0;
            }
        }
        PlayerMode::Wave => {
            if player.top() < CEILING_Y || player.bottom() > ground_y {
                crash(state);
            }
        }
        _ => {
            if !player.gravity_flipped() && player.bottom() >= ground_y {
                player.pos.y = ground_y - player.size.y;
                land(player);
            } else if player.gravity_flipped() && player.top() <= CEILING_Y {
                player.pos.y = CEILING_Y;
                land(player);
            }
        }
    }
}

fn land(player: &mut Player) {
    player.vel_y = 0.0;
    player.on_ground = true;
    if player.mode.snaps_on_landing() {
        player.rotation = snap_to_right_angle(player.rotation);
    }
}

fn resolve_obstacles(state: &mut GameState) {
    // One hitbox per tick, taken before any block pushes the player around
    let hitbox = player_hitbox(&state.player, state.camera_x);
    let touching: Vec<Obstacle> = nearby_obstacles(&state.obstacles, state.camera_x)
        .filter(|o| hitbox.overlaps(&Rect::from(*o)))
        .cloned()
        .collect();

    for obstacle in &touching {
        match obstacle.kind {
            ObstacleKind::Spike => crash(state),
            ObstacleKind::Portal(mode) => enter_portal(state, mode),
            ObstacleKind::Block => resolve_block(state, obstacle),
        }
    }
}

fn enter_portal(state: &mut GameState, mode: PlayerMode) {
    if state.player.mode != mode {
        log::debug!("Mode {} -> {}", state.player.mode, mode);
        state.events.push(GameEvent::ModeChanged(mode));
    }
    state.player.set_mode(mode);
}

fn resolve_block(state: &mut GameState, block: &Obstacle) {
    // Wave has no landing: any block is fatal
    if state.player.mode == PlayerMode::Wave {
        crash(state);
        return;
    }

    let player = &mut state.player;
    let prev_y = player.pos.y - player.vel_y;
    let flipped = player.gravity_flipped();

    match classify_block_contact(prev_y, player.vel_y, player.size.y, block, flipped) {
        BlockContact::Landing => {
            player.pos.y = if flipped {
                block.bottom()
            } else {
                block.top() - player.size.y
            };
            land(player);
        }
        BlockContact::HeadHit => {
            player.pos.y = block.bottom();
            player.vel_y = 0.0;
        }
        BlockContact::Side => crash(state),
    }
}

/// Kill the player. Repeated calls before the reset are no-ops.
///
/// Only marks the death and raises events; the scheduler owns the delayed
/// flash clear and reset.
pub fn crash(state: &mut GameState) {
    if state.player.dead {
        return;
    }
    state.player.dead = true;
    state.attempts += 1;
    log::debug!(
        "Crash at camera {:.1} in {} mode (attempt {})",
        state.camera_x,
        state.player.mode,
        state.attempts
    );
    state.events.push(GameEvent::AttemptsChanged(state.attempts));
    state.events.push(GameEvent::CrashFlash { active: true });
    state.events.push(GameEvent::Crashed);
}

/// Put the player back at the level start. Obstacles, level index and the
/// attempt counter are untouched.
pub fn reset_player(state: &mut GameState) {
    state.player = Player::spawn(state.tuning.ground_y);
    state.camera_x = 0.0;
    state.events.push(GameEvent::ModeChanged(PlayerMode::Cube));
    state.events.push(GameEvent::CrashFlash { active: false });
    state.events.push(GameEvent::PlayerReset);
}

/// Level progress for the HUD, clamped to [0, 100].
/// A level without length counts as complete.
pub fn progress_percent(state: &GameState) -> f32 {
    if state.level_length <= 0.0 {
        return 100.0;
    }
    (state.camera_x / state.level_length * 100.0).clamp(0.0, 100.0)
}
