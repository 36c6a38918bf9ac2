//! Per-mode movement rules
//!
//! Each mode answers three questions every tick: how velocity changes, how
//! the input turns into impulses, and how rotation follows. Integration,
//! the terminal velocity clamp and collisions are shared in `tick`.

use super::state::{InputSignals, Player, PlayerMode};
use crate::consts::{SHIP_TILT, SPIN_PER_TICK, WAVE_TILT};
use crate::snap_to_right_angle;
use crate::tuning::Tuning;

/// Apply the active mode's force, impulse and rotation rule to the player
pub fn apply_mode_rules(player: &mut Player, input: &mut InputSignals, tuning: &Tuning) {
    match player.mode {
        PlayerMode::Cube => cube(player, input, tuning),
        PlayerMode::Ship => ship(player, input, tuning),
        PlayerMode::Ball => ball(player, input, tuning),
        PlayerMode::Ufo => ufo(player, input, tuning),
        PlayerMode::Wave => wave(player, input, tuning),
        PlayerMode::Robot => robot(player, input, tuning),
    }
}

fn cube(player: &mut Player, input: &InputSignals, tuning: &Tuning) {
    player.vel_y += tuning.gravity * player.gravity_scale;
    if player.on_ground && input.hold {
        player.vel_y = tuning.jump_force * player.gravity_scale;
        player.on_ground = false;
    }

    if player.on_ground {
        player.rotation = snap_to_right_angle(player.rotation);
    } else {
        player.rotation += SPIN_PER_TICK * player.gravity_scale;
    }
}

fn ship(player: &mut Player, input: &InputSignals, tuning: &Tuning) {
    player.vel_y += if input.hold {
        tuning.ship_lift
    } else {
        tuning.ship_gravity
    };
    player.rotation = player.vel_y * SHIP_TILT;
}

fn ball(player: &mut Player, input: &mut InputSignals, tuning: &Tuning) {
    player.vel_y += tuning.gravity * player.gravity_scale;
    if player.on_ground && input.consume_jump() {
        player.gravity_scale = -player.gravity_scale;
        player.vel_y = tuning.ball_kick * player.gravity_scale;
        player.on_ground = false;
    }
    player.rotation += SPIN_PER_TICK * player.gravity_scale;
}

fn ufo(player: &mut Player, input: &mut InputSignals, tuning: &Tuning) {
    player.vel_y += tuning.gravity * player.gravity_scale;
    if !input.click_processed && input.consume_jump() {
        player.vel_y = tuning.ufo_jump;
        input.click_processed = true;
    }
}

// Velocity is set, not accumulated
fn wave(player: &mut Player, input: &InputSignals, tuning: &Tuning) {
    player.vel_y = if input.hold {
        -tuning.wave_speed
    } else {
        tuning.wave_speed
    };
    player.rotation = player.vel_y * WAVE_TILT;
}

fn robot(player: &mut Player, input: &InputSignals, tuning: &Tuning) {
    player.vel_y += tuning.gravity * player.gravity_scale;
    if !input.hold {
        player.robot_boost_ticks = 0;
    } else if player.on_ground {
        player.vel_y = tuning.robot_jump;
        player.on_ground = false;
        player.robot_boost_ticks = tuning.robot_boost_ticks;
    } else if player.robot_boost_ticks > 0 {
        player.vel_y += tuning.robot_boost;
        player.robot_boost_ticks -= 1;
    }
}
