//! Collision detection and block contact classification
//!
//! Boxes are axis aligned in world space. Block contacts are classified with
//! a tolerance band against the player's previous-tick position instead of a
//! swept test. The band and the previous-position rule define how landings
//! feel, so they must stay exactly as they are.

use glam::Vec2;

use super::state::Player;
use crate::consts::{CONTACT_TOLERANCE, HITBOX_PADDING, NEARBY_MAX, NEARBY_MIN};
use crate::level::Obstacle;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.x,
            top: pos.y,
            bottom: pos.y + size.y,
        }
    }

    /// Shrink by `padding` on every side
    pub fn inset(&self, padding: f32) -> Self {
        Self {
            left: self.left + padding,
            right: self.right - padding,
            top: self.top + padding,
            bottom: self.bottom - padding,
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

impl From<&Obstacle> for Rect {
    fn from(obstacle: &Obstacle) -> Self {
        Rect::from_pos_size(obstacle.pos, obstacle.size)
    }
}

/// Player hitbox in world space (forgiving: inset by the padding)
pub fn player_hitbox(player: &Player, camera_x: f32) -> Rect {
    let world = Vec2::new(camera_x + player.pos.x, player.pos.y);
    Rect::from_pos_size(world, player.size).inset(HITBOX_PADDING)
}

/// Broad phase: obstacles whose left edge lies inside the window around the
/// player. A linear scan; levels are small.
pub fn nearby_obstacles(obstacles: &[Obstacle], camera_x: f32) -> impl Iterator<Item = &Obstacle> {
    let min = camera_x + NEARBY_MIN;
    let max = camera_x + NEARBY_MAX;
    obstacles.iter().filter(move |o| o.pos.x > min && o.pos.x < max)
}

/// How the player met a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContact {
    /// Came down onto the block's surface (top, or bottom when inverted)
    Landing,
    /// Hit the underside while rising (normal gravity only)
    HeadHit,
    /// Anything else is fatal
    Side,
}

/// Classify a block contact from the player's previous top edge
/// (`prev_y = y - vel_y`) and current velocity.
///
/// Inverted gravity has no head-hit case: it either lands or dies.
pub fn classify_block_contact(
    prev_y: f32,
    vel_y: f32,
    player_height: f32,
    block: &Obstacle,
    gravity_flipped: bool,
) -> BlockContact {
    if !gravity_flipped {
        if prev_y + player_height <= block.top() + CONTACT_TOLERANCE && vel_y >= 0.0 {
            BlockContact::Landing
        } else if prev_y >= block.bottom() - CONTACT_TOLERANCE && vel_y < 0.0 {
            BlockContact::HeadHit
        } else {
            BlockContact::Side
        }
    } else if prev_y >= block.bottom() - CONTACT_TOLERANCE && vel_y <= 0.0 {
        BlockContact::Landing
    } else {
        BlockContact::Side
    }
}
