//! Levels and the obstacle loader
//!
//! Levels are authored on a grid: `x` counts blocks from the start, `y`
//! counts blocks up from the ground, `t` is the numeric type tag. Loading
//! converts each descriptor to a world-space `Obstacle`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_END_MARGIN;
use crate::error::{Error, Result};
use crate::grid_to_world;
use crate::sim::PlayerMode;
use crate::tuning::Tuning;

/// Obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Solid: land on top, bump from below, die on the side
    Block,
    /// Hazard: instant death
    Spike,
    /// Switches the player's mode
    Portal(PlayerMode),
}

impl ObstacleKind {
    /// Decode an authoring tag (1=Block, 2=Spike, 3..=8 portals)
    pub fn from_tag(tag: u8) -> Option<Self> {
        let kind = match tag {
            1 => ObstacleKind::Block,
            2 => ObstacleKind::Spike,
            3 => ObstacleKind::Portal(PlayerMode::Ship),
            4 => ObstacleKind::Portal(PlayerMode::Cube),
            5 => ObstacleKind::Portal(PlayerMode::Ball),
            6 => ObstacleKind::Portal(PlayerMode::Ufo),
            7 => ObstacleKind::Portal(PlayerMode::Wave),
            8 => ObstacleKind::Portal(PlayerMode::Robot),
            _ => return None,
        };
        Some(kind)
    }

    pub fn tag(&self) -> u8 {
        match self {
            ObstacleKind::Block => 1,
            ObstacleKind::Spike => 2,
            ObstacleKind::Portal(PlayerMode::Ship) => 3,
            ObstacleKind::Portal(PlayerMode::Cube) => 4,
            ObstacleKind::Portal(PlayerMode::Ball) => 5,
            ObstacleKind::Portal(PlayerMode::Ufo) => 6,
            ObstacleKind::Portal(PlayerMode::Wave) => 7,
            ObstacleKind::Portal(PlayerMode::Robot) => 8,
        }
    }
}

/// Obstacle as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObstacle {
    pub x: i32,
    pub y: i32,
    pub t: u8,
}

impl RawObstacle {
    pub const fn new(x: i32, y: i32, t: u8) -> Self {
        Self { x, y, t }
    }
}

/// An obstacle in world space (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A loaded level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub obstacles: Vec<Obstacle>,
    /// `None` when there are no obstacles
    pub length: Option<f32>,
}

impl Level {
    /// Convert authored descriptors into world-space obstacles.
    ///
    /// Fails on the first unknown type tag.
    pub fn from_descriptors(name: &str, raw: &[RawObstacle], tuning: &Tuning) -> Result<Self> {
        let size = Vec2::splat(tuning.block_size);
        let obstacles = raw
            .iter()
            .enumerate()
            .map(|(position, r)| -> Result<Obstacle> {
                let kind = ObstacleKind::from_tag(r.t)
                    .ok_or(Error::UnknownObstacleTag { tag: r.t, position })?;
                Ok(Obstacle {
                    pos: grid_to_world(r.x, r.y, tuning.block_size, tuning.ground_y),
                    size,
                    kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let length = obstacles.last().map(|o| o.pos.x + LEVEL_END_MARGIN);

        Ok(Self {
            name: name.to_string(),
            obstacles,
            length,
        })
    }
}

/// Authored level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub objects: Vec<RawObstacle>,
}

/// Ordered collection of authored levels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelDef>,
}

impl LevelSet {
    /// The four levels that ship with the game
    pub fn builtin() -> Self {
        let def = |name: &str, objects: &[RawObstacle]| LevelDef {
            name: name.to_string(),
            objects: objects.to_vec(),
        };
        Self {
            levels: vec![
                def("Stereo Madness", STEREO_MADNESS),
                def("Back on Track", BACK_ON_TRACK),
                def("Polargeist", POLARGEIST),
                def("Dry Out", DRY_OUT),
            ],
        }
    }

    /// Parse a level pack. Tags are validated here so a bad pack is
    /// rejected before anyone plays it.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: LevelSet = serde_json::from_str(json)?;
        for level in &set.levels {
            if let Some((position, bad)) = level
                .objects
                .iter()
                .enumerate()
                .find(|(_, r)| ObstacleKind::from_tag(r.t).is_none())
            {
                return Err(Error::UnknownObstacleTag { tag: bad.t, position });
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Load level `index` into world space
    pub fn load(&self, index: usize, tuning: &Tuning) -> Result<Level> {
        let def = self.levels.get(index).ok_or(Error::LevelOutOfRange {
            index,
            count: self.levels.len(),
        })?;
        let level = Level::from_descriptors(&def.name, &def.objects, tuning)?;
        log::debug!("Loaded level {} '{}'", index, level.name);
        Ok(level)
    }
}

const fn o(x: i32, y: i32, t: u8) -> RawObstacle {
    RawObstacle::new(x, y, t)
}

#[rustfmt::skip]
const STEREO_MADNESS: &[RawObstacle] = &[
    o(10, 0, 2), o(20, 0, 1), o(25, 0, 2),
    o(35, 0, 1), o(36, 0, 1), o(42, 0, 2), o(43, 0, 2),
    o(55, 2, 3),
    o(65, 3, 1), o(75, 6, 1), o(85, 3, 1),
    o(100, 0, 4),
    o(110, 0, 2), o(111, 0, 2), o(112, 0, 2),
];

// Opening spikes sit far enough back that the spawn is survivable
#[rustfmt::skip]
const BACK_ON_TRACK: &[RawObstacle] = &[
    o(15, 0, 2), o(25, 1, 1), o(28, 2, 1), o(31, 3, 1),
    o(40, 0, 2), o(41, 0, 2),
    o(50, 2, 3),
    o(60, 1, 1), o(60, 8, 1),
    o(70, 2, 1), o(70, 7, 1),
    o(90, 0, 4),
    o(100, 0, 1), o(105, 0, 2), o(110, 0, 1),
];

#[rustfmt::skip]
const POLARGEIST: &[RawObstacle] = &[
    o(10, 0, 2), o(11, 0, 2), o(12, 0, 2),
    o(25, 2, 3),
    o(40, 4, 1), o(50, 2, 1), o(60, 6, 1),
    o(80, 0, 4),
    o(90, 0, 2), o(95, 1, 2), o(100, 0, 2),
];

// Every mode in one run
#[rustfmt::skip]
const DRY_OUT: &[RawObstacle] = &[
    o(10, 0, 1), o(15, 0, 2),
    o(25, 1, 5),
    o(40, 0, 2), o(50, 4, 2),
    o(65, 2, 6),
    o(80, 0, 2), o(85, 2, 2), o(90, 0, 2),
    o(105, 2, 7),
    o(115, 1, 1), o(125, 7, 1),
    o(140, 0, 8),
    o(150, 0, 1), o(155, 1, 1), o(160, 3, 1),
];
