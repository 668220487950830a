//! Level placement tables and their activation cursors
//!
//! A placement table is sorted by x once when the level loads. Activation is
//! a forward sweep: a cursor walks the table and every record left of the
//! current appear line is handed out exactly once.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Gull,
    Rock,
    Shark,
    /// Waits for the camera, then performs a scripted dive
    Pteranodon,
}

impl ObstacleKind {
    /// Map a level object type tag to an obstacle kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "enemy_01" => Some(ObstacleKind::Gull),
            "enemy_02" => Some(ObstacleKind::Rock),
            "enemy_03" => Some(ObstacleKind::Shark),
            "enemy_04" => Some(ObstacleKind::Pteranodon),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ObstacleKind::Gull => "enemy_01",
            ObstacleKind::Rock => "enemy_02",
            ObstacleKind::Shark => "enemy_03",
            ObstacleKind::Pteranodon => "enemy_04",
        }
    }

    /// Animation clip played by the obstacle
    pub fn clip_name(&self) -> &'static str {
        match self {
            ObstacleKind::Gull => "enemy_01_a",
            ObstacleKind::Rock => "enemy_02_a",
            ObstacleKind::Shark => "enemy_03_a",
            ObstacleKind::Pteranodon => "enemy_04_a",
        }
    }

    /// Hitboxes relative to the obstacle anchor
    pub fn hitboxes(&self) -> &'static [Rect] {
        match self {
            ObstacleKind::Gull => COLLISIONS_GULL,
            ObstacleKind::Rock => COLLISIONS_ROCK,
            ObstacleKind::Shark => COLLISIONS_SHARK,
            ObstacleKind::Pteranodon => COLLISIONS_PTERANODON,
        }
    }

    /// Sound played when the player hits this obstacle (rocks are silent)
    pub fn hit_sound(&self) -> Option<SoundEffect> {
        match self {
            ObstacleKind::Gull => Some(SoundEffect::Gull),
            ObstacleKind::Rock => None,
            ObstacleKind::Shark => Some(SoundEffect::Shark),
            ObstacleKind::Pteranodon => Some(SoundEffect::Pteranodon),
        }
    }
}

/// Anything that can be placed along the scroll axis
pub trait Placement {
    /// Position along the scroll axis used for activation
    fn activation_x(&self) -> f32;
}

/// Where an obstacle appears in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    pub kind: ObstacleKind,
    /// World x [px]
    pub x: f32,
    /// World y [px]
    pub y: f32,
}

impl Placement for ObstaclePlacement {
    fn activation_x(&self) -> f32 {
        self.x
    }
}

/// Where a background landmark appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPlacement {
    /// Sprite frame drawn for the landmark
    pub frame_name: String,
    /// Left edge in scroll distance [m]
    pub x: f32,
    /// Sprite size [px]
    pub width: f32,
    pub height: f32,
}

impl Placement for LandmarkPlacement {
    fn activation_x(&self) -> f32 {
        self.x
    }
}

impl LandmarkPlacement {
    pub fn new(frame_name: &str, x: f32, width: f32, height: f32) -> Self {
        Self {
            frame_name: frame_name.to_string(),
            x,
            width,
            height,
        }
    }

    /// The landmarks of the standard course
    pub fn standard_course() -> Vec<Self> {
        vec![
            Self::new("bg_obj01.png", -50.0 * 30.0, 332.0, 132.0),
            Self::new("bg_obj03.png", 80.0 * 30.0, 118.0, 164.0),
            Self::new("bg_obj02.png", 170.0 * 30.0, 124.0, 236.0),
            Self::new("bg_obj06.png", 240.0 * 30.0, 96.0, 218.0),
            Self::new("bg_obj04.png", 360.0 * 30.0, 288.0, 146.0),
            Self::new("bg_obj05.png", 480.0 * 30.0, 262.0, 120.0),
            Self::new("bg_obj07.png", 600.0 * 30.0, 300.0, 128.0),
            Self::new("bg_obj08.png", 720.0 * 30.0, 332.0, 132.0),
            Self::new("bg_obj09.png", 850.0 * 30.0, 118.0, 164.0),
        ]
    }
}

/// An immutable x-sorted placement table with a forward-only cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementIndex<T> {
    records: Vec<T>,
    cursor: usize,
}

impl<T: Placement> PlacementIndex<T> {
    /// Build the index; records with equal x keep their input order
    pub fn new(mut records: Vec<T>) -> Self {
        records.sort_by(|a, b| a.activation_x().total_cmp(&b.activation_x()));
        Self { records, cursor: 0 }
    }

    /// Activate every pending record strictly left of `appear_line`
    ///
    /// Returns the table indices activated by this call. The cursor only
    /// moves forward, so a record is handed out at most once per pass.
    pub fn sweep(&mut self, appear_line: f32) -> Range<usize> {
        let start = self.cursor;
        while self
            .records
            .get(self.cursor)
            .is_some_and(|record| record.activation_x() < appear_line)
        {
            self.cursor += 1;
        }
        start..self.cursor
    }
}

impl<T> PlacementIndex<T> {
    /// Restart the pass from the first record
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
