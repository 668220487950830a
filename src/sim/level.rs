//! Level data: obstacle placements read from Tiled map JSON
//!
//! Every `objectgroup` layer contributes its objects. Layer offsets are only
//! applied when both `offsetx` and `offsety` are present, since the editor
//! omits zero offsets. Objects with an unrecognized type are skipped.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;

use super::placement::{LandmarkPlacement, ObstacleKind, ObstaclePlacement};
use crate::consts::MAP_END_PIXEL;
use crate::error::{LoadError, read_file};

const LAYER_TYPE_OBJECTS: &str = "objectgroup";

#[derive(Debug, Deserialize)]
struct TiledMap {
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    #[serde(rename = "type")]
    layer_type: String,
    offsetx: Option<f32>,
    offsety: Option<f32>,
    #[serde(default)]
    objects: Vec<TiledObject>,
}

#[derive(Debug, Deserialize)]
struct TiledObject {
    #[serde(rename = "type", alias = "class", default)]
    object_type: String,
    x: f32,
    y: f32,
}

/// Placement tables of one course
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub obstacles: Vec<ObstaclePlacement>,
    pub landmarks: Vec<LandmarkPlacement>,
}

impl Level {
    /// Parse a Tiled map; landmarks come from the standard course
    pub fn from_tiled_json(json: &str) -> Result<Self, LoadError> {
        let map: TiledMap =
            serde_json::from_str(json).map_err(|e| LoadError::json("level map", e))?;

        let mut obstacles = Vec::new();
        let mut skipped = 0usize;
        for layer in map
            .layers
            .iter()
            .filter(|l| l.layer_type == LAYER_TYPE_OBJECTS)
        {
            let (dx, dy) = match (layer.offsetx, layer.offsety) {
                (Some(dx), Some(dy)) => (dx, dy),
                _ => (0.0, 0.0),
            };
            for object in &layer.objects {
                match ObstacleKind::from_tag(&object.object_type) {
                    Some(kind) => obstacles.push(ObstaclePlacement {
                        kind,
                        x: object.x + dx,
                        y: object.y + dy,
                    }),
                    None => {
                        log::warn!(
                            "Skipping map object of unknown type '{}' at ({}, {})",
                            object.object_type,
                            object.x,
                            object.y
                        );
                        skipped += 1;
                    }
                }
            }
        }
        log::debug!(
            "Parsed {} obstacles ({} skipped)",
            obstacles.len(),
            skipped
        );

        Ok(Self {
            obstacles,
            landmarks: LandmarkPlacement::standard_course(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let level = Self::from_tiled_json(&read_file(path)?)?;
        log::info!(
            "Loaded level {} with {} obstacles",
            path.display(),
            level.obstacles.len()
        );
        Ok(level)
    }

    /// Seeded course for running without map data
    pub fn demo(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut obstacles = Vec::new();
        let mut x = 600.0f32;
        while x < MAP_END_PIXEL as f32 {
            let kind = match rng.random_range(0..10) {
                0..=2 => ObstacleKind::Gull,
                3..=5 => ObstacleKind::Rock,
                6..=8 => ObstacleKind::Shark,
                _ => ObstacleKind::Pteranodon,
            };
            let y = match kind {
                ObstacleKind::Gull => rng.random_range(140.0..170.0),
                ObstacleKind::Rock => rng.random_range(480.0..520.0),
                ObstacleKind::Shark => rng.random_range(330.0..360.0),
                ObstacleKind::Pteranodon => rng.random_range(200.0..260.0),
            };
            obstacles.push(ObstaclePlacement { kind, x, y });
            x += rng.random_range(300.0..700.0);
        }
        log::info!("Generated demo level with {} obstacles", obstacles.len());

        Self {
            obstacles,
            landmarks: LandmarkPlacement::standard_course(),
        }
    }
}
