//! Launch parameters and difficulty tiers
//!
//! Both arrive as JSON from the host. Every launch parameter is optional;
//! [`GameConfig::resolve`] fills the gaps and applies the competitive-mode
//! rules.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{GAME_TIME, GAME_TIME_MAX};
use crate::error::{LoadError, read_file};
use crate::sim::MapLoop;

/// Lowest accepted difficulty
pub const DIFFICULTY_MIN: f64 = 1.0;
/// Highest accepted difficulty
pub const DIFFICULTY_MAX: f64 = 10.0;

/// Time limit as given by the host: seconds, or `false` for the maximum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeLimit {
    Seconds(f64),
    Flag(bool),
}

/// Parameters passed in by the host at launch
///
/// A field holding a value of the wrong type is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaunchParameters {
    /// Competitive ("nicowari") mode; absent means true
    #[serde(deserialize_with = "lenient")]
    pub nicowari: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub game_time_limit: Option<TimeLimit>,
    /// Difficulty (clamped to 1..=10)
    #[serde(deserialize_with = "lenient")]
    pub difficulty: Option<f64>,
    /// Map start offset, used when no difficulty is given [px]
    #[serde(deserialize_with = "lenient")]
    pub start_pixel: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub random_seed: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub mute_audio: Option<bool>,
}

/// Read any JSON value, keeping it only when it has the expected type
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            if !value.is_null() {
                log::warn!("Ignoring launch parameter value {value}: {err}");
            }
            Ok(None)
        }
    }
}

impl LaunchParameters {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::json("launch parameters", e))
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let params = Self::from_json(&read_file(path)?)?;
        log::info!("Loaded launch parameters from {}", path.display());
        Ok(params)
    }

    /// Competitive mode ignores every other parameter
    pub fn is_competitive(&self) -> bool {
        self.nicowari.unwrap_or(true)
    }
}

/// One difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyTier {
    /// Lowest difficulty this tier applies to
    pub minimum_difficulty: f64,
    /// Map start offset [px]
    pub start_pixel: i32,
}

/// Difficulty tiers, ordered by ascending `minimum_difficulty`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyParameters {
    #[serde(default)]
    pub difficulty_parameter_list: Vec<DifficultyTier>,
}

impl DifficultyParameters {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::json("difficulty parameters", e))
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let params = Self::from_json(&read_file(path)?)?;
        log::info!(
            "Loaded {} difficulty tiers from {}",
            params.difficulty_parameter_list.len(),
            path.display()
        );
        Ok(params)
    }

    /// Start offset for `difficulty`
    ///
    /// Picks the last tier whose threshold is at or below the difficulty,
    /// falling back to the first tier. An empty list yields 0.
    pub fn start_pixel_for(&self, difficulty: f64) -> i32 {
        let tiers = &self.difficulty_parameter_list;
        tiers
            .iter()
            .rev()
            .find(|tier| tier.minimum_difficulty <= difficulty)
            .or_else(|| tiers.first())
            .map_or(0, |tier| tier.start_pixel)
    }
}

/// Development switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFlags {
    /// Collision checks always report no hit
    pub collision_disabled: bool,
    /// Holding the touch keeps the wave rising
    pub hold_to_up: bool,
}

/// Fully resolved session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub competitive: bool,
    /// Scroll position at the start of a session [px]
    pub start_pixel: i32,
    /// Play time [s]
    pub time_limit: u32,
    pub mute_audio: bool,
    pub random_seed: Option<u64>,
    pub debug: DebugFlags,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            competitive: true,
            start_pixel: 0,
            time_limit: GAME_TIME,
            mute_audio: false,
            random_seed: None,
            debug: DebugFlags::default(),
        }
    }
}

impl GameConfig {
    /// Apply launch parameters and difficulty tiers
    pub fn resolve(
        params: &LaunchParameters,
        difficulty: &DifficultyParameters,
        debug: DebugFlags,
    ) -> Self {
        let mut config = Self {
            debug,
            ..Self::default()
        };
        if params.is_competitive() {
            log::info!("Competitive mode: launch parameters ignored");
            return config;
        }
        config.competitive = false;

        config.time_limit = match params.game_time_limit {
            // Fractions truncate; negative values saturate to zero
            Some(TimeLimit::Seconds(secs)) => (secs as u32).min(GAME_TIME_MAX),
            Some(TimeLimit::Flag(_)) => GAME_TIME_MAX,
            None => GAME_TIME,
        };
        config.start_pixel = match params.difficulty {
            Some(d) => {
                let d = d.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);
                let start = difficulty.start_pixel_for(d);
                log::info!("Difficulty {d} selects start pixel {start}");
                start
            }
            None => params.start_pixel.map_or(0, |px| px as i32),
        };
        config.mute_audio = params.mute_audio.unwrap_or(false);
        config.random_seed = params.random_seed;
        config
    }

    /// Map looping applies outside competitive mode only
    pub fn map_loop(&self) -> Option<MapLoop> {
        if self.competitive {
            None
        } else {
            Some(MapLoop::default())
        }
    }
}
