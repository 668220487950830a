//! Sound effect identifiers
//!
//! The simulation only requests sounds; playback belongs to the host.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Accepted tap on the screen
    Tap,
    /// Player crashed into an obstacle
    Miss,
    /// Collision with a gull
    Gull,
    /// Collision with a shark
    Shark,
    /// Collision with a pteranodon
    Pteranodon,
}

impl SoundEffect {
    /// Asset name of the sound
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Tap => "se_wave_tap",
            SoundEffect::Miss => "se_No4_Miss",
            SoundEffect::Gull => "se_comedy10",
            SoundEffect::Shark => "se_character16",
            SoundEffect::Pteranodon => "se_character03",
        }
    }
}

/// Background music played during the title and the game
pub const BGM_NAME: &str = "bgm_nico_wave";
