//! Phase enums and state snapshots shared by the game loop and its host

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Session phase as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Shown, waiting for the start signal
    #[default]
    PreGame,
    /// Scrolling and accepting touches
    Playing,
    /// Player crashed; scrolling is suspended until the player recovers
    MissResolving,
    /// Time is up
    Finished,
}

/// Player animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PcPhase {
    #[default]
    Normal,
    /// Crash animation
    Damage,
    /// Recovery animation after a crash
    Return,
}

/// Wave motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WavePhase {
    /// Rising while the player keeps tapping
    Up,
    /// Falling back to the floor
    Down,
    #[default]
    Floor,
}

/// Snapshot of the player state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pc_phase: PcPhase,
    pub wave_phase: WavePhase,
    pub touchable: bool,
    /// Remaining invulnerability [frames]
    pub runup_frames: u32,
    /// Remaining rise time from the last touch [frames]
    pub up_count: u32,
    /// Player anchor in screen coordinates
    pub pc_position: Vec2,
    /// Scroll acceleration in [0, 1]
    pub scroll_factor: f32,
}

/// Snapshot of one session frame, for hosts and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub time_count: u32,
    pub scrolled_pixels: i32,
    pub live_obstacles: usize,
    pub player: PlayerState,
}
