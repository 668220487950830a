//! Wave Rider - a side-scrolling surfing arcade minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, obstacles, wave physics, game loop)
//! - `settings`: Launch parameters and difficulty tiers
//! - `audio`: Sound effect identifiers emitted by the simulation
//! - `error`: Errors raised while loading external data

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::LoadError;
pub use settings::{DebugFlags, DifficultyParameters, GameConfig, LaunchParameters};

/// Game configuration constants
pub mod consts {
    use crate::sim::Rect;

    /// Fixed simulation rate (frames per second)
    pub const FPS: u32 = 30;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 360;
    /// X offset introduced when the layout was widened from 480 to 640
    pub const OFFSET_X: f32 = ((640 - 480) / 2) as f32;

    /// Time limit [s]
    pub const GAME_TIME: u32 = 60;
    /// Longest time limit this game accepts [s]
    pub const GAME_TIME_MAX: u32 = 99;
    /// Remaining-time warning starts below this many seconds
    pub const CAUTION_TIME_CONDITION: u32 = 6;

    /// Digits of the distance display
    pub const GAME_SCORE_DIGIT: u32 = 5;
    /// Largest displayable score
    pub const SCORE_LIMIT: u32 = 10u32.pow(GAME_SCORE_DIGIT) - 1;

    /// Surfing layer (player, wave, water plane) origin
    pub const SURFING_X: f32 = 0.0;
    pub const SURFING_Y: f32 = 0.0;
    /// Wave bone the player is attached to
    pub const PC_PIVOT_NAME: &str = "pc_null";

    /// Invulnerability after recovering from a miss [frames]
    pub const RUNUP_FRAMES: u32 = 60;
    /// Rising time granted per touch [frames]
    pub const UP_FRAMES_PER_TOUCH: u32 = 8;
    /// Touch lockout after an accepted touch [frames]
    pub const TOUCH_COOLING_FRAMES: u32 = 1;
    /// Playback speed of the rising wave clip
    pub const PLAYSPEED_UP: f32 = 1.0;
    /// Playback speed of the falling wave clip
    pub const PLAYSPEED_DOWN: f32 = 1.5;

    /// Scroll speed [px/frame] numerator
    pub const SCROLL_PX_PER_FRAME_NUM: i64 = 30 * 160 * 2;
    /// Scroll speed [px/frame] denominator
    pub const SCROLL_PX_PER_FRAME_DENOM: i64 = 60 * 30;
    /// Meters per scrolled pixel numerator
    pub const SCROLL_METER_PER_PX_NUM: i64 = 1;
    /// Meters per scrolled pixel denominator
    pub const SCROLL_METER_PER_PX_DENOM: i64 = 1;
    /// Top speed as a multiple of the base speed
    pub const SCROLL_FACTOR_MAX: i64 = 2;
    /// Forward overhang of the player at top speed [px]
    pub const PC_OVERHANG_MAX: f32 = 60.0;

    /// Obstacles spawn this far right of the screen edge [px]
    pub const OBSTACLE_APPEAR_AREA_WIDTH: i32 = 480;
    /// Obstacles vanish this far left of the screen edge [px]
    pub const OBSTACLE_WIDTH_TO_VANISH_AREA: i32 = 480;

    /// Screen x at which a waiting pteranodon starts its dive
    pub const PTERANODON_WAKE_X: f32 = 534.0 + OFFSET_X;
    /// Pteranodon bone carrying its hitbox
    pub const PTERANODON_PIVOT_NAME: &str = "obstacle_pteranodon_01_1";

    /// Player hitbox, relative to the player anchor
    pub const COLLISION_PC: Rect = Rect::new(-9.0 + 3.0, -44.0, 18.0 - 8.0, 44.0 - 9.0);
    pub const COLLISIONS_GULL: &[Rect] = &[Rect::new(16.0, -50.0, 44.0, 18.0)];
    pub const COLLISIONS_ROCK: &[Rect] = &[Rect::new(14.0, -295.0, 63.0, 295.0)];
    pub const COLLISIONS_SHARK: &[Rect] = &[
        Rect::new(34.0, -74.0, 147.0, 54.0),
        Rect::new(96.0, -104.0, 28.0, 84.0),
    ];
    pub const COLLISIONS_PTERANODON: &[Rect] = &[Rect::new(12.0, -45.0, 64.0, 23.0)];

    /// Landmark parallax rate relative to obstacles
    pub const LANDMARK_SCROLL_RATE: f32 = 0.35;
    /// Bottom edge of landmark sprites
    pub const LANDMARK_BOTTOM_Y: f32 = 360.0;

    /// Map end; the non-competitive mode loops past this point
    pub const MAP_END_PIXEL: i32 = 30630 + 88 + 640;
    /// Scroll position after a map loop
    pub const MAP_REPEATED_START_PIXEL: i32 = -1500;
}

/// Convert seconds to simulation frames
#[inline]
pub fn sec_to_frames(seconds: u32) -> u32 {
    seconds * consts::FPS
}
