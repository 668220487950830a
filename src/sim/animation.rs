//! Animation playback boundary
//!
//! The simulation only needs frame positions, clip lengths, a pause flag and
//! named bone positions from the animation system. `Animator` is that
//! boundary; `ClipPlayer` is a deterministic in-memory implementation driven
//! by a `ClipLibrary` of clip lengths and linear bone tracks.

use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PC_PIVOT_NAME, PTERANODON_PIVOT_NAME};

/// Clip names of the surfing and obstacle projects
pub mod clips {
    pub const WAVE_FLAT: &str = "wave_flat";
    pub const WAVE_RISE: &str = "wave_move_s_l";
    pub const WAVE_FALL: &str = "wave_move_l_s";
    pub const WAVE_LOWERMOST: &str = "wave_lowermost";
    pub const PC_NORMAL: &str = "pc_nomal";
    pub const PC_DAMAGE: &str = "pc_damage";
    pub const PC_RETURN: &str = "pc_return";
    pub const PC_RUNUP: &str = "pc_strongest";
}

/// Playback of one animated actor
pub trait Animator {
    /// Start `clip` at `start_frame`
    fn play(&mut self, clip: &str, start_frame: f32, looping: bool, speed: f32);
    fn clip_name(&self) -> &str;
    fn current_frame(&self) -> f32;
    /// Frames in the active clip
    fn frame_count(&self) -> u32;
    fn is_paused(&self) -> bool;
    fn set_paused(&mut self, paused: bool);
    fn set_looping(&mut self, looping: bool);
    /// Bone position relative to the actor origin
    fn bone_position(&self, bone: &str) -> Vec2;
    /// Step playback by one simulation frame
    fn advance(&mut self);

    /// Whether playback sits on the final frame of the clip
    fn is_at_last_frame(&self) -> bool {
        self.current_frame() >= self.frame_count().saturating_sub(1) as f32
    }
}

/// Creates actors and answers clip metadata queries
pub trait AnimationSource {
    fn create(&self, clip: &str) -> Box<dyn Animator>;
    fn frame_count(&self, clip: &str) -> u32;
}

/// A bone moving linearly from `from` to `to` across a clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneTrack {
    pub name: String,
    pub from: Vec2,
    pub to: Vec2,
}

/// Clip metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub frame_count: u32,
    #[serde(default)]
    pub bones: Vec<BoneTrack>,
}

impl Clip {
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            bones: Vec::new(),
        }
    }

    pub fn with_bone(mut self, name: &str, from: Vec2, to: Vec2) -> Self {
        self.bones.push(BoneTrack {
            name: name.to_string(),
            from,
            to,
        });
        self
    }

    fn bone_at(&self, bone: &str, frame: f32) -> Option<Vec2> {
        let track = self.bones.iter().find(|b| b.name == bone)?;
        let last = self.frame_count.saturating_sub(1);
        if last == 0 {
            return Some(track.from);
        }
        let t = (frame / last as f32).clamp(0.0, 1.0);
        Some(track.from.lerp(track.to, t))
    }
}

/// Named clips shared by every actor of a session
///
/// Cloning is cheap; clones share the clip table.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: Rc<HashMap<String, Clip>>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, clip: Clip) {
        Rc::make_mut(&mut self.clips).insert(name.to_string(), clip);
    }

    pub fn get(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    /// Clips of the standard surfing and obstacle projects
    pub fn standard() -> Self {
        let mut lib = Self::new();
        let floor = Vec2::new(200.0, 300.0);
        let crest = Vec2::new(200.0, 140.0);

        lib.insert(clips::WAVE_FLAT, Clip::new(30));
        lib.insert(clips::WAVE_RISE, Clip::new(31).with_bone(PC_PIVOT_NAME, floor, crest));
        lib.insert(clips::WAVE_FALL, Clip::new(31).with_bone(PC_PIVOT_NAME, crest, floor));
        lib.insert(
            clips::WAVE_LOWERMOST,
            Clip::new(30).with_bone(PC_PIVOT_NAME, floor, floor),
        );
        lib.insert(clips::PC_NORMAL, Clip::new(30));
        lib.insert(clips::PC_DAMAGE, Clip::new(20));
        lib.insert(clips::PC_RETURN, Clip::new(15));
        lib.insert(clips::PC_RUNUP, Clip::new(10));

        lib.insert("enemy_01_a", Clip::new(20));
        lib.insert("enemy_02_a", Clip::new(1));
        lib.insert("enemy_03_a", Clip::new(30));
        lib.insert(
            "enemy_04_a",
            Clip::new(40).with_bone(
                PTERANODON_PIVOT_NAME,
                Vec2::new(0.0, -180.0),
                Vec2::new(-220.0, 60.0),
            ),
        );
        lib
    }
}

impl AnimationSource for ClipLibrary {
    fn create(&self, clip: &str) -> Box<dyn Animator> {
        Box::new(ClipPlayer::new(self.clone(), clip))
    }

    fn frame_count(&self, clip: &str) -> u32 {
        self.get(clip).map_or(1, |c| c.frame_count)
    }
}

/// Deterministic frame-stepped player over a [`ClipLibrary`]
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    library: ClipLibrary,
    clip: String,
    frame: f32,
    looping: bool,
    speed: f32,
    paused: bool,
}

impl ClipPlayer {
    pub fn new(library: ClipLibrary, clip: &str) -> Self {
        if library.get(clip).is_none() {
            log::warn!("Unknown animation clip '{}', playing as a single frame", clip);
        }
        Self {
            library,
            clip: clip.to_string(),
            frame: 0.0,
            looping: true,
            speed: 1.0,
            paused: false,
        }
    }

    fn clip(&self) -> Option<&Clip> {
        self.library.get(&self.clip)
    }
}

impl Animator for ClipPlayer {
    fn play(&mut self, clip: &str, start_frame: f32, looping: bool, speed: f32) {
        if self.library.get(clip).is_none() {
            log::warn!("Unknown animation clip '{}', playing as a single frame", clip);
        }
        self.clip = clip.to_string();
        self.looping = looping;
        self.speed = speed;
        let last = self.frame_count().saturating_sub(1) as f32;
        self.frame = start_frame.clamp(0.0, last);
    }

    fn clip_name(&self) -> &str {
        &self.clip
    }

    fn current_frame(&self) -> f32 {
        self.frame
    }

    fn frame_count(&self) -> u32 {
        self.clip().map_or(1, |c| c.frame_count)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn bone_position(&self, bone: &str) -> Vec2 {
        self.clip()
            .and_then(|c| c.bone_at(bone, self.frame))
            .unwrap_or(Vec2::ZERO)
    }

    fn advance(&mut self) {
        if self.paused {
            return;
        }
        let count = self.frame_count() as f32;
        let next = self.frame + self.speed;
        self.frame = if self.looping {
            next % count
        } else {
            next.min(count - 1.0)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ClipLibrary {
        ClipLibrary::standard()
    }

    #[test]
    fn test_non_looping_clip_clamps_at_last_frame() {
        let lib = library();
        let mut actor = lib.create(clips::PC_RETURN);
        actor.play(clips::PC_RETURN, 0.0, false, 1.0);
        for _ in 0..14 {
            assert!(!actor.is_at_last_frame());
            actor.advance();
        }
        assert!(actor.is_at_last_frame());
        actor.advance();
        assert_eq!(actor.current_frame(), 14.0);
    }

    #[test]
    fn test_fractional_speed_reaches_last_frame() {
        let lib = library();
        let mut actor = lib.create(clips::WAVE_FALL);
        actor.play(clips::WAVE_FALL, 0.0, false, 1.5);
        let mut frames = 0;
        while !actor.is_at_last_frame() {
            actor.advance();
            frames += 1;
        }
        assert_eq!(frames, 20);
        assert_eq!(actor.current_frame(), 30.0);
    }

    #[test]
    fn test_looping_clip_wraps() {
        let lib = library();
        let mut actor = lib.create(clips::PC_RUNUP);
        actor.play(clips::PC_RUNUP, 8.0, true, 1.0);
        actor.advance();
        actor.advance();
        assert_eq!(actor.current_frame(), 0.0);
    }

    #[test]
    fn test_paused_actor_holds_frame() {
        let lib = library();
        let mut actor = lib.create("enemy_04_a");
        actor.set_paused(true);
        actor.advance();
        assert_eq!(actor.current_frame(), 0.0);
        actor.set_paused(false);
        actor.advance();
        assert_eq!(actor.current_frame(), 1.0);
    }

    #[test]
    fn test_bone_track_interpolates() {
        let lib = library();
        let mut wave = lib.create(clips::WAVE_RISE);
        wave.play(clips::WAVE_RISE, 0.0, false, 1.0);
        assert_eq!(wave.bone_position(PC_PIVOT_NAME), Vec2::new(200.0, 300.0));
        wave.play(clips::WAVE_RISE, 15.0, false, 1.0);
        assert_eq!(wave.bone_position(PC_PIVOT_NAME), Vec2::new(200.0, 220.0));
        assert_eq!(wave.bone_position("missing"), Vec2::ZERO);
    }

    #[test]
    fn test_unknown_clip_is_single_frame() {
        let lib = library();
        let actor = lib.create("no_such_clip");
        assert_eq!(actor.frame_count(), 1);
        assert!(actor.is_at_last_frame());
        assert_eq!(lib.frame_count("no_such_clip"), 1);
    }

    #[test]
    fn test_switching_to_unknown_clip_holds_first_frame() {
        let lib = library();
        let mut actor = lib.create(clips::PC_DAMAGE);
        actor.play(clips::PC_DAMAGE, 12.0, false, 1.0);
        actor.play("no_such_clip", 12.0, true, 1.0);
        assert_eq!(actor.clip_name(), "no_such_clip");
        assert_eq!(actor.current_frame(), 0.0);
        actor.advance();
        assert_eq!(actor.current_frame(), 0.0);
        assert_eq!(actor.bone_position(PC_PIVOT_NAME), Vec2::ZERO);
    }
}
