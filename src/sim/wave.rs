//! Player and wave state machine
//!
//! The player rides a bone of the wave actor. Touches make the wave rise; it
//! falls back on its own once the rise time runs out. How high the wave sits
//! in its rise clip sets the scroll acceleration, and with it the score rate.
//!
//! A crash plays the damage clip, drops the wave to the floor, plays the
//! recovery clip and then grants a short invulnerable run-up.

use std::rc::Rc;

use glam::Vec2;

use super::animation::{AnimationSource, Animator, clips};
use super::state::{PcPhase, PlayerState, WavePhase};
use crate::consts::*;

pub struct WaveManager {
    animations: Rc<dyn AnimationSource>,
    pc: Box<dyn Animator>,
    wave: Box<dyn Animator>,
    plane: Box<dyn Animator>,
    /// Screen position of the surfing layer
    origin: Vec2,
    pc_phase: PcPhase,
    wave_phase: WavePhase,
    touchable: bool,
    started_pc_return: bool,
    runup_frames: u32,
    up_count: u32,
    /// Forward lean of the player at speed [px]
    overhang_x: f32,
}

impl std::fmt::Debug for WaveManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveManager")
            .field("pc_phase", &self.pc_phase)
            .field("wave_phase", &self.wave_phase)
            .field("pc_clip", &self.pc.clip_name())
            .field("wave_clip", &self.wave.clip_name())
            .field("wave_frame", &self.wave.current_frame())
            .field("touchable", &self.touchable)
            .field("runup_frames", &self.runup_frames)
            .field("up_count", &self.up_count)
            .finish()
    }
}

impl WaveManager {
    pub fn new(animations: Rc<dyn AnimationSource>) -> Self {
        let pc = animations.create(clips::PC_NORMAL);
        let wave = animations.create(clips::WAVE_LOWERMOST);
        let plane = animations.create(clips::WAVE_FLAT);
        Self {
            animations,
            pc,
            wave,
            plane,
            origin: Vec2::new(OFFSET_X, 0.0),
            pc_phase: PcPhase::Normal,
            wave_phase: WavePhase::Floor,
            touchable: false,
            started_pc_return: false,
            runup_frames: 0,
            up_count: 0,
            overhang_x: 0.0,
        }
    }

    /// Reset to the idle pose
    pub fn show_content(&mut self) {
        self.touchable = false;
        self.pc_phase = PcPhase::Normal;
        self.wave_phase = WavePhase::Floor;
        self.started_pc_return = false;
        self.runup_frames = 0;
        self.up_count = 0;
        self.overhang_x = 0.0;
        self.pc.play(clips::PC_NORMAL, 0.0, true, 1.0);
        self.wave.play(clips::WAVE_LOWERMOST, 0.0, true, 1.0);
        self.plane.play(clips::WAVE_FLAT, 0.0, true, 1.0);
    }

    pub fn start_game(&mut self) {
        self.touchable = true;
    }

    #[inline]
    pub fn is_touchable(&self) -> bool {
        self.touchable
    }

    /// True only on the frame the recovery animation started
    #[inline]
    pub fn is_started_pc_return(&self) -> bool {
        self.started_pc_return
    }

    /// Invulnerable after recovering from a crash
    #[inline]
    pub fn is_runup(&self) -> bool {
        self.runup_frames > 0
    }

    pub fn pc_phase(&self) -> PcPhase {
        self.pc_phase
    }

    pub fn wave_phase(&self) -> WavePhase {
        self.wave_phase
    }

    pub fn pc_clip(&self) -> &str {
        self.pc.clip_name()
    }

    pub fn wave_clip(&self) -> &str {
        self.wave.clip_name()
    }

    /// Player anchor in screen coordinates
    pub fn pc_position(&self) -> Vec2 {
        self.wave.bone_position(PC_PIVOT_NAME)
            + Vec2::new(SURFING_X + self.overhang_x, SURFING_Y)
            + self.origin
    }

    /// Scroll acceleration in [0, 1], peaking halfway up the rise clip
    pub fn scroll_factor(&self) -> f32 {
        let rise_frames = self.animations.frame_count(clips::WAVE_RISE);
        let middle = rise_frames.saturating_sub(1) as f32 * 0.5;
        if middle <= 0.0 {
            return 0.0;
        }
        let diff = (self.up_frame_position() - middle).abs();
        ((middle - diff) / middle).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            pc_phase: self.pc_phase,
            wave_phase: self.wave_phase,
            touchable: self.touchable,
            runup_frames: self.runup_frames,
            up_count: self.up_count,
            pc_position: self.pc_position(),
            scroll_factor: self.scroll_factor(),
        }
    }

    pub fn on_update(&mut self) {
        match self.pc_phase {
            PcPhase::Normal => self.update_normal(),
            PcPhase::Damage | PcPhase::Return => self.update_miss(),
        }
    }

    /// Start or continue rising
    pub fn on_touch(&mut self) {
        if self.wave_phase != WavePhase::Up {
            self.change_wave_phase(WavePhase::Up);
        }
        self.up_count = UP_FRAMES_PER_TOUCH;
    }

    /// Player crashed into an obstacle
    pub fn on_miss(&mut self) {
        log::debug!("Miss while wave is {:?}", self.wave_phase);
        self.touchable = false;
        self.pc.play(clips::PC_DAMAGE, 0.0, false, 1.0);
        self.pc_phase = PcPhase::Damage;
    }

    fn update_normal(&mut self) {
        if self.runup_frames > 0 {
            self.runup_frames -= 1;
            if self.runup_frames == 0 {
                self.pc.play(clips::PC_NORMAL, 0.0, true, 1.0);
            }
        }

        match self.wave_phase {
            WavePhase::Up => {
                self.up_count = self.up_count.saturating_sub(1);
                if self.up_count == 0 || self.wave.is_at_last_frame() {
                    self.up_count = 0;
                    self.change_wave_phase(WavePhase::Down);
                }
            }
            WavePhase::Down => {
                if self.wave.is_at_last_frame() {
                    self.change_wave_phase(WavePhase::Floor);
                }
            }
            WavePhase::Floor => {}
        }

        self.pc.advance();
        self.wave.advance();
        self.plane.advance();
        self.overhang_x = PC_OVERHANG_MAX * self.scroll_factor();
    }

    fn update_miss(&mut self) {
        self.started_pc_return = false;
        if !self.pc.is_at_last_frame() {
            self.pc.advance();
            return;
        }

        if self.pc_phase == PcPhase::Damage {
            if self.wave_phase != WavePhase::Floor {
                self.wave.play(clips::WAVE_LOWERMOST, 0.0, true, 1.0);
                self.wave_phase = WavePhase::Floor;
                self.overhang_x = 0.0;
            }
            self.pc.play(clips::PC_RETURN, 0.0, false, 1.0);
            self.pc_phase = PcPhase::Return;
            self.started_pc_return = true;
        } else {
            log::debug!("Recovered, run-up for {} frames", RUNUP_FRAMES);
            self.pc.play(clips::PC_RUNUP, 0.0, true, 1.0);
            self.pc_phase = PcPhase::Normal;
            self.runup_frames = RUNUP_FRAMES;
            self.up_count = 0;
            self.touchable = true;
        }
    }

    /// Switch wave clips, keeping the wave height continuous
    fn change_wave_phase(&mut self, phase: WavePhase) {
        let frame_position = self.up_frame_position();
        match phase {
            WavePhase::Up => {
                self.wave
                    .play(clips::WAVE_RISE, frame_position, false, PLAYSPEED_UP);
            }
            WavePhase::Down => {
                let fall_frames = self.animations.frame_count(clips::WAVE_FALL);
                let start = fall_frames.saturating_sub(1) as f32 - frame_position;
                self.wave
                    .play(clips::WAVE_FALL, start, false, PLAYSPEED_DOWN);
            }
            WavePhase::Floor => {
                self.wave.play(clips::WAVE_LOWERMOST, 0.0, true, 1.0);
            }
        }
        self.wave_phase = phase;
    }

    /// Current wave height expressed as a frame of the rise clip
    fn up_frame_position(&self) -> f32 {
        match self.wave_phase {
            WavePhase::Up => self.wave.current_frame(),
            WavePhase::Down => {
                self.wave.frame_count().saturating_sub(1) as f32 - self.wave.current_frame()
            }
            WavePhase::Floor => 0.0,
        }
    }
}
