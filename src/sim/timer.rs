//! Countdown of the remaining play time

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use crate::consts::{CAUTION_TIME_CONDITION, FPS};
use crate::sec_to_frames;

/// Remaining time in frames with the low-time warning state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTimer {
    remain_frames: u32,
    displayed: u32,
    caution: bool,
}

impl CountdownTimer {
    pub fn new(seconds: u32) -> Self {
        let mut timer = Self::default();
        timer.set_time_count(seconds);
        timer
    }

    /// Restart the countdown; returns a caution transition if one happened
    pub fn set_time_count(&mut self, seconds: u32) -> Option<GameEvent> {
        self.set_frame_count(sec_to_frames(seconds))
    }

    pub fn set_frame_count(&mut self, frames: u32) -> Option<GameEvent> {
        self.remain_frames = frames;
        self.displayed = self.time_count();
        self.update_caution()
    }

    /// Remaining whole seconds, rounded up
    pub fn time_count(&self) -> u32 {
        self.remain_frames.div_ceil(FPS)
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.remain_frames
    }

    #[inline]
    pub fn is_caution(&self) -> bool {
        self.caution
    }

    /// Count down one frame; never goes below zero
    pub fn tick(&mut self) -> Option<GameEvent> {
        if self.remain_frames == 0 {
            return None;
        }
        self.remain_frames -= 1;
        let seconds = self.time_count();
        if seconds == self.displayed {
            return None;
        }
        self.displayed = seconds;
        self.update_caution()
    }

    fn update_caution(&mut self) -> Option<GameEvent> {
        let warn = self.displayed > 0 && self.displayed < CAUTION_TIME_CONDITION;
        match (warn, self.caution) {
            (true, false) => {
                self.caution = true;
                Some(GameEvent::TimeCaution)
            }
            (false, true) => {
                self.caution = false;
                Some(GameEvent::TimeCautionCancel)
            }
            _ => None,
        }
    }
}
