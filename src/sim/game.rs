//! Session orchestration: world scrolling, the player state machine, the
//! countdown and the collision check, stepped once per frame

use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::AnimationSource;
use super::events::{EventBus, GameEvent};
use super::level::Level;
use super::obstacles::ObstacleManager;
use super::state::{GamePhase, GameSnapshot};
use super::timer::CountdownTimer;
use super::wave::WaveManager;
use crate::audio::{BGM_NAME, SoundEffect};
use crate::consts::*;
use crate::settings::GameConfig;

/// Lifecycle of a minigame hosted by a scene
///
/// The host calls `init` once, then for each session `show_content`,
/// `start_game`, `on_update` every frame and finally `hide_content`.
pub trait GameContent {
    fn init(&mut self) {}
    fn title_bgm_name(&self) -> &str {
        ""
    }
    fn main_bgm_name(&self) -> &str {
        ""
    }
    /// Reset every piece of session state and show the first frame
    fn show_content(&mut self);
    fn start_game(&mut self);
    fn on_update(&mut self);
    fn hide_content(&mut self);
    /// Returns true when the touch was not consumed
    fn on_touch_down(&mut self) -> bool;
    /// Returns true when the touch was not consumed
    fn on_touch_up(&mut self) -> bool;
    /// Notifications raised by the game
    fn events(&mut self) -> &mut EventBus;
}

/// The surfing minigame
pub struct WaveGame {
    config: GameConfig,
    obstacles: ObstacleManager,
    wave: WaveManager,
    timer: CountdownTimer,
    events: EventBus,
    /// Autoplay randomness, reseeded per session
    rng: Pcg32,
    initialized: bool,
    in_game: bool,
    in_miss: bool,
    in_hold: bool,
    finished: bool,
    touch_cooling_frames: u32,
    score: u32,
    forward_caution: bool,
}

impl std::fmt::Debug for WaveGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveGame")
            .field("phase", &self.phase())
            .field("score", &self.score)
            .field("timer", &self.timer)
            .field("wave", &self.wave)
            .field("obstacles", &self.obstacles)
            .finish()
    }
}

impl WaveGame {
    pub fn new(config: GameConfig, level: &Level, animations: Rc<dyn AnimationSource>) -> Self {
        let seed = config.random_seed.unwrap_or(0);
        Self {
            obstacles: ObstacleManager::new(level, &config, Rc::clone(&animations)),
            wave: WaveManager::new(animations),
            timer: CountdownTimer::new(config.time_limit),
            events: EventBus::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
            initialized: false,
            in_game: false,
            in_miss: false,
            in_hold: false,
            finished: false,
            touch_cooling_frames: 0,
            score: 0,
            forward_caution: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        if self.finished {
            GamePhase::Finished
        } else if !self.in_game {
            GamePhase::PreGame
        } else if self.in_miss {
            GamePhase::MissResolving
        } else {
            GamePhase::Playing
        }
    }

    /// Distance travelled [m], capped at [`SCORE_LIMIT`]
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Remaining whole seconds
    #[inline]
    pub fn time_count(&self) -> u32 {
        self.timer.time_count()
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn wave(&self) -> &WaveManager {
        &self.wave
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase(),
            score: self.score,
            time_count: self.timer.time_count(),
            scrolled_pixels: self.obstacles.scrolled_pixels(),
            live_obstacles: self.obstacles.live_obstacles().count(),
            player: self.wave.snapshot(),
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    fn check_scrolled_meter(&mut self) {
        let score = self.obstacles.scrolled_meters().min(SCORE_LIMIT);
        if score != self.score {
            self.score = score;
            self.events.emit(GameEvent::ScoreChanged(score));
        }
    }

    fn check_collision(&mut self) {
        if self.wave.is_runup() {
            return;
        }
        let pc_rect = COLLISION_PC.translated(self.wave.pc_position());
        if self.obstacles.check_collision(&pc_rect, &mut self.events) {
            log::debug!("Miss at {}m", self.score);
            self.events.emit(GameEvent::Sound(SoundEffect::Miss));
            self.events.emit(GameEvent::Miss);
            self.in_miss = true;
            self.wave.on_miss();
        }
    }

    fn forward_timer_event(&mut self, event: Option<GameEvent>) {
        if let Some(event) = event.filter(|_| self.forward_caution) {
            self.events.emit(event);
        }
    }

    fn finish_game(&mut self) {
        self.in_game = false;
        self.in_hold = false;
        self.finished = true;
        self.obstacles.stop_scroll();
        log::info!("Time up: {}m", self.score);
        self.events.emit(GameEvent::TimeUp { score: self.score });
    }
}

impl GameContent for WaveGame {
    fn init(&mut self) {
        self.initialized = true;
        log::info!(
            "Wave game ready ({} mode, start {}px, {}s)",
            if self.config.competitive {
                "competitive"
            } else {
                "casual"
            },
            self.config.start_pixel,
            self.config.time_limit
        );
    }

    fn title_bgm_name(&self) -> &str {
        BGM_NAME
    }

    fn main_bgm_name(&self) -> &str {
        BGM_NAME
    }

    fn show_content(&mut self) {
        debug_assert!(self.initialized, "show_content before init");
        self.in_game = false;
        self.in_miss = false;
        self.in_hold = false;
        self.finished = false;
        self.touch_cooling_frames = 0;
        self.score = 0;
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.config.random_seed.unwrap_or(0));
        self.obstacles.show_content();
        self.wave.show_content();

        // Caution entered while resetting the clock is not announced
        let _ = self.timer.set_time_count(self.config.time_limit);
        self.forward_caution = true;
    }

    fn start_game(&mut self) {
        debug_assert!(!self.finished, "start_game on a finished session");
        log::info!("Game start");
        self.in_game = true;
        self.obstacles.start_scroll();
        self.wave.start_game();
    }

    fn on_update(&mut self) {
        if self.in_game {
            if !self.in_miss {
                self.obstacles.update(self.wave.scroll_factor());
                self.check_scrolled_meter();
            }
            let caution = self.timer.tick();
            self.forward_timer_event(caution);
            // Expiry waits until a miss has been resolved
            if !self.in_miss && self.timer.time_count() == 0 {
                self.finish_game();
            }
        }

        if self.in_game {
            self.touch_cooling_frames = self.touch_cooling_frames.saturating_sub(1);
            if self.config.debug.hold_to_up && self.in_hold && self.wave.is_touchable() {
                self.wave.on_touch();
            }
            self.wave.on_update();
            if self.in_miss {
                if self.wave.is_touchable() {
                    log::debug!("Miss resolved");
                    self.in_miss = false;
                } else if self.wave.is_started_pc_return() {
                    self.events.emit(GameEvent::PcReturnStarted);
                }
            } else {
                self.check_collision();
            }
        }
    }

    fn hide_content(&mut self) {
        self.obstacles.hide_content();
        self.forward_caution = false;
        self.in_game = false;
        self.in_hold = false;
    }

    fn on_touch_down(&mut self) -> bool {
        if !self.in_game {
            return true;
        }
        if self.config.debug.hold_to_up {
            self.in_hold = true;
        }
        if self.in_miss || self.touch_cooling_frames > 0 {
            return false;
        }
        self.events.emit(GameEvent::Sound(SoundEffect::Tap));
        if self.wave.is_touchable() {
            self.wave.on_touch();
            self.touch_cooling_frames = TOUCH_COOLING_FRAMES;
        }
        false
    }

    fn on_touch_up(&mut self) -> bool {
        if !self.in_game {
            return true;
        }
        self.in_hold = false;
        false
    }

    fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }
}
