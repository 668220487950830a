//! Scrolling world: obstacles and background landmarks
//!
//! `ObstacleManager` owns the scroller, both placement indices and both live
//! pools. Each scrolling frame it advances the scroll position, despawns
//! what has left the screen, then spawns what has entered the appear window.

use std::rc::Rc;

use glam::Vec2;

use super::animation::AnimationSource;
use super::collision::{Rect, hits_any};
use super::events::{EventBus, GameEvent};
use super::level::Level;
use super::placement::{LandmarkPlacement, ObstacleKind, ObstaclePlacement, PlacementIndex};
use super::pool::{LiveEntityPool, LiveLandmark, LiveObstacle};
use super::scroll::{FixedPointScroller, ScrollRates, ScrollStep};
use crate::consts::*;
use crate::settings::GameConfig;

pub struct ObstacleManager {
    animations: Rc<dyn AnimationSource>,
    scroller: FixedPointScroller,
    start_pixel: i32,
    collision_disabled: bool,
    obstacle_index: PlacementIndex<ObstaclePlacement>,
    landmark_index: PlacementIndex<LandmarkPlacement>,
    obstacles: LiveEntityPool<LiveObstacle>,
    landmarks: LiveEntityPool<LiveLandmark>,
    scrolling: bool,
    shown: bool,
}

impl std::fmt::Debug for ObstacleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObstacleManager")
            .field("scroller", &self.scroller)
            .field("obstacles", &self.obstacles)
            .field("landmarks", &self.landmarks)
            .field("scrolling", &self.scrolling)
            .finish()
    }
}

impl ObstacleManager {
    pub fn new(level: &Level, config: &GameConfig, animations: Rc<dyn AnimationSource>) -> Self {
        Self {
            animations,
            scroller: FixedPointScroller::new(ScrollRates::default(), config.map_loop()),
            start_pixel: config.start_pixel,
            collision_disabled: config.debug.collision_disabled,
            obstacle_index: PlacementIndex::new(level.obstacles.clone()),
            landmark_index: PlacementIndex::new(level.landmarks.clone()),
            obstacles: LiveEntityPool::new(),
            landmarks: LiveEntityPool::new(),
            scrolling: false,
            shown: false,
        }
    }

    /// Reset to the start position and spawn what is already in view
    pub fn show_content(&mut self) {
        self.obstacles.clear();
        self.landmarks.clear();
        self.scrolling = false;
        self.scroller.reset(self.start_pixel);
        self.landmark_index.rewind();
        self.obstacle_index.rewind();
        self.shown = true;

        self.spawn_landmarks();
        self.spawn_obstacles();
        self.advance_actors();
        log::debug!(
            "World shown at {}px with {} obstacles in view",
            self.scroller.scrolled_pixels(),
            self.obstacles.len()
        );
    }

    /// Release every live entity; safe to call repeatedly
    pub fn hide_content(&mut self) {
        self.landmarks.clear();
        self.obstacles.clear();
        self.scrolling = false;
        self.shown = false;
    }

    pub fn start_scroll(&mut self) {
        debug_assert!(self.shown, "start_scroll before show_content");
        self.scrolling = true;
    }

    pub fn stop_scroll(&mut self) {
        self.scrolling = false;
    }

    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    #[inline]
    pub fn scrolled_meters(&self) -> u32 {
        self.scroller.scrolled_meters()
    }

    #[inline]
    pub fn scrolled_pixels(&self) -> i32 {
        self.scroller.scrolled_pixels()
    }

    pub fn scroller(&self) -> &FixedPointScroller {
        &self.scroller
    }

    /// Screen x of the obstacle layer origin
    pub fn layer_x(&self) -> f32 {
        (SCREEN_WIDTH - self.scroller.scrolled_pixels()) as f32
    }

    /// Screen x of the landmark layer origin
    pub fn landmark_layer_x(&self) -> f32 {
        // Truncates toward zero, also for negative scroll after a map loop
        let parallax = (self.scroller.scrolled_pixels() as f32 * LANDMARK_SCROLL_RATE) as i32;
        (SCREEN_WIDTH - parallax) as f32
    }

    pub fn live_obstacles(&self) -> impl Iterator<Item = &LiveObstacle> {
        self.obstacles.iter()
    }

    pub fn live_landmarks(&self) -> impl Iterator<Item = &LiveLandmark> {
        self.landmarks.iter()
    }

    /// Advance one frame at `scroll_factor` (0 = base speed, 1 = top speed)
    pub fn update(&mut self, scroll_factor: f32) {
        if !self.scrolling {
            return;
        }
        if self.scroller.advance(scroll_factor) == ScrollStep::Wrapped {
            self.obstacle_index.rewind();
            self.landmark_index.rewind();
            self.obstacles.clear();
            self.landmarks.clear();
        }

        self.despawn_landmarks();
        self.spawn_landmarks();
        self.despawn_obstacles();
        self.spawn_obstacles();
        self.advance_actors();
    }

    /// Test the player rectangle against every live obstacle
    ///
    /// Requests the hit sound of the first obstacle hit.
    pub fn check_collision(&self, pc_rect: &Rect, events: &mut EventBus) -> bool {
        debug_assert!(self.shown, "check_collision before show_content");
        if self.collision_disabled || !self.shown {
            return false;
        }

        let layer_offset = Vec2::new(self.layer_x(), 0.0);
        let hit = self.obstacles.iter().find(|obstacle| {
            let mut anchor = obstacle.pos + layer_offset;
            if obstacle.kind == ObstacleKind::Pteranodon {
                anchor += obstacle.actor.bone_position(PTERANODON_PIVOT_NAME);
            }
            hits_any(pc_rect, anchor, obstacle.hitboxes)
        });

        match hit {
            Some(obstacle) => {
                log::debug!(
                    "Player hit {:?} (placement {})",
                    obstacle.kind,
                    obstacle.placement_index
                );
                if let Some(sound) = obstacle.kind.hit_sound() {
                    events.emit(GameEvent::Sound(sound));
                }
                true
            }
            None => false,
        }
    }

    fn spawn_landmarks(&mut self) {
        let appear_line = (self.scroller.scrolled_pixels() as i64 * SCROLL_METER_PER_PX_NUM
            / SCROLL_METER_PER_PX_DENOM) as f32;
        for index in self.landmark_index.sweep(appear_line) {
            let Some(record) = self.landmark_index.get(index) else {
                continue;
            };
            let x = record.x * LANDMARK_SCROLL_RATE / SCROLL_METER_PER_PX_NUM as f32
                * SCROLL_METER_PER_PX_DENOM as f32;
            self.landmarks.spawn(LiveLandmark {
                placement_index: index,
                pos: Vec2::new(x, LANDMARK_BOTTOM_Y - record.height),
                width: record.width,
                height: record.height,
            });
        }
    }

    fn despawn_landmarks(&mut self) {
        let dead_line = -self.landmark_layer_x();
        self.landmarks
            .sweep(|landmark| landmark.pos.x + landmark.width >= dead_line);
    }

    fn spawn_obstacles(&mut self) {
        let appear_line = (OBSTACLE_APPEAR_AREA_WIDTH + self.scroller.scrolled_pixels()) as f32;
        for index in self.obstacle_index.sweep(appear_line) {
            let Some(record) = self.obstacle_index.get(index) else {
                continue;
            };
            let mut actor = self.animations.create(record.kind.clip_name());
            if record.kind == ObstacleKind::Pteranodon {
                actor.set_paused(true);
                actor.set_looping(false);
            }
            log::debug!("Spawn {:?} at ({}, {})", record.kind, record.x, record.y);
            self.obstacles.spawn(LiveObstacle {
                placement_index: index,
                kind: record.kind,
                pos: Vec2::new(record.x, record.y),
                hitboxes: record.kind.hitboxes(),
                actor,
            });
        }
    }

    fn despawn_obstacles(&mut self) {
        let scrolled = self.scroller.scrolled_pixels();
        let dead_line = (scrolled - SCREEN_WIDTH - OBSTACLE_WIDTH_TO_VANISH_AREA) as f32;
        let layer_x = self.layer_x();
        let dropped = self.obstacles.sweep(|obstacle| {
            if obstacle.pos.x < dead_line {
                return false;
            }
            obstacle.kind != ObstacleKind::Pteranodon || pteranodon_survives(obstacle, layer_x)
        });
        if dropped > 0 {
            log::debug!("Despawned {} obstacles at {}px", dropped, scrolled);
        }
    }

    fn advance_actors(&mut self) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.actor.advance();
        }
    }
}

/// Pteranodon lifecycle: approach with the world, wake at the wake line,
/// dive while pinned there, and leave once the dive has played out
fn pteranodon_survives(obstacle: &mut LiveObstacle, layer_x: f32) -> bool {
    let actor = &mut obstacle.actor;
    if actor.is_paused() && !actor.is_at_last_frame() {
        if obstacle.pos.x + layer_x > PTERANODON_WAKE_X {
            return true;
        }
        actor.set_paused(false);
    } else if actor.is_at_last_frame() {
        return false;
    }
    obstacle.pos.x = PTERANODON_WAKE_X - layer_x;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::settings::DebugFlags;
    use crate::sim::animation::ClipLibrary;
    use proptest::prelude::*;

    fn manager(obstacles: Vec<ObstaclePlacement>, config: &GameConfig) -> ObstacleManager {
        let level = Level {
            obstacles,
            landmarks: LandmarkPlacement::standard_course(),
        };
        let mut manager = ObstacleManager::new(&level, config, Rc::new(ClipLibrary::standard()));
        manager.show_content();
        manager
    }

    fn place(kind: ObstacleKind, x: f32, y: f32) -> ObstaclePlacement {
        ObstaclePlacement { kind, x, y }
    }

    #[test]
    fn test_show_spawns_obstacles_in_appear_window() {
        let m = manager(
            vec![
                place(ObstacleKind::Rock, 100.0, 500.0),
                place(ObstacleKind::Rock, 300.0, 500.0),
                place(ObstacleKind::Rock, 500.0, 500.0),
            ],
            &GameConfig::default(),
        );
        assert_eq!(m.live_obstacles().count(), 2);
        // First landmark sits at negative distance
        assert_eq!(m.live_landmarks().count(), 1);
        assert_eq!(m.layer_x(), 640.0);
    }

    #[test]
    fn test_no_scroll_until_started() {
        let mut m = manager(vec![], &GameConfig::default());
        m.update(1.0);
        assert_eq!(m.scrolled_pixels(), 0);
        m.start_scroll();
        m.update(0.0);
        assert_eq!(m.scrolled_pixels(), 5);
        m.stop_scroll();
        m.update(0.0);
        assert_eq!(m.scrolled_pixels(), 5);
    }

    #[test]
    fn test_obstacles_despawn_behind_vanish_line() {
        let config = GameConfig {
            start_pixel: 2000,
            ..GameConfig::default()
        };
        let mut m = manager(vec![place(ObstacleKind::Rock, 2400.0, 500.0)], &config);
        assert_eq!(m.live_obstacles().count(), 1);
        m.start_scroll();
        // Dead line passes 2400 once scrolled exceeds 3520
        while m.scrolled_pixels() <= 3520 {
            m.update(1.0);
        }
        m.update(1.0);
        assert_eq!(m.live_obstacles().count(), 0);
    }

    #[test]
    fn test_landmark_parallax() {
        let config = GameConfig {
            start_pixel: 2400,
            ..GameConfig::default()
        };
        let m = manager(vec![], &config);
        assert_eq!(m.landmark_layer_x(), 640.0 - 840.0);
        let second = m
            .live_landmarks()
            .find(|l| l.placement_index == 1)
            .map(|l| l.pos);
        // Appear line 2400 is not past x = 2400
        assert_eq!(second, None);
        let first = m.live_landmarks().next().map(|l| l.pos);
        assert_eq!(first, Some(Vec2::new(-1500.0 * 0.35, 360.0 - 132.0)));
    }

    #[test]
    fn test_landmark_parallax_truncates_negative_scroll() {
        let config = GameConfig {
            start_pixel: MAP_REPEATED_START_PIXEL + 1,
            ..GameConfig::default()
        };
        let m = manager(vec![], &config);
        // -1499 * 0.35 = -524.65
        assert_eq!(m.landmark_layer_x(), 640.0 + 524.0);
    }

    #[test]
    fn test_collision_anchor_follows_layer() {
        let mut m = manager(
            vec![place(ObstacleKind::Gull, 100.0, 150.0)],
            &GameConfig::default(),
        );
        let mut events = EventBus::new();
        // Gull hitbox on screen: (640 + 100 + 16, 100) size 44x18
        let on_gull = Rect::new(760.0, 105.0, 10.0, 10.0);
        assert!(m.check_collision(&on_gull, &mut events));
        assert_eq!(events.pending(), &[GameEvent::Sound(SoundEffect::Gull)]);

        m.start_scroll();
        m.update(0.0);
        events.clear();
        assert!(!m.check_collision(&on_gull.translated(Vec2::new(38.0, 0.0)), &mut events));
        assert!(m.check_collision(&on_gull.translated(Vec2::new(-5.0, 0.0)), &mut events));
    }

    #[test]
    fn test_rock_hit_is_silent() {
        let m = manager(
            vec![place(ObstacleKind::Rock, 0.0, 500.0)],
            &GameConfig::default(),
        );
        let mut events = EventBus::new();
        assert!(m.check_collision(&Rect::new(660.0, 300.0, 10.0, 10.0), &mut events));
        assert!(events.pending().is_empty());
    }

    #[test]
    fn test_collision_disabled_flag() {
        let config = GameConfig {
            debug: DebugFlags {
                collision_disabled: true,
                ..DebugFlags::default()
            },
            ..GameConfig::default()
        };
        let m = manager(vec![place(ObstacleKind::Rock, 0.0, 500.0)], &config);
        let mut events = EventBus::new();
        assert!(!m.check_collision(&Rect::new(660.0, 300.0, 10.0, 10.0), &mut events));
    }

    #[test]
    fn test_pteranodon_waits_then_dives() {
        let mut m = manager(
            vec![place(ObstacleKind::Pteranodon, 400.0, 220.0)],
            &GameConfig::default(),
        );
        m.start_scroll();
        let live = |m: &ObstacleManager| {
            m.live_obstacles()
                .next()
                .map(|o| (o.pos.x + m.layer_x(), o.actor.is_paused()))
        };
        // Approaches with the world while asleep
        assert_eq!(live(&m), Some((1040.0, true)));
        while live(&m).is_some_and(|(_, paused)| paused) {
            m.update(0.0);
        }
        let (screen_x, _) = live(&m).unwrap_or_default();
        assert_eq!(screen_x, PTERANODON_WAKE_X);

        // Pinned while diving, removed after the last frame
        let mut frames = 0;
        while let Some((x, _)) = live(&m) {
            assert_eq!(x, PTERANODON_WAKE_X);
            m.update(0.0);
            frames += 1;
            assert!(frames < 100);
        }
        assert!(frames >= 38);
    }

    #[test]
    fn test_map_loop_clears_and_respawns() {
        let config = GameConfig {
            competitive: false,
            start_pixel: MAP_END_PIXEL - 5,
            ..GameConfig::default()
        };
        let mut m = manager(vec![place(ObstacleKind::Rock, -1200.0, 500.0)], &config);
        m.start_scroll();
        let mut wrapped = false;
        for _ in 0..4 {
            m.update(0.0);
            if m.scrolled_pixels() < 0 {
                wrapped = true;
                break;
            }
        }
        assert!(wrapped);
        assert_eq!(m.live_obstacles().count(), 1);
        assert!(m.scrolled_meters() > 0);
    }

    #[test]
    fn test_stop_scroll_is_idempotent() {
        let mut m = manager(
            vec![place(ObstacleKind::Rock, 300.0, 500.0)],
            &GameConfig::default(),
        );
        m.start_scroll();
        m.update(0.5);
        m.stop_scroll();
        let once = (
            m.scrolled_pixels(),
            m.scroller().pixel_remainder(),
            m.live_obstacles().count(),
            m.live_landmarks().count(),
        );
        m.stop_scroll();
        m.update(1.0);
        let twice = (
            m.scrolled_pixels(),
            m.scroller().pixel_remainder(),
            m.live_obstacles().count(),
            m.live_landmarks().count(),
        );
        assert_eq!(once, twice);
        assert!(!m.is_scrolling());
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut m = manager(
            vec![place(ObstacleKind::Rock, 0.0, 500.0)],
            &GameConfig::default(),
        );
        m.hide_content();
        m.hide_content();
        assert_eq!(m.live_obstacles().count(), 0);
        assert_eq!(m.live_landmarks().count(), 0);
        m.show_content();
        assert_eq!(m.live_obstacles().count(), 1);
    }

    proptest! {
        #[test]
        fn prop_despawn_completeness(
            xs in prop::collection::vec(0i32..6000, 1..30),
            frames in 1usize..600,
        ) {
            let placements = xs
                .iter()
                .map(|&x| place(ObstacleKind::Shark, x as f32, 340.0))
                .collect();
            let mut m = manager(placements, &GameConfig::default());
            m.start_scroll();
            for _ in 0..frames {
                m.update(1.0);
            }
            let dead_line = (m.scrolled_pixels() - 640 - 480) as f32;
            let appear_line = (m.scrolled_pixels() + 480) as f32;
            for obstacle in m.live_obstacles() {
                prop_assert!(obstacle.pos.x >= dead_line);
                prop_assert!(obstacle.pos.x < appear_line);
            }
        }
    }
}
