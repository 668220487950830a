//! Live entity pools
//!
//! A pool owns the runtime instances spawned from placement records. Order
//! is spawn order and survives liveness sweeps, which keeps collision
//! iteration deterministic.

use glam::Vec2;

use super::animation::Animator;
use super::collision::Rect;
use super::placement::ObstacleKind;

/// Spawned entities, kept in spawn order
#[derive(Debug)]
pub struct LiveEntityPool<E> {
    entities: Vec<E>,
}

impl<E> Default for LiveEntityPool<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
        }
    }
}

impl<E> LiveEntityPool<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: E) {
        self.entities.push(entity);
    }

    /// Keep entities for which `alive` returns true; returns how many were dropped
    pub fn sweep(&mut self, mut alive: impl FnMut(&mut E) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain_mut(|e| alive(e));
        before - self.entities.len()
    }

    /// Drop every live entity
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// A spawned obstacle
pub struct LiveObstacle {
    /// Back-reference into the obstacle placement table
    pub placement_index: usize,
    pub kind: ObstacleKind,
    /// Position in obstacle layer coordinates
    pub pos: Vec2,
    pub hitboxes: &'static [Rect],
    pub actor: Box<dyn Animator>,
}

impl std::fmt::Debug for LiveObstacle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveObstacle")
            .field("placement_index", &self.placement_index)
            .field("kind", &self.kind)
            .field("pos", &self.pos)
            .field("clip", &self.actor.clip_name())
            .field("frame", &self.actor.current_frame())
            .finish()
    }
}

/// A spawned background landmark
#[derive(Debug, Clone, PartialEq)]
pub struct LiveLandmark {
    /// Back-reference into the landmark placement table
    pub placement_index: usize,
    /// Top-left in landmark layer coordinates
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_preserves_spawn_order() {
        let mut pool = LiveEntityPool::new();
        for i in 0..6 {
            pool.spawn(i);
        }
        let dropped = pool.sweep(|e| *e % 2 == 0);
        assert_eq!(dropped, 3);
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);

        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.sweep(|_| false), 0);
    }

    #[test]
    fn test_sweep_may_mutate_survivors() {
        let mut pool = LiveEntityPool::new();
        pool.spawn(1);
        pool.spawn(2);
        pool.sweep(|e| {
            *e *= 10;
            true
        });
        assert_eq!(pool.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(pool.len(), 2);
    }
}
