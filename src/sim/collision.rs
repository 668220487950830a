//! Axis-aligned hitbox tests between the player and live obstacles
//!
//! Obstacles carry kind-specific hitbox lists expressed relative to an
//! anchor point; the anchor moves with the world every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Inclusive overlap test; rectangles sharing only an edge intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// Test `rect` against every hitbox in `hitboxes` after moving them to `anchor`
pub fn hits_any(rect: &Rect, anchor: Vec2, hitboxes: &[Rect]) -> bool {
    hitboxes
        .iter()
        .any(|hitbox| rect.intersects(&hitbox.translated(anchor)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(-5.0, 2.0, 7.0, 2.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let player = Rect::new(0.0, 0.0, 10.0, 35.0);
        assert!(player.intersects(&Rect::new(10.0, 0.0, 63.0, 295.0)));
        assert!(player.intersects(&Rect::new(0.0, 35.0, 10.0, 10.0)));
        assert!(player.intersects(&Rect::new(-5.0, -5.0, 5.0, 5.0)));
        assert!(!player.intersects(&Rect::new(10.5, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_hits_any_uses_anchor() {
        let player = Rect::new(100.0, 100.0, 10.0, 10.0);
        let boxes = [Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(20.0, 0.0, 5.0, 5.0)];
        assert!(!hits_any(&player, Vec2::ZERO, &boxes));
        assert!(hits_any(&player, Vec2::new(98.0, 98.0), &boxes));
        // Second box lands on the player
        assert!(hits_any(&player, Vec2::new(80.0, 102.0), &boxes));
        assert!(!hits_any(&player, Vec2::new(80.0, 102.0), &[]));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..200, 1i32..200)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_collision_invariant_under_translation(
            player in arb_rect(),
            boxes in prop::collection::vec(arb_rect(), 0..4),
            anchor in (-300i32..300, -300i32..300),
            shift in (-1000i32..1000, -1000i32..1000),
        ) {
            let anchor = Vec2::new(anchor.0 as f32, anchor.1 as f32);
            let shift = Vec2::new(shift.0 as f32, shift.1 as f32);
            let before = hits_any(&player, anchor, &boxes);
            let after = hits_any(&player.translated(shift), anchor + shift, &boxes);
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_intersection_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
