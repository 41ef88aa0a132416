//! Collision detection for axis-aligned rectangles
//!
//! Overlap alone cannot tell a landing from a side hit, so contacts are
//! classified against the player's rectangle from before this frame's motion.

use super::rect::Rect;

/// How the player met a solid obstacle this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Falling onto the top surface
    Landing,
    /// Rising into the bottom surface
    CeilingBump,
    /// Any other overlap (lateral or already embedded)
    Side,
}

/// AABB overlap test, half-open on all sides.
///
/// Rectangles that merely touch along an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Classify an overlap between the player and a solid obstacle.
///
/// `before` is the player rectangle prior to this frame's vertical motion,
/// `after` the current one. Returns `None` when they do not overlap.
pub fn classify_contact(before: &Rect, after: &Rect, vel_y: f32, solid: &Rect) -> Option<Contact> {
    if !intersects(after, solid) {
        return None;
    }

    if vel_y > 0.0 && before.bottom() <= solid.top() {
        Some(Contact::Landing)
    } else if vel_y < 0.0 && before.top() >= solid.bottom() {
        Some(Contact::CeilingBump)
    } else {
        Some(Contact::Side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Right edge touches left edge
        assert!(!intersects(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Bottom edge touches top edge
        assert!(!intersects(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_landing_from_above() {
        let floor = Rect::new(0.0, 350.0, 600.0, 50.0);
        let before = Rect::new(50.0, 329.0, 20.0, 20.0);
        let after = Rect::new(50.0, 333.0, 20.0, 20.0);
        assert_eq!(classify_contact(&before, &after, 4.0, &floor), Some(Contact::Landing));
    }

    #[test]
    fn test_fast_fall_still_lands() {
        // Thin platform, player moves further than its thickness in one frame
        let ledge = Rect::new(0.0, 200.0, 100.0, 5.0);
        let before = Rect::new(10.0, 175.0, 20.0, 20.0);
        let after = Rect::new(10.0, 184.0, 20.0, 20.0);
        assert_eq!(classify_contact(&before, &after, 9.0, &ledge), Some(Contact::Landing));
    }

    #[test]
    fn test_ceiling_bump() {
        let block = Rect::new(0.0, 100.0, 100.0, 20.0);
        let before = Rect::new(10.0, 122.0, 20.0, 20.0);
        let after = Rect::new(10.0, 115.0, 20.0, 20.0);
        assert_eq!(
            classify_contact(&before, &after, -7.0, &block),
            Some(Contact::CeilingBump)
        );
    }

    #[test]
    fn test_side_contact() {
        // Walking into a block that was already level with the player
        let block = Rect::new(100.0, 300.0, 50.0, 50.0);
        let before = Rect::new(85.0, 329.7, 20.0, 20.0);
        let after = Rect::new(85.0, 330.0, 20.0, 20.0);
        assert_eq!(classify_contact(&before, &after, 0.3, &block), Some(Contact::Side));
    }

    #[test]
    fn test_no_contact() {
        let block = Rect::new(100.0, 300.0, 50.0, 50.0);
        let r = Rect::new(0.0, 0.0, 20.0, 20.0);
        assert_eq!(classify_contact(&r, &r, 1.0, &block), None);
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.1f32..200.0, 0.1f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_intersects_itself(a in rect_strategy()) {
            prop_assert!(intersects(&a, &a));
        }
    }
}
