//! Named colors recovered from the original scene-building palette. Each
//! is fully opaque (`a = 1.0`).

use crate::math::V4;

pub const BLACK: V4 = V4::new(0.0, 0.0, 0.0, 1.0);
pub const GREY: V4 = V4::new(0.5, 0.5, 0.5, 1.0);
pub const SILVER: V4 = V4::new(0.75, 0.75, 0.75, 1.0);
pub const WHITE: V4 = V4::new(1.0, 1.0, 1.0, 1.0);
pub const RED: V4 = V4::new(0.8, 0.05, 0.05, 1.0);
pub const BROWN: V4 = V4::new(0.45, 0.28, 0.12, 1.0);
pub const ORANGE: V4 = V4::new(0.9, 0.45, 0.05, 1.0);
pub const YELLOW: V4 = V4::new(0.9, 0.85, 0.1, 1.0);
pub const GREEN: V4 = V4::new(0.1, 0.6, 0.1, 1.0);
pub const DARK_GREEN: V4 = V4::new(0.05, 0.35, 0.05, 1.0);
pub const TEAL: V4 = V4::new(0.05, 0.5, 0.5, 1.0);
pub const BLUE: V4 = V4::new(0.1, 0.2, 0.8, 1.0);
pub const INDIGO: V4 = V4::new(0.3, 0.1, 0.6, 1.0);
pub const VIOLET: V4 = V4::new(0.55, 0.2, 0.75, 1.0);
pub const PINK: V4 = V4::new(0.95, 0.6, 0.7, 1.0);
pub const MAROON: V4 = V4::new(0.5, 0.1, 0.15, 1.0);
pub const LAVENDER: V4 = V4::new(0.7, 0.65, 0.9, 1.0);
pub const CYAN: V4 = V4::new(0.2, 0.85, 0.9, 1.0);
pub const GOLD: V4 = V4::new(0.85, 0.65, 0.1, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_named_colors_are_fully_opaque() {
        for c in [
            BLACK, GREY, SILVER, WHITE, RED, BROWN, ORANGE, YELLOW, GREEN, DARK_GREEN, TEAL, BLUE,
            INDIGO, VIOLET, PINK, MAROON, LAVENDER, CYAN, GOLD,
        ] {
            assert_eq!(c.a, 1.0);
        }
    }
}
