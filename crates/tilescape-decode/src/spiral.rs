//! Spiral ordering for neighbor-tile discovery.
//!
//! Tiles are fetched outward from the center tile so the terrain nearest the
//! viewer arrives first. The ordering is deterministic: it fixes which tile
//! address each unit of work is assigned, and gives reproducible world
//! offsets for testing.

/// Integer offset of a neighboring tile relative to the center tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpiralOffset {
    /// Tile columns east of center.
    pub dx: i32,
    /// Tile rows south of center.
    pub dy: i32,
}

impl SpiralOffset {
    /// The center of the spiral.
    pub const CENTER: Self = Self { dx: 0, dy: 0 };
}

/// Infinite iterator over spiral offsets, starting at the center.
///
/// Walks a square spiral that visits each ring fully before moving to the
/// next: `(0,0), (1,0), (1,1), (0,1), (-1,1), (-1,0), (-1,-1), ...`.
#[derive(Debug, Clone)]
pub struct Spiral {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl Spiral {
    /// Create a spiral iterator positioned at the center.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            dx: 0,
            dy: -1,
        }
    }
}

impl Default for Spiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Spiral {
    type Item = SpiralOffset;

    fn next(&mut self) -> Option<SpiralOffset> {
        let current = SpiralOffset {
            dx: self.x,
            dy: self.y,
        };

        // Turn 90 degrees at the spiral's corners: on the two diagonals, and
        // one step past the positive-x diagonal so each ring grows by one.
        let corner = self.x == self.y
            || (self.x < 0 && self.x == -self.y)
            || (self.x > 0 && self.x == 1 - self.y);
        if corner {
            (self.dx, self.dy) = (-self.dy, self.dx);
        }

        self.x += self.dx;
        self.y += self.dy;

        Some(current)
    }
}

/// Collect the first `length` offsets of the spiral.
///
/// `spiral_offsets(n)` is always a prefix of `spiral_offsets(n + k)`.
#[must_use]
pub fn spiral_offsets(length: usize) -> Vec<SpiralOffset> {
    Spiral::new().take(length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_starts_at_center() {
        assert_eq!(spiral_offsets(1), vec![SpiralOffset::CENTER]);
    }

    #[test]
    fn test_empty() {
        assert!(spiral_offsets(0).is_empty());
    }

    #[test]
    fn test_first_ring() {
        let offsets = spiral_offsets(9);
        assert_eq!(
            offsets,
            vec![
                SpiralOffset { dx: 0, dy: 0 },
                SpiralOffset { dx: 1, dy: 0 },
                SpiralOffset { dx: 1, dy: 1 },
                SpiralOffset { dx: 0, dy: 1 },
                SpiralOffset { dx: -1, dy: 1 },
                SpiralOffset { dx: -1, dy: 0 },
                SpiralOffset { dx: -1, dy: -1 },
                SpiralOffset { dx: 0, dy: -1 },
                SpiralOffset { dx: 1, dy: -1 },
            ]
        );
    }

    #[test]
    fn test_rings_are_complete() {
        // The first 25 offsets cover the full 5x5 block around the center.
        let offsets: HashSet<_> = spiral_offsets(25).into_iter().collect();
        assert_eq!(offsets.len(), 25);
        for dx in -2..=2 {
            for dy in -2..=2 {
                assert!(offsets.contains(&SpiralOffset { dx, dy }));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_exact_length(length in 0usize..500) {
            prop_assert_eq!(spiral_offsets(length).len(), length);
        }

        #[test]
        fn prop_prefix_stable(length in 0usize..200, extra in 0usize..200) {
            let short = spiral_offsets(length);
            let long = spiral_offsets(length + extra);
            prop_assert_eq!(&short[..], &long[..length]);
        }

        #[test]
        fn prop_offsets_distinct(length in 0usize..500) {
            let offsets = spiral_offsets(length);
            let unique: HashSet<_> = offsets.iter().copied().collect();
            prop_assert_eq!(unique.len(), offsets.len());
        }
    }
}
