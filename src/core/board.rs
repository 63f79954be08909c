//! Board geometry.
//!
//! The board is a rectangular grid of cells addressed by 1-indexed `(x, y)`
//! coordinates. All positions in the engine - the Harbinger, named
//! locations, objects, NPCs - use [`BoardSpace`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single board cell, 1-indexed on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSpace {
    pub x: i32,
    pub y: i32,
}

impl BoardSpace {
    /// Create a board cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check whether this cell lies on a board of the given size.
    #[must_use]
    pub const fn in_bounds(self, size: BoardSpace) -> bool {
        self.x >= 1 && self.y >= 1 && self.x <= size.x && self.y <= size.y
    }

    /// Chebyshev (king-move) distance to another cell.
    #[must_use]
    pub fn distance(self, other: BoardSpace) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// One king-move step toward `target`. Returns `self` when already there.
    #[must_use]
    pub fn step_toward(self, target: BoardSpace) -> BoardSpace {
        BoardSpace {
            x: self.x + (target.x - self.x).signum(),
            y: self.y + (target.y - self.y).signum(),
        }
    }

    /// One king-move step directly away from `target`, clamped to the board.
    #[must_use]
    pub fn step_away(self, target: BoardSpace, size: BoardSpace) -> BoardSpace {
        let stepped = BoardSpace {
            x: self.x - (target.x - self.x).signum(),
            y: self.y - (target.y - self.y).signum(),
        };
        BoardSpace {
            x: stepped.x.clamp(1, size.x),
            y: stepped.y.clamp(1, size.y),
        }
    }

    /// The in-bounds cells among this cell's 8 neighbors.
    #[must_use]
    pub fn neighbors(self, size: BoardSpace) -> SmallVec<[BoardSpace; 8]> {
        let mut out = SmallVec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = BoardSpace::new(self.x + dx, self.y + dy);
                if next.in_bounds(size) {
                    out.push(next);
                }
            }
        }
        out
    }

    /// Check whether this cell sits on the outermost ring of the board.
    #[must_use]
    pub const fn on_rim(self, size: BoardSpace) -> bool {
        self.x == 1 || self.y == 1 || self.x == size.x || self.y == size.y
    }
}

impl std::fmt::Display for BoardSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
