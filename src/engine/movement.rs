//! The movement-range calculator.
//!
//! A movement-point budget converts to a required minimum of orthogonal
//! steps and a cap on diagonal steps; the reachable set is found by
//! breadth-first search over `(cell, orthogonal-taken, diagonal-taken)`
//! states. Dedup must key on the full tuple: the same cell reached with a
//! different orthogonal/diagonal split can be differently valid.
//!
//! Pure and deterministic - randomness, if any, is applied by the caller
//! choosing among the returned cells.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::core::BoardSpace;

/// Step-mix constraint for a movement-point budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementBudget {
    pub min_orthogonal: u32,
    pub max_diagonal: u32,
}

impl MovementBudget {
    /// The fixed budget table.
    #[must_use]
    pub const fn for_points(movement_points: u32) -> Self {
        let (min_orthogonal, max_diagonal) = match movement_points {
            1 => (1, 0),
            2 => (1, 1),
            3 => (2, 1),
            4 => (2, 2),
            5 => (3, 2),
            mp => (mp.div_ceil(2), mp / 2),
        };
        Self {
            min_orthogonal,
            max_diagonal,
        }
    }
}

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Every cell reachable from `start` by spending exactly `movement_points`
/// steps under the step-mix constraint, sorted and deduplicated by cell.
///
/// The start cell is never part of the result even when a step sequence
/// loops back onto it. Callers handle a zero budget themselves; this
/// function returns empty for it.
#[must_use]
pub fn valid_moves(
    start: BoardSpace,
    movement_points: u32,
    board_size: BoardSpace,
) -> Vec<BoardSpace> {
    if movement_points == 0 {
        return Vec::new();
    }

    let budget = MovementBudget::for_points(movement_points);

    let mut endpoints: FxHashSet<BoardSpace> = FxHashSet::default();
    let mut visited: FxHashSet<(i32, i32, u32, u32)> = FxHashSet::default();
    let mut frontier: VecDeque<(BoardSpace, u32, u32)> = VecDeque::new();

    visited.insert((start.x, start.y, 0, 0));
    frontier.push_back((start, 0, 0));

    while let Some((cell, orth, diag)) = frontier.pop_front() {
        if orth + diag == movement_points {
            if orth >= budget.min_orthogonal && cell != start {
                endpoints.insert(cell);
            }
            continue;
        }

        for &(dx, dy) in &ORTHOGONAL {
            let next = BoardSpace::new(cell.x + dx, cell.y + dy);
            if next.in_bounds(board_size) && visited.insert((next.x, next.y, orth + 1, diag)) {
                frontier.push_back((next, orth + 1, diag));
            }
        }

        if diag < budget.max_diagonal {
            for &(dx, dy) in &DIAGONAL {
                let next = BoardSpace::new(cell.x + dx, cell.y + dy);
                if next.in_bounds(board_size) && visited.insert((next.x, next.y, orth, diag + 1)) {
                    frontier.push_back((next, orth, diag + 1));
                }
            }
        }
    }

    let mut out: Vec<BoardSpace> = endpoints.into_iter().collect();
    out.sort_unstable();
    out
}
