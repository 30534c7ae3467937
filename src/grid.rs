// Grid topology: pure coordinate queries with no state of their own

use crate::snapshot::Snapshot;
use crate::types::{Coord, Direction};

/// The four orthogonal neighbours in up/down/left/right order
pub fn neighbors(node: Coord) -> [Coord; 4] {
    let dirs = Direction::all();
    [
        dirs[0].apply(&node),
        dirs[1].apply(&node),
        dirs[2].apply(&node),
        dirs[3].apply(&node),
    ]
}

pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn is_wall(snapshot: &Snapshot, node: Coord) -> bool {
    snapshot.key(node).is_none()
}

/// Occupancy after `tail_trim` turns have passed
///
/// A body segment with `k` segments behind it (itself included) is gone after
/// `k` turns, so it only counts while `k > tail_trim`. Tails of growing snakes
/// never clear.
pub fn is_occupied(snapshot: &Snapshot, node: Coord, tail_trim: usize) -> bool {
    snapshot.is_pinned(node) || snapshot.vacates_in(node) > tail_trim
}
