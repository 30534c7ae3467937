// Safety filter: which neighbours of a cell may be stepped onto

use crate::grid;
use crate::snapshot::Snapshot;
use crate::threat::{self, ThreatLevel};
use crate::types::Coord;

/// Neighbours that are on the board and free after `tail_trim` turns
///
/// The segment that becomes the tail at `tail_trim` is passable because it
/// moves away as we arrive, unless its snake is growing.
pub fn valid_neighbors(snapshot: &Snapshot, node: Coord, tail_trim: usize) -> Vec<Coord> {
    grid::neighbors(node)
        .iter()
        .copied()
        .filter(|&n| !grid::is_wall(snapshot, n) && !grid::is_occupied(snapshot, n, tail_trim + 1))
        .collect()
}

/// Valid neighbours that a dangerous snake cannot also reach next turn
///
/// Food next to a lethal head is always dropped as bait, even when `level`
/// only avoids strictly larger snakes.
pub fn safe_neighbors(
    snapshot: &Snapshot,
    node: Coord,
    level: ThreatLevel,
    tail_trim: usize,
) -> Vec<Coord> {
    let threats = snapshot.threats();
    let dangerous = threats.for_level(level);

    valid_neighbors(snapshot, node, tail_trim)
        .into_iter()
        .filter(|&n| !threat::is_immediate_threat(snapshot, dangerous, n))
        .filter(|&n| {
            !(snapshot.is_food(n) && threat::is_immediate_threat(snapshot, &threats.lethal, n))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snake;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_valid_excludes_walls_and_bodies() {
        let snap = Snapshot::new(
            5,
            5,
            vec![Snake::new("me", 90, vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1)])],
            vec![],
            "me",
        )
        .unwrap();
        let n = valid_neighbors(&snap, c(0, 0), 0);
        assert_eq!(n, vec![c(0, 1)]);
    }

    #[test]
    fn test_moving_tail_is_passable() {
        let snap = Snapshot::new(
            5,
            5,
            vec![Snake::new("me", 90, vec![c(1, 1), c(1, 0), c(0, 0), c(0, 1)])],
            vec![],
            "me",
        )
        .unwrap();
        assert!(valid_neighbors(&snap, c(1, 1), 0).contains(&c(0, 1)));
    }

    #[test]
    fn test_growing_tail_is_never_passable() {
        let snap = Snapshot::new(
            5,
            5,
            vec![Snake::new("me", 90, vec![c(1, 1), c(1, 0), c(0, 0), c(0, 1), c(0, 1)])],
            vec![],
            "me",
        )
        .unwrap();
        for trim in 0..10 {
            assert!(!valid_neighbors(&snap, c(1, 1), trim).contains(&c(0, 1)));
        }
    }

    #[test]
    fn test_safe_excludes_cells_next_to_lethal_heads() {
        let snap = Snapshot::new(
            7,
            7,
            vec![
                Snake::new("me", 90, vec![c(3, 3), c(3, 2), c(3, 1)]),
                Snake::new("enemy", 90, vec![c(5, 3), c(5, 2), c(5, 1)]),
            ],
            vec![],
            "me",
        )
        .unwrap();
        let safe = safe_neighbors(&snap, c(3, 3), ThreatLevel::Lethal, 0);
        assert!(!safe.contains(&c(4, 3)));
        assert!(safe.contains(&c(2, 3)));
        assert!(safe.contains(&c(3, 4)));
    }

    #[test]
    fn test_larger_level_ignores_equal_snakes_but_not_bait() {
        let snap = Snapshot::new(
            7,
            7,
            vec![
                Snake::new("me", 90, vec![c(3, 3), c(3, 2), c(3, 1)]),
                Snake::new("enemy", 90, vec![c(5, 3), c(5, 2), c(5, 1)]),
            ],
            vec![c(5, 4)],
            "me",
        )
        .unwrap();
        let safe = safe_neighbors(&snap, c(3, 3), ThreatLevel::Larger, 0);
        assert!(safe.contains(&c(4, 3)));

        let around_food = safe_neighbors(&snap, c(4, 4), ThreatLevel::Larger, 0);
        assert!(!around_food.contains(&c(5, 4)));
    }

    #[test]
    fn test_smaller_snakes_are_not_threats() {
        let snap = Snapshot::new(
            7,
            7,
            vec![
                Snake::new("me", 90, vec![c(3, 3), c(3, 2), c(3, 1)]),
                Snake::new("small", 90, vec![c(5, 3), c(5, 2)]),
            ],
            vec![],
            "me",
        )
        .unwrap();
        let safe = safe_neighbors(&snap, c(3, 3), ThreatLevel::Lethal, 0);
        assert!(safe.contains(&c(4, 3)));
    }
}
