// Reachable-space estimator
//
// Breadth-first flood fill where every layer sees the board one turn later:
// a node discovered at distance d expands with tail trim d, so bodies shrink
// while the fill spreads. Layers are processed as whole sets, which keeps the
// count independent of neighbour order.

use std::collections::VecDeque;

use crate::safety;
use crate::simple_profiler::ProfileGuard;
use crate::snapshot::Snapshot;
use crate::threat::ThreatLevel;
use crate::types::Coord;

/// Neighbour rule used while filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Any valid neighbour; only used when nothing pessimistic is available
    Optimistic,
    /// Safe neighbours only; used to decide whether a path can be committed to
    Pessimistic,
}

/// Number of distinct cells reachable from `origin`, origin included
///
/// `origin_depth` is how many turns from now the fill starts, e.g. 1 when the
/// origin is the first step of a path. A wall origin reaches nothing.
pub fn reachable_space(
    snapshot: &Snapshot,
    origin: Coord,
    expansion: Expansion,
    origin_depth: usize,
) -> usize {
    let _guard = ProfileGuard::new("flood_fill");

    let origin_key = match snapshot.key(origin) {
        Some(k) => k,
        None => return 0,
    };

    let mut seen = vec![false; snapshot.cell_count()];
    let mut queue = VecDeque::new();
    seen[origin_key] = true;
    queue.push_back((origin, 0usize));
    let mut count = 1;

    while let Some((node, distance)) = queue.pop_front() {
        let trim = origin_depth + distance;
        let next = match expansion {
            Expansion::Optimistic => safety::valid_neighbors(snapshot, node, trim),
            Expansion::Pessimistic => {
                safety::safe_neighbors(snapshot, node, ThreatLevel::Lethal, trim)
            }
        };

        for n in next {
            if let Some(key) = snapshot.key(n) {
                if !seen[key] {
                    seen[key] = true;
                    count += 1;
                    queue.push_back((n, distance + 1));
                }
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snake;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_empty_board_is_fully_reachable() {
        let snap = Snapshot::new(5, 5, vec![Snake::new("me", 90, vec![c(0, 0)])], vec![], "me")
            .unwrap();
        assert_eq!(reachable_space(&snap, c(2, 2), Expansion::Optimistic, 0), 25);
        assert_eq!(reachable_space(&snap, c(2, 2), Expansion::Pessimistic, 0), 25);
    }

    #[test]
    fn test_wall_origin_reaches_nothing() {
        let snap = Snapshot::new(5, 5, vec![Snake::new("me", 90, vec![c(0, 0)])], vec![], "me")
            .unwrap();
        assert_eq!(reachable_space(&snap, c(-1, 2), Expansion::Optimistic, 0), 0);
    }

    #[test]
    fn test_growing_wall_splits_board() {
        // column 2 is a growing snake; its pinned tail never clears and the
        // upper segments clear only after the pocket has been exhausted
        let body = vec![c(2, 0), c(2, 1), c(2, 2), c(2, 2)];
        let snap = Snapshot::new(
            5,
            3,
            vec![
                Snake::new("me", 90, vec![c(0, 0)]),
                Snake::new("wall", 90, body),
            ],
            vec![],
            "me",
        )
        .unwrap();
        assert_eq!(reachable_space(&snap, c(0, 1), Expansion::Optimistic, 0), 6);
    }

    #[test]
    fn test_pocket_smaller_than_body() {
        // own body forms a U around (0,0) with a growing tail plugging the exit
        let body = vec![
            c(1, 1),
            c(1, 0),
            c(2, 0),
            c(3, 0),
            c(3, 1),
            c(3, 2),
            c(2, 2),
            c(1, 2),
            c(0, 2),
            c(0, 1),
            c(0, 1),
        ];
        let snap = Snapshot::new(5, 5, vec![Snake::new("me", 90, body)], vec![], "me").unwrap();
        assert_eq!(reachable_space(&snap, c(0, 0), Expansion::Optimistic, 1), 1);
    }

    #[test]
    fn test_tail_vacates_as_fill_spreads() {
        // one-wide corridor: each layer frees the next body segment in time
        let body = vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)];
        let snap = Snapshot::new(5, 1, vec![Snake::new("me", 90, body)], vec![], "me").unwrap();
        assert_eq!(reachable_space(&snap, c(4, 0), Expansion::Optimistic, 0), 5);
    }

    #[test]
    fn test_growing_tail_blocks_corridor() {
        let body = vec![c(0, 0), c(1, 0), c(2, 0), c(2, 0)];
        let snap = Snapshot::new(4, 1, vec![Snake::new("me", 90, body)], vec![], "me").unwrap();
        assert_eq!(reachable_space(&snap, c(3, 0), Expansion::Optimistic, 5), 1);
    }

    #[test]
    fn test_repeat_runs_are_stable() {
        let snap = Snapshot::new(
            7,
            7,
            vec![
                Snake::new("me", 90, vec![c(3, 3), c(3, 2), c(3, 1)]),
                Snake::new("enemy", 90, vec![c(5, 5), c(5, 4), c(4, 4), c(4, 5)]),
            ],
            vec![c(1, 1)],
            "me",
        )
        .unwrap();
        let first = reachable_space(&snap, c(2, 3), Expansion::Pessimistic, 1);
        for _ in 0..5 {
            assert_eq!(reachable_space(&snap, c(2, 3), Expansion::Pessimistic, 1), first);
        }
    }

    #[test]
    fn test_pessimistic_never_exceeds_optimistic() {
        let snap = Snapshot::new(
            7,
            7,
            vec![
                Snake::new("me", 90, vec![c(0, 3), c(0, 2)]),
                Snake::new("enemy", 90, vec![c(3, 3), c(3, 2), c(3, 1)]),
            ],
            vec![],
            "me",
        )
        .unwrap();
        let pessimistic = reachable_space(&snap, c(1, 3), Expansion::Pessimistic, 1);
        let optimistic = reachable_space(&snap, c(1, 3), Expansion::Optimistic, 1);
        assert!(pessimistic <= optimistic);
    }
}
