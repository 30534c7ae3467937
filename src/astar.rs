//! Time-boxed best-first search
//!
//! Frontier order is `g + h` where `g` accumulates the distance function and `h`
//! is whatever risk estimate the caller supplies. The search is not anytime: a
//! blown deadline yields [`SearchOutcome::TimedOut`] and no partial path.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::time::Instant;

use crate::simple_profiler::ProfileGuard;

/// Everything one search needs
///
/// `neighbors` receives the number of steps already taken from `start` so
/// callers can model bodies shrinking as time passes along the path.
pub struct SearchSpec<'a, N> {
    pub start: N,
    pub is_goal: &'a dyn Fn(N) -> bool,
    pub neighbors: &'a dyn Fn(N, usize) -> Vec<N>,
    pub distance: &'a dyn Fn(N, N) -> i32,
    pub heuristic: &'a dyn Fn(N) -> i32,
    pub deadline: Instant,
}

/// A path from start to goal, both inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPath<N> {
    pub path: Vec<N>,
    /// `g + h` at the goal
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<N> {
    Found(FoundPath<N>),
    /// Frontier emptied without reaching a goal
    Exhausted,
    /// Deadline passed before a goal was reached
    TimedOut,
}

impl<N> SearchOutcome<N> {
    pub fn found(self) -> Option<FoundPath<N>> {
        match self {
            SearchOutcome::Found(found) => Some(found),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "success",
            SearchOutcome::Exhausted => "failure",
            SearchOutcome::TimedOut => "timeout",
        }
    }
}

struct Record<N> {
    node: N,
    parent: Option<usize>,
    g: i32,
    steps: usize,
}

/// Heap entry; ordered so the smallest f pops first, oldest first on ties
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: i32,
    seq: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn search<N: Copy + Eq + Hash>(spec: &SearchSpec<'_, N>) -> SearchOutcome<N> {
    let _guard = ProfileGuard::new("astar");

    // records double as the sequence numbers for heap tie-breaks
    let mut records: Vec<Record<N>> = Vec::new();
    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<N, i32> = HashMap::new();
    let mut closed: HashMap<N, i32> = HashMap::new();

    records.push(Record {
        node: spec.start,
        parent: None,
        g: 0,
        steps: 0,
    });
    best_g.insert(spec.start, 0);
    open.push(OpenEntry {
        f: (spec.heuristic)(spec.start),
        seq: 0,
    });

    while let Some(entry) = open.pop() {
        if Instant::now() >= spec.deadline {
            return SearchOutcome::TimedOut;
        }

        let (node, g, steps) = {
            let r = &records[entry.seq];
            (r.node, r.g, r.steps)
        };

        if closed.get(&node).map_or(false, |&closed_g| closed_g <= g) {
            continue;
        }
        closed.insert(node, g);

        if (spec.is_goal)(node) {
            return SearchOutcome::Found(FoundPath {
                path: reconstruct(&records, entry.seq),
                cost: g + (spec.heuristic)(node),
            });
        }

        for next in (spec.neighbors)(node, steps) {
            let next_g = g + (spec.distance)(node, next);
            if closed.get(&next).map_or(false, |&closed_g| closed_g <= next_g) {
                continue;
            }
            if best_g.get(&next).map_or(false, |&known| known <= next_g) {
                continue;
            }
            best_g.insert(next, next_g);

            let seq = records.len();
            records.push(Record {
                node: next,
                parent: Some(entry.seq),
                g: next_g,
                steps: steps + 1,
            });
            open.push(OpenEntry {
                f: next_g + (spec.heuristic)(next),
                seq,
            });
        }
    }

    SearchOutcome::Exhausted
}

fn reconstruct<N: Copy>(records: &[Record<N>], mut idx: usize) -> Vec<N> {
    let mut path = vec![records[idx].node];
    while let Some(parent) = records[idx].parent {
        path.push(records[parent].node);
        idx = parent;
    }
    path.reverse();
    path
}
