// Threat model: how other snakes relate to us and where they might move next

use crate::grid;
use crate::safety;
use crate::snapshot::{Snake, Snapshot};
use crate::types::Coord;

/// Opponent indices grouped by length relative to the acting snake
#[derive(Debug, Clone, Default)]
pub struct ThreatClasses {
    /// Length >= ours: a head-on collision kills us
    pub lethal: Vec<usize>,
    /// Length > ours: used when weighing head-shots, where ties are accepted
    pub larger: Vec<usize>,
    /// Length < ours: head-on collisions go our way
    pub smaller: Vec<usize>,
}

/// Which opponents count as dangerous when filtering moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    Lethal,
    Larger,
}

pub fn classify(snakes: &[Snake], you: usize) -> ThreatClasses {
    let our_len = snakes[you].len();
    let mut classes = ThreatClasses::default();

    for (i, snake) in snakes.iter().enumerate() {
        if i == you {
            continue;
        }
        if snake.len() >= our_len {
            classes.lethal.push(i);
        } else {
            classes.smaller.push(i);
        }
        if snake.len() > our_len {
            classes.larger.push(i);
        }
    }

    classes
}

impl ThreatClasses {
    pub fn for_level(&self, level: ThreatLevel) -> &[usize] {
        match level {
            ThreatLevel::Lethal => &self.lethal,
            ThreatLevel::Larger => &self.larger,
        }
    }
}

/// True if `node` is one step from the head of any of `snakes`
pub fn is_immediate_threat(snapshot: &Snapshot, snakes: &[usize], node: Coord) -> bool {
    snakes
        .iter()
        .any(|&i| grid::manhattan(snapshot.snake(i).head(), node) == 1)
}

/// Best guess at where a snake's head goes next
///
/// Keeps the snake's current heading when that step is legal, otherwise takes
/// the first legal step. None when the snake has nowhere to go.
pub fn predict_next_head(snapshot: &Snapshot, idx: usize) -> Option<Coord> {
    let snake = snapshot.snake(idx);
    let head = snake.head();
    let options = safety::valid_neighbors(snapshot, head, 0);

    if snake.len() >= 2 {
        let neck = snake.body[1];
        let forward = Coord::new(2 * head.x - neck.x, 2 * head.y - neck.y);
        if neck != head && options.contains(&forward) {
            return Some(forward);
        }
    }

    options.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    fn snapshot(snakes: Vec<Snake>) -> Snapshot {
        Snapshot::new(7, 7, snakes, vec![], "me").unwrap()
    }

    #[test]
    fn test_classify_by_length() {
        let snap = snapshot(vec![
            Snake::new("me", 90, vec![c(0, 0), c(0, 1), c(0, 2)]),
            Snake::new("equal", 90, vec![c(3, 0), c(3, 1), c(3, 2)]),
            Snake::new("big", 90, vec![c(5, 0), c(5, 1), c(5, 2), c(5, 3)]),
            Snake::new("small", 90, vec![c(6, 6), c(6, 5)]),
        ]);
        let classes = snap.threats();
        assert_eq!(classes.lethal, vec![1, 2]);
        assert_eq!(classes.larger, vec![2]);
        assert_eq!(classes.smaller, vec![3]);
    }

    #[test]
    fn test_immediate_threat_is_one_step_from_head() {
        let snap = snapshot(vec![
            Snake::new("me", 90, vec![c(0, 0), c(0, 1)]),
            Snake::new("enemy", 90, vec![c(3, 3), c(3, 4), c(3, 5)]),
        ]);
        let lethal = snap.threats().lethal.clone();
        assert!(is_immediate_threat(&snap, &lethal, c(2, 3)));
        assert!(is_immediate_threat(&snap, &lethal, c(3, 2)));
        assert!(!is_immediate_threat(&snap, &lethal, c(3, 3)));
        assert!(!is_immediate_threat(&snap, &lethal, c(1, 3)));
        assert!(!is_immediate_threat(&snap, &[], c(2, 3)));
    }

    #[test]
    fn test_predict_keeps_heading() {
        let snap = snapshot(vec![
            Snake::new("me", 90, vec![c(0, 0), c(0, 1)]),
            // moving right along y=3
            Snake::new("enemy", 90, vec![c(3, 3), c(2, 3), c(1, 3)]),
        ]);
        assert_eq!(predict_next_head(&snap, 1), Some(c(4, 3)));
    }

    #[test]
    fn test_predict_turns_at_wall() {
        let snap = snapshot(vec![
            Snake::new("me", 90, vec![c(0, 0), c(0, 1)]),
            // heading right into the east wall
            Snake::new("enemy", 90, vec![c(6, 3), c(5, 3), c(4, 3)]),
        ]);
        let next = predict_next_head(&snap, 1).unwrap();
        assert_ne!(next, c(7, 3));
        assert_eq!(grid::manhattan(next, c(6, 3)), 1);
    }

    #[test]
    fn test_predict_none_when_boxed_in() {
        let snap = Snapshot::new(
            3,
            1,
            vec![
                Snake::new("me", 90, vec![c(0, 0), c(0, 0)]),
                Snake::new("enemy", 90, vec![c(1, 0), c(2, 0), c(2, 0)]),
            ],
            vec![],
            "me",
        )
        .unwrap();
        assert_eq!(predict_next_head(&snap, 1), None);
    }
}
