// Immutable per-turn view of the board
//
// Every engine query reads from a Snapshot built once from the inbound request.
// Cells are addressed by a packed key (y * width + x); per-cell tables replace
// the linear body scans the wire types would otherwise force on us.

use crate::threat::{self, ThreatClasses};
use crate::types::{Board, Coord};

/// Largest accepted board side
pub const MAX_BOARD_SIDE: i32 = 1024;

/// A snake reduced to what the engine needs
#[derive(Debug, Clone)]
pub struct Snake {
    pub id: String,
    pub health: i32,
    /// Head first, never empty inside a Snapshot
    pub body: Vec<Coord>,
}

impl Snake {
    pub fn new(id: &str, health: i32, body: Vec<Coord>) -> Self {
        Snake {
            id: id.to_string(),
            health,
            body,
        }
    }

    pub fn head(&self) -> Coord {
        self.body[0]
    }

    pub fn tail(&self) -> Coord {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// A duplicated tail segment means the tail stays put next turn
    pub fn is_growing(&self) -> bool {
        let n = self.body.len();
        n >= 2 && self.body[n - 1] == self.body[n - 2]
    }
}

/// Validated, read-only turn state
#[derive(Debug, Clone)]
pub struct Snapshot {
    width: i32,
    height: i32,
    snakes: Vec<Snake>,
    you: usize,
    food: Vec<Coord>,
    food_cells: Vec<bool>,
    /// Number of turns until the cell is vacated, 0 when empty
    vacates_in: Vec<usize>,
    /// Tails of growing snakes stay occupied under any tail trim
    pinned: Vec<bool>,
    threats: ThreatClasses,
}

impl Snapshot {
    /// Builds a snapshot, rejecting malformed input
    ///
    /// Other snakes that are dead or have no body are dropped; the acting snake
    /// must be present with at least one segment.
    pub fn new(
        width: i32,
        height: i32,
        snakes: Vec<Snake>,
        food: Vec<Coord>,
        you_id: &str,
    ) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!(
                "Board dimensions must be positive, got {}x{}",
                width, height
            ));
        }
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(format!(
                "Board dimensions {}x{} exceed the {} cell limit per side",
                width, height, MAX_BOARD_SIDE
            ));
        }

        let snakes: Vec<Snake> = snakes
            .into_iter()
            .filter(|s| s.id == you_id || (s.health > 0 && !s.is_empty()))
            .collect();

        let you = snakes
            .iter()
            .position(|s| s.id == you_id)
            .ok_or_else(|| format!("Acting snake '{}' not found on the board", you_id))?;

        if snakes[you].is_empty() {
            return Err(format!("Acting snake '{}' has an empty body", you_id));
        }

        let cells = width as usize * height as usize;
        let mut snapshot = Snapshot {
            width,
            height,
            snakes,
            you,
            food: Vec::new(),
            food_cells: vec![false; cells],
            vacates_in: vec![0; cells],
            pinned: vec![false; cells],
            threats: ThreatClasses::default(),
        };

        for f in food {
            if let Some(key) = snapshot.key(f) {
                if !snapshot.food_cells[key] {
                    snapshot.food_cells[key] = true;
                    snapshot.food.push(f);
                }
            }
        }

        for snake in &snapshot.snakes {
            let len = snake.len();
            for (i, segment) in snake.body.iter().enumerate() {
                if let Some(key) = snapshot.key(*segment) {
                    snapshot.vacates_in[key] = snapshot.vacates_in[key].max(len - i);
                }
            }
            if snake.is_growing() {
                if let Some(key) = snapshot.key(snake.tail()) {
                    snapshot.pinned[key] = true;
                }
            }
        }

        snapshot.threats = threat::classify(&snapshot.snakes, snapshot.you);
        Ok(snapshot)
    }

    /// Converts the wire board into a snapshot for the snake with `you_id`
    pub fn from_board(board: &Board, you_id: &str) -> Result<Self, String> {
        let snakes = board
            .snakes
            .iter()
            .map(|s| Snake::new(&s.id, s.health, s.body.clone()))
            .collect();
        Snapshot::new(
            board.width,
            board.height,
            snakes,
            board.food.clone(),
            you_id,
        )
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Packed cell key, None for cells off the board
    pub fn key(&self, c: Coord) -> Option<usize> {
        if c.x < 0 || c.x >= self.width || c.y < 0 || c.y >= self.height {
            None
        } else {
            Some((c.y * self.width + c.x) as usize)
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    pub fn snake(&self, idx: usize) -> &Snake {
        &self.snakes[idx]
    }

    pub fn you(&self) -> &Snake {
        &self.snakes[self.you]
    }

    pub fn you_index(&self) -> usize {
        self.you
    }

    /// Every snake except the acting one, with its index
    pub fn others(&self) -> impl Iterator<Item = (usize, &Snake)> + '_ {
        let you = self.you;
        self.snakes
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != you)
    }

    pub fn food(&self) -> &[Coord] {
        &self.food
    }

    pub fn is_food(&self, c: Coord) -> bool {
        self.key(c).map_or(false, |k| self.food_cells[k])
    }

    pub fn threats(&self) -> &ThreatClasses {
        &self.threats
    }

    /// Turns until the cell empties (0 when already empty or off-board)
    pub fn vacates_in(&self, c: Coord) -> usize {
        self.key(c).map_or(0, |k| self.vacates_in[k])
    }

    /// True for the tail cell of a growing snake
    pub fn is_pinned(&self, c: Coord) -> bool {
        self.key(c).map_or(false, |k| self.pinned[k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let snakes = vec![Snake::new("me", 100, vec![c(0, 0)])];
        assert!(Snapshot::new(0, 5, snakes.clone(), vec![], "me").is_err());
        assert!(Snapshot::new(5, -1, snakes, vec![], "me").is_err());
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        let snakes = vec![Snake::new("me", 100, vec![c(0, 0)])];
        assert!(Snapshot::new(i32::MAX, i32::MAX, snakes.clone(), vec![], "me").is_err());
        assert!(Snapshot::new(100_000, 100_000, snakes.clone(), vec![], "me").is_err());
        assert!(Snapshot::new(MAX_BOARD_SIDE + 1, 5, snakes.clone(), vec![], "me").is_err());

        let widest = Snapshot::new(MAX_BOARD_SIDE, 1, snakes, vec![], "me").unwrap();
        assert_eq!(widest.cell_count(), MAX_BOARD_SIDE as usize);
    }

    #[test]
    fn test_rejects_missing_or_empty_acting_snake() {
        let snakes = vec![Snake::new("other", 100, vec![c(0, 0)])];
        assert!(Snapshot::new(5, 5, snakes, vec![], "me").is_err());

        let snakes = vec![Snake::new("me", 100, vec![])];
        assert!(Snapshot::new(5, 5, snakes, vec![], "me").is_err());
    }

    #[test]
    fn test_drops_dead_opponents() {
        let snakes = vec![
            Snake::new("me", 100, vec![c(0, 0)]),
            Snake::new("dead", 0, vec![c(3, 3)]),
            Snake::new("ghost", 50, vec![]),
        ];
        let snap = Snapshot::new(5, 5, snakes, vec![], "me").unwrap();
        assert_eq!(snap.snakes().len(), 1);
        assert_eq!(snap.vacates_in(c(3, 3)), 0);
    }

    #[test]
    fn test_vacate_countdown_follows_body_order() {
        let snakes = vec![Snake::new("me", 100, vec![c(2, 2), c(2, 1), c(2, 0)])];
        let snap = Snapshot::new(5, 5, snakes, vec![], "me").unwrap();
        assert_eq!(snap.vacates_in(c(2, 2)), 3);
        assert_eq!(snap.vacates_in(c(2, 1)), 2);
        assert_eq!(snap.vacates_in(c(2, 0)), 1);
        assert_eq!(snap.vacates_in(c(4, 4)), 0);
    }

    #[test]
    fn test_growing_tail_is_pinned() {
        let snakes = vec![Snake::new("me", 100, vec![c(2, 2), c(2, 1), c(2, 1)])];
        let snap = Snapshot::new(5, 5, snakes, vec![], "me").unwrap();
        assert!(snap.you().is_growing());
        assert!(snap.is_pinned(c(2, 1)));
        assert!(!snap.is_pinned(c(2, 2)));
    }

    #[test]
    fn test_food_off_board_is_ignored() {
        let snakes = vec![Snake::new("me", 100, vec![c(0, 0)])];
        let snap = Snapshot::new(3, 3, snakes, vec![c(1, 1), c(5, 5), c(1, 1)], "me").unwrap();
        assert_eq!(snap.food(), &[c(1, 1)]);
        assert!(snap.is_food(c(1, 1)));
        assert!(!snap.is_food(c(5, 5)));
    }

    #[test]
    fn test_packed_key_layout() {
        let snakes = vec![Snake::new("me", 100, vec![c(0, 0)])];
        let snap = Snapshot::new(4, 3, snakes, vec![], "me").unwrap();
        assert_eq!(snap.key(c(0, 0)), Some(0));
        assert_eq!(snap.key(c(3, 2)), Some(11));
        assert_eq!(snap.key(c(4, 0)), None);
        assert_eq!(snap.key(c(0, -1)), None);
        assert_eq!(snap.cell_count(), 12);
    }
}
