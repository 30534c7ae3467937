// Shared helpers for integration tests: board construction and ASCII rendering

#![allow(dead_code)]

use come_slither::types::{Battlesnake, Board, Coord, Game};
use std::collections::HashMap;

pub fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
    }
}

pub fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

pub fn board(width: i32, height: i32, snakes: Vec<Battlesnake>, food: &[(i32, i32)]) -> Board {
    Board {
        width,
        height,
        food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        snakes,
        hazards: vec![],
    }
}

/// Top row is the highest y; heads are upper-case, bodies lower-case, food is '*'
pub fn render(board: &Board) -> String {
    let mut rows = vec![vec!['.'; board.width as usize]; board.height as usize];
    let mut put = |c: &Coord, ch: char| {
        if c.x >= 0 && c.x < board.width && c.y >= 0 && c.y < board.height {
            rows[(board.height - 1 - c.y) as usize][c.x as usize] = ch;
        }
    };

    for f in &board.food {
        put(f, '*');
    }
    for (i, s) in board.snakes.iter().enumerate() {
        let letter = (b'a' + (i % 26) as u8) as char;
        for segment in s.body.iter().skip(1) {
            put(segment, letter);
        }
        if let Some(head) = s.body.first() {
            put(head, letter.to_ascii_uppercase());
        }
    }

    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
