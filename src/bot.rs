// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The bot turns each request into a Snapshot and runs the planner off the
// async executor.

use log::{info, warn};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::planner;
use crate::simple_profiler;
use crate::snapshot::Snapshot;
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a bot without move logging
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes, you: {})",
            game.id,
            board.width,
            board.height,
            board.snakes.len(),
            you.id
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME OVER {} after {} turns (health {})", game.id, turn, you.health);
    }

    /// Computes the next move for `you`
    /// Corresponds to POST /move endpoint
    ///
    /// The planner is CPU-bound, so it runs on tokio's blocking pool and fans
    /// its own searches out over rayon.
    ///
    /// # Returns
    /// * `Ok(Value)` - `{"move": ..., "shout": ...}`
    /// * `Err(String)` - the request could not be turned into a valid board
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Result<Value, String> {
        let start_time = Instant::now();

        let snapshot = Snapshot::from_board(board, &you.id).map_err(|e| {
            warn!("Turn {}: rejecting request: {}", turn, e);
            e
        })?;

        let config = self.config.clone();
        let decision = tokio::task::spawn_blocking(move || {
            planner::decide(&snapshot, &config, start_time)
        })
        .await
        .map_err(|e| format!("Move computation failed: {}", e))?;

        info!(
            "Turn {}: Chose {} ({}, {} candidates, time: {}ms)",
            turn,
            decision.direction.as_str(),
            decision.rationale,
            decision.candidates.len(),
            start_time.elapsed().as_millis()
        );
        simple_profiler::report_and_reset(*turn);

        self.debug_logger.log_move(
            *turn,
            &you.id,
            board.clone(),
            decision.direction,
            &decision.rationale,
        );

        Ok(json!({
            "move": decision.direction.as_str(),
            "shout": decision.rationale,
        }))
    }
}
