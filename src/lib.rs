// Library exports for the Battlesnake bot
// The server binary and the replay tool share the decision engine through here

pub mod astar;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod flood_fill;
pub mod grid;
pub mod heuristic;
pub mod planner;
pub mod replay;
pub mod safety;
pub mod simple_profiler;
pub mod snapshot;
pub mod threat;
pub mod types;
