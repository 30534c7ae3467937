// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub heuristic: HeuristicConfig,
    pub hunger: HungerConfig,
    pub filters: FiltersConfig,
    pub penalties: PenaltiesConfig,
    pub headshot: HeadshotConfig,
    pub debug: DebugConfig,
    pub appearance: AppearanceConfig,
}

/// Timing and performance constants
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
    /// Hard budget for a single A* search
    pub search_timeout_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget for a whole turn
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Execution strategy constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Run independent candidate searches on the rayon pool
    pub parallel_candidates: bool,
}

/// Risk bias layered onto the A* frontier ordering
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicConfig {
    /// Corner cells cost up to (half_width + half_height) / divisor
    pub wall_cost_divisor: f64,
    /// Cost contributed by an enemy head at distance 1; falls off as 1/distance
    pub enemy_proximity_weight: i32,
    /// Heads farther than min(width, height) / divisor are ignored
    pub enemy_horizon_divisor: i32,
}

/// Health thresholds driving the eat/don't-eat signals
#[derive(Debug, Deserialize, Clone)]
pub struct HungerConfig {
    /// At or below this health, food searches may fall back to reckless mode
    pub starvation_health: i32,
    pub must_eat_health: i32,
    /// Must eat when the closest food path uses at least this fraction of remaining health
    pub must_eat_path_fraction: f32,
    pub should_eat_health: i32,
    /// Food is worth contesting when (enemy distance - our distance) is at most this
    pub chase_advantage_window: i32,
}

/// Candidate rejection constants
#[derive(Debug, Deserialize, Clone)]
pub struct FiltersConfig {
    /// Food within this Manhattan distance of a lethal head is treated as bait
    pub lethal_food_distance: i32,
}

/// Post-search cost adjustments
#[derive(Debug, Deserialize, Clone)]
pub struct PenaltiesConfig {
    pub no_tail_path: i32,
    pub exceeds_health: i32,
    pub must_eat: i32,
    pub should_eat: i32,
    pub chase_food: i32,
    pub idle_food: i32,
    pub contested_food: i32,
}

/// Head-shot candidates against strictly smaller snakes
#[derive(Debug, Deserialize, Clone)]
pub struct HeadshotConfig {
    pub enabled: bool,
    pub predicted_cost: i32,
    pub possible_cost: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

/// Cosmetic fields returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
                search_timeout_ms: 50,
            },
            strategy: StrategyConfig {
                parallel_candidates: true,
            },
            heuristic: HeuristicConfig {
                wall_cost_divisor: 4.0,
                enemy_proximity_weight: 12,
                enemy_horizon_divisor: 2,
            },
            hunger: HungerConfig {
                starvation_health: 15,
                must_eat_health: 30,
                must_eat_path_fraction: 0.5,
                should_eat_health: 60,
                chase_advantage_window: 1,
            },
            filters: FiltersConfig {
                lethal_food_distance: 1,
            },
            penalties: PenaltiesConfig {
                no_tail_path: 1000,
                exceeds_health: 1000,
                must_eat: 300,
                should_eat: 60,
                chase_food: 20,
                idle_food: 10,
                contested_food: 5,
            },
            headshot: HeadshotConfig {
                enabled: true,
                predicted_cost: 2,
                possible_cost: 6,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
            appearance: AppearanceConfig {
                author: "come-slither".to_string(),
                color: "#222222".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
