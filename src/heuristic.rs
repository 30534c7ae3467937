// Heuristic cost model
//
// A risk bias for the A* frontier, not a distance estimate: cells near walls or
// near other heads cost more so the search prefers open, quiet routes.

use crate::config::HeuristicConfig;
use crate::grid;
use crate::snapshot::Snapshot;
use crate::types::Coord;

/// Distance-from-centre penalty
///
/// The centre costs 0; a cell on the edge of either axis costs
/// round((half_width + half_height) / divisor).
pub fn wall_cost(width: i32, height: i32, node: Coord, divisor: f64) -> i32 {
    let half_width = (width - 1) as f64 / 2.0;
    let half_height = (height - 1) as f64 / 2.0;

    let deviation = |value: i32, half: f64| {
        if half > 0.0 {
            (value as f64 - half).abs() / half
        } else {
            0.0
        }
    };

    let worst = deviation(node.x, half_width).max(deviation(node.y, half_height));
    (worst * ((half_width + half_height) / divisor)).round() as i32
}

/// Inverse-distance penalty summed over opponent heads inside the horizon
pub fn enemy_proximity_cost(snapshot: &Snapshot, node: Coord, config: &HeuristicConfig) -> i32 {
    let horizon = snapshot.width().min(snapshot.height()) / config.enemy_horizon_divisor.max(1);

    snapshot
        .others()
        .map(|(_, snake)| grid::manhattan(snake.head(), node))
        .filter(|&d| d <= horizon)
        .map(|d| config.enemy_proximity_weight / d.max(1))
        .sum()
}

/// Risk heuristic bound to one snapshot
pub struct CostModel<'a> {
    snapshot: &'a Snapshot,
    config: &'a HeuristicConfig,
}

impl<'a> CostModel<'a> {
    pub fn new(snapshot: &'a Snapshot, config: &'a HeuristicConfig) -> Self {
        CostModel { snapshot, config }
    }

    pub fn wall_cost(&self, node: Coord) -> i32 {
        wall_cost(
            self.snapshot.width(),
            self.snapshot.height(),
            node,
            self.config.wall_cost_divisor,
        )
    }

    pub fn enemy_cost(&self, node: Coord) -> i32 {
        enemy_proximity_cost(self.snapshot, node, self.config)
    }

    pub fn heuristic(&self, node: Coord) -> i32 {
        self.wall_cost(node) + self.enemy_cost(node)
    }
}
