//! Candidate generation and ranking
//!
//! One turn of decision making. Every goal (food, our own tail, head-shot cells)
//! gets its own A* search. Paths that starve us or end in a pocket smaller than
//! our body are dropped, the rest are re-costed for hunger and contention, and
//! the cheapest wins. With no candidate left we take the roomiest neighbour, and
//! with no neighbour at all a fixed in-bounds default.

use log::{debug, info};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::fmt;
use std::time::{Duration, Instant};

use crate::astar::{self, SearchOutcome, SearchSpec};
use crate::config::Config;
use crate::flood_fill::{self, Expansion};
use crate::grid;
use crate::heuristic::CostModel;
use crate::safety;
use crate::simple_profiler::ProfileGuard;
use crate::snapshot::Snapshot;
use crate::threat::{self, ThreatLevel};
use crate::types::{Coord, Direction};

/// What a candidate path is trying to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Food,
    Tail,
    Headshot,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Goal::Food => "FOOD",
            Goal::Tail => "TAIL",
            Goal::Headshot => "HEADSHOT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub goal: Goal,
    /// Starts at our head, at least two nodes long
    pub path: Vec<Coord>,
    pub cost: i32,
}

impl Candidate {
    pub fn target(&self) -> Coord {
        self.path[self.path.len() - 1]
    }

    pub fn first_step(&self) -> Coord {
        self.path[1]
    }

    /// Moves needed to reach the target
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HungerSignals {
    pub must_eat: bool,
    pub should_eat: bool,
    pub chase_food: bool,
}

impl HungerSignals {
    pub fn any(&self) -> bool {
        self.must_eat || self.should_eat || self.chase_food
    }
}

/// The committed move plus everything that led to it
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    /// Diagnostic only
    pub rationale: String,
    pub signals: HungerSignals,
    /// Surviving candidates, cheapest first
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    /// Safe neighbours, risk heuristic
    Safe,
    /// Any valid neighbour, risk heuristic
    Relaxed,
    /// Any valid neighbour, no heuristic; only to avoid starving
    Reckless,
}

/// Chooses a move for the acting snake in `snapshot`
///
/// All searches stop at `turn_start` plus the configured per-turn budget.
pub fn decide(snapshot: &Snapshot, config: &Config, turn_start: Instant) -> Decision {
    let _guard = ProfileGuard::new("planner");
    let deadline = turn_start + Duration::from_millis(config.timing.effective_budget_ms());
    Planner {
        snapshot,
        config,
        deadline,
    }
    .run()
}

struct Planner<'a> {
    snapshot: &'a Snapshot,
    config: &'a Config,
    deadline: Instant,
}

impl<'a> Planner<'a> {
    fn run(&self) -> Decision {
        let you = self.snapshot.you();
        let head = you.head();
        let hunger = &self.config.hunger;

        let raw_food = self.food_candidates(SearchMode::Safe);
        let (mut food, rejected): (Vec<Candidate>, Vec<Candidate>) =
            raw_food.into_iter().partition(|c| self.food_is_viable(c));

        let signals = self.hunger_signals(&food);
        debug!(
            "Food candidates: {} viable, {} rejected, signals {:?}",
            food.len(),
            rejected.len(),
            signals
        );

        if signals.must_eat && food.is_empty() {
            food = rejected;
            if food.is_empty() && you.health <= hunger.starvation_health {
                food = self.food_candidates(SearchMode::Reckless);
                info!(
                    "Starving at health {}: {} reckless food path(s)",
                    you.health,
                    food.len()
                );
            } else {
                info!("Must eat: re-admitting {} risky food path(s)", food.len());
            }
        }

        // Tail paths stay in play unless there is food we have to take.
        let eating_mandatory = signals.must_eat && !food.is_empty();
        let mut candidates = food;
        if !eating_mandatory {
            candidates.extend(self.tail_candidates());
        }
        if self.config.headshot.enabled {
            candidates.extend(self.headshot_candidates());
        }

        self.adjust_costs(&mut candidates, &signals);
        candidates.sort_by_key(|c| c.cost);

        if let Some(best) = candidates.first() {
            if let Some(direction) = Direction::between(head, best.first_step()) {
                info!(
                    "Best path to {} via {} (cost {}, {} steps, {} candidates)",
                    best.goal,
                    direction.as_str(),
                    best.cost,
                    best.steps(),
                    candidates.len()
                );
                return Decision {
                    direction,
                    rationale: format!("A* BEST PATH TO {}", best.goal),
                    signals,
                    candidates,
                };
            }
        }

        if let Some(node) = self.open_space_move() {
            if let Some(direction) = Direction::between(head, node) {
                info!("No path to goal, largest space via {}", direction.as_str());
                return Decision {
                    direction,
                    rationale: "NO PATH TO GOAL, LARGEST SPACE".to_string(),
                    signals,
                    candidates,
                };
            }
        }

        let direction = self.default_direction();
        info!("No legal move, defaulting to {}", direction.as_str());
        Decision {
            direction,
            rationale: "NO LEGAL MOVE".to_string(),
            signals,
            candidates,
        }
    }

    /// Maps over independent work items, on the rayon pool when enabled
    fn map_items<I, T, F>(&self, items: &[I], f: F) -> Vec<T>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> T + Sync + Send,
    {
        if self.config.strategy.parallel_candidates {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }

    fn search_deadline(&self) -> Instant {
        let own = Instant::now() + Duration::from_millis(self.config.timing.search_timeout_ms);
        own.min(self.deadline)
    }

    /// A* from `start` to any of `targets`, with `trim_offset` turns already elapsed
    fn search_to(
        &self,
        start: Coord,
        targets: &[Coord],
        mode: SearchMode,
        trim_offset: usize,
    ) -> SearchOutcome<Coord> {
        let snapshot = self.snapshot;
        let costs = CostModel::new(snapshot, &self.config.heuristic);

        let is_goal = |n: Coord| targets.contains(&n);
        let neighbors = |n: Coord, steps: usize| match mode {
            SearchMode::Safe => {
                safety::safe_neighbors(snapshot, n, ThreatLevel::Lethal, trim_offset + steps)
            }
            SearchMode::Relaxed | SearchMode::Reckless => {
                safety::valid_neighbors(snapshot, n, trim_offset + steps)
            }
        };
        let distance = |a: Coord, b: Coord| grid::manhattan(a, b);
        let heuristic = |n: Coord| match mode {
            SearchMode::Reckless => 0,
            SearchMode::Safe | SearchMode::Relaxed => costs.heuristic(n),
        };

        let outcome = astar::search(&SearchSpec {
            start,
            is_goal: &is_goal,
            neighbors: &neighbors,
            distance: &distance,
            heuristic: &heuristic,
            deadline: self.search_deadline(),
        });
        if outcome == SearchOutcome::TimedOut {
            debug!("Search from {:?} to {:?} timed out", start, targets);
        }
        outcome
    }

    fn candidate_from(&self, goal: Goal, outcome: SearchOutcome<Coord>) -> Option<Candidate> {
        outcome
            .found()
            .filter(|found| found.path.len() >= 2)
            .map(|found| Candidate {
                goal,
                path: found.path,
                cost: found.cost,
            })
    }

    fn food_candidates(&self, mode: SearchMode) -> Vec<Candidate> {
        let head = self.snapshot.you().head();
        self.map_items(self.snapshot.food(), |&food| {
            self.candidate_from(Goal::Food, self.search_to(head, &[food], mode, 0))
        })
        .into_iter()
        .flatten()
        .collect()
    }

    /// Reachable without starving, not bait, and not a dead end
    fn food_is_viable(&self, candidate: &Candidate) -> bool {
        let you = self.snapshot.you();

        if candidate.steps() as i32 > you.health {
            return false;
        }

        let bait_distance = self.config.filters.lethal_food_distance;
        let baited = self
            .snapshot
            .threats()
            .lethal
            .iter()
            .any(|&i| grid::manhattan(self.snapshot.snake(i).head(), candidate.target()) <= bait_distance);
        if baited {
            return false;
        }

        self.fits_after_first_step(candidate)
    }

    fn fits_after_first_step(&self, candidate: &Candidate) -> bool {
        let space = flood_fill::reachable_space(
            self.snapshot,
            candidate.first_step(),
            Expansion::Pessimistic,
            1,
        );
        space >= self.snapshot.you().len()
    }

    /// Nearest opponent head to `target`, by Manhattan distance
    fn nearest_enemy_distance(&self, target: Coord) -> Option<i32> {
        self.snapshot
            .others()
            .map(|(_, snake)| grid::manhattan(snake.head(), target))
            .min()
    }

    /// Enemy distance minus ours; positive favours us
    fn advantage(&self, candidate: &Candidate) -> Option<i32> {
        self.nearest_enemy_distance(candidate.target())
            .map(|enemy| enemy - candidate.steps() as i32)
    }

    fn hunger_signals(&self, food: &[Candidate]) -> HungerSignals {
        let health = self.snapshot.you().health;
        let hunger = &self.config.hunger;

        let closest = food.iter().map(|c| c.steps()).min();
        let path_drains_health = closest.map_or(false, |steps| {
            steps as f32 >= health as f32 * hunger.must_eat_path_fraction
        });

        HungerSignals {
            must_eat: health <= hunger.must_eat_health || path_drains_health,
            should_eat: health <= hunger.should_eat_health,
            chase_food: food.iter().any(|c| {
                self.advantage(c)
                    .map_or(false, |adv| adv <= hunger.chase_advantage_window)
            }),
        }
    }

    /// Paths toward our tail cell and the safe cells around it
    fn tail_candidates(&self) -> Vec<Candidate> {
        let you = self.snapshot.you();
        let head = you.head();
        let tail = you.tail();

        let mut targets = safety::safe_neighbors(self.snapshot, tail, ThreatLevel::Lethal, 0);
        if !you.is_growing() {
            targets.push(tail);
        }

        self.map_items(&targets, |&target| {
            self.candidate_from(
                Goal::Tail,
                self.search_to(head, &[target], SearchMode::Safe, 0),
            )
        })
        .into_iter()
        .flatten()
        .collect()
    }

    /// One-step moves onto cells a smaller snake may move into
    fn headshot_candidates(&self) -> Vec<Candidate> {
        let prey = &self.snapshot.threats().smaller;
        if prey.is_empty() {
            return Vec::new();
        }

        let head = self.snapshot.you().head();
        let predicted: Vec<Coord> = prey
            .iter()
            .filter_map(|&i| threat::predict_next_head(self.snapshot, i))
            .collect();

        safety::safe_neighbors(self.snapshot, head, ThreatLevel::Larger, 0)
            .into_iter()
            .filter(|&n| threat::is_immediate_threat(self.snapshot, prey, n))
            .map(|n| {
                let cost = if predicted.contains(&n) {
                    self.config.headshot.predicted_cost
                } else {
                    self.config.headshot.possible_cost
                };
                Candidate {
                    goal: Goal::Headshot,
                    path: vec![head, n],
                    cost,
                }
            })
            .filter(|c| self.fits_after_first_step(c))
            .collect()
    }

    /// True when the target connects back to our tail once we have walked there
    fn has_path_to_tail(&self, candidate: &Candidate) -> bool {
        let you = self.snapshot.you();
        let tail = you.tail();

        let mut targets = safety::valid_neighbors(self.snapshot, tail, 0);
        if !you.is_growing() {
            targets.push(tail);
        }
        if targets.contains(&candidate.target()) {
            return true;
        }

        self.search_to(
            candidate.target(),
            &targets,
            SearchMode::Relaxed,
            candidate.steps(),
        )
        .is_found()
    }

    /// Food targets worth going for when several compete
    ///
    /// Returns the target with the best advantage and the one whose nearest
    /// enemy is farthest away.
    fn preferred_food_targets(&self, candidates: &[Candidate]) -> (Option<Coord>, Option<Coord>) {
        let food = || candidates.iter().filter(|c| c.goal == Goal::Food);

        let best_advantage = food()
            .min_by_key(|c| Reverse(self.advantage(c).unwrap_or(i32::MAX)))
            .map(|c| c.target());
        let least_contested = food()
            .min_by_key(|c| Reverse(self.nearest_enemy_distance(c.target()).unwrap_or(i32::MAX)))
            .map(|c| c.target());

        (best_advantage, least_contested)
    }

    fn adjust_costs(&self, candidates: &mut [Candidate], signals: &HungerSignals) {
        let health = self.snapshot.you().health;
        let penalties = &self.config.penalties;

        let reaches_tail = self.map_items(&candidates[..], |c| self.has_path_to_tail(c));

        let mut food_targets: Vec<Coord> = Vec::new();
        for target in candidates.iter().filter(|c| c.goal == Goal::Food).map(|c| c.target()) {
            if !food_targets.contains(&target) {
                food_targets.push(target);
            }
        }
        let contested = food_targets.len() > 1 && self.snapshot.others().next().is_some();
        let (best_advantage, least_contested) = self.preferred_food_targets(candidates);

        for (candidate, back_to_tail) in candidates.iter_mut().zip(reaches_tail) {
            if !back_to_tail {
                candidate.cost += penalties.no_tail_path;
            }
            if candidate.steps() as i32 > health {
                candidate.cost += penalties.exceeds_health;
            }

            match candidate.goal {
                Goal::Food => {
                    if !signals.any() {
                        candidate.cost += penalties.idle_food;
                    }
                    let target = Some(candidate.target());
                    if contested && target != best_advantage && target != least_contested {
                        candidate.cost += penalties.contested_food;
                    }
                }
                Goal::Tail | Goal::Headshot => {
                    if signals.must_eat {
                        candidate.cost += penalties.must_eat;
                    } else if signals.should_eat {
                        candidate.cost += penalties.should_eat;
                    } else if signals.chase_food {
                        candidate.cost += penalties.chase_food;
                    }
                }
            }
        }
    }

    /// Neighbour of the head with the most room
    ///
    /// Prefers safe neighbours measured pessimistically, then any valid
    /// neighbour measured optimistically. Ties go to cells no lethal snake can
    /// also enter, then to cells farther from the walls.
    fn open_space_move(&self) -> Option<Coord> {
        let snapshot = self.snapshot;
        let head = snapshot.you().head();
        let costs = CostModel::new(snapshot, &self.config.heuristic);

        let safe = safety::safe_neighbors(snapshot, head, ThreatLevel::Lethal, 0);
        let (options, expansion) = if safe.is_empty() {
            (safety::valid_neighbors(snapshot, head, 0), Expansion::Optimistic)
        } else {
            (safe, Expansion::Pessimistic)
        };

        let mut moves: Vec<(Coord, usize, bool, i32)> = options
            .into_iter()
            .map(|n| {
                (
                    n,
                    flood_fill::reachable_space(snapshot, n, expansion, 1),
                    threat::is_immediate_threat(snapshot, &snapshot.threats().lethal, n),
                    costs.wall_cost(n),
                )
            })
            .collect();

        moves.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| a.2.cmp(&b.2))
                .then_with(|| a.3.cmp(&b.3))
        });

        moves.first().map(|m| m.0)
    }

    /// First direction that stays on the board, up when none does
    fn default_direction(&self) -> Direction {
        let head = self.snapshot.you().head();
        Direction::all()
            .iter()
            .copied()
            .find(|d| !grid::is_wall(self.snapshot, d.apply(&head)))
            .unwrap_or(Direction::Up)
    }
}
