//! Simple profiling guards backed by global atomic counters
//!
//! Lightweight timing for the engine's hot spots without changing function
//! signatures. Enable with environment variable: BATTLESNAKE_PROFILE=1

use log::info;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static ASTAR_TIME: AtomicU64 = AtomicU64::new(0);
static ASTAR_COUNT: AtomicUsize = AtomicUsize::new(0);
static FLOOD_FILL_TIME: AtomicU64 = AtomicU64::new(0);
static FLOOD_FILL_COUNT: AtomicUsize = AtomicUsize::new(0);
static PLANNER_TIME: AtomicU64 = AtomicU64::new(0);
static PLANNER_COUNT: AtomicUsize = AtomicUsize::new(0);

static ENABLED: OnceLock<bool> = OnceLock::new();

#[inline]
pub fn is_profiling_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("BATTLESNAKE_PROFILE").is_ok())
}

fn counters(category: &str) -> Option<(&'static AtomicU64, &'static AtomicUsize)> {
    match category {
        "astar" => Some((&ASTAR_TIME, &ASTAR_COUNT)),
        "flood_fill" => Some((&FLOOD_FILL_TIME, &FLOOD_FILL_COUNT)),
        "planner" => Some((&PLANNER_TIME, &PLANNER_COUNT)),
        _ => None,
    }
}

/// Adds the elapsed time to its category when dropped
pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;
        if let Some((time, count)) = counters(self.category) {
            time.fetch_add(elapsed_ns, Ordering::Relaxed);
            count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Totals for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub total_ns: u64,
    pub calls: usize,
}

impl CategoryStats {
    pub fn avg_us(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_ns as f64 / self.calls as f64 / 1000.0
        }
    }
}

fn take(category: &str) -> CategoryStats {
    match counters(category) {
        Some((time, count)) => CategoryStats {
            total_ns: time.swap(0, Ordering::Relaxed),
            calls: count.swap(0, Ordering::Relaxed),
        },
        None => CategoryStats::default(),
    }
}

/// Logs and clears the counters; called once per turn
pub fn report_and_reset(turn: i32) {
    if !is_profiling_enabled() {
        return;
    }

    for category in &["astar", "flood_fill", "planner"] {
        let stats = take(category);
        info!(
            "Turn {} profile: {:<10} calls={:>5} total={:>8.2}ms avg={:>8.2}us",
            turn,
            category,
            stats.calls,
            stats.total_ns as f64 / 1_000_000.0,
            stats.avg_us()
        );
    }
}
