// Time sources for the physics system
//
// The integrator only ever asks for the current instant and subtracts two
// instants, so anything that can hand out an `Instant` can drive it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Capability to read the current instant
pub trait Clock {
    /// Current instant. Must not have side effects visible to the caller.
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic simulation and tests
///
/// Clones share the same underlying time, so one handle can be given to a
/// `PhysicsSystem` while another is kept to advance it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current wall time
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock frozen at `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            current: Rc::new(Cell::new(start)),
        }
    }

    /// Move time forward
    pub fn advance(&self, delta: Duration) {
        self.current.set(self.current.get() + delta);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.current.get()
    }
}

/// Elapsed seconds from `earlier` to `later`, clamped at zero
pub fn elapsed_secs(earlier: Instant, later: Instant) -> f64 {
    later.saturating_duration_since(earlier).as_secs_f64()
}
