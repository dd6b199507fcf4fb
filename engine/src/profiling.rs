use std::time::Duration;

use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct StepTimings {
    pub step: Duration,
    pub commit: Duration,
    pub total: Duration,
}

/// Optional hook interface for capturing engine step timings.
///
/// Kept generic over the game: it never sees State/Input types.
pub trait Profiler {
    fn on_step(&mut self, _frame: usize, _timings: StepTimings) {}
}

/// Emits step timings as trace events and warns when a step blows the frame budget.
#[derive(Debug, Clone, Copy)]
pub struct TracingProfiler {
    pub budget: Duration,
}

impl TracingProfiler {
    /// One refresh at 60 Hz.
    pub const DEFAULT_BUDGET: Duration = Duration::from_micros(16_667);

    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn over_budget(&self, timings: &StepTimings) -> bool {
        timings.total > self.budget
    }
}

impl Default for TracingProfiler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUDGET)
    }
}

impl Profiler for TracingProfiler {
    fn on_step(&mut self, frame: usize, timings: StepTimings) {
        trace!(
            frame,
            step_us = timings.step.as_micros() as u64,
            commit_us = timings.commit.as_micros() as u64,
            total_us = timings.total.as_micros() as u64,
            "step"
        );
        if self.over_budget(&timings) {
            warn!(
                frame,
                total_ms = timings.total.as_secs_f64() * 1000.0,
                "simulation step exceeded frame budget"
            );
        }
    }
}
