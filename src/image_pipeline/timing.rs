use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Per-stage durations of one pipeline pass.
#[derive(Debug, Clone, Default)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
    totals: HashMap<&'static str, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stage(&mut self, name: &'static str, duration: Duration) {
        self.stages.push(StageTiming { name, duration });
        *self.totals.entry(name).or_insert(Duration::ZERO) += duration;
    }

    /// Runs `f`, recording its duration under `name`.
    pub fn measure<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let timer = Timer::start(name);
        let value = f();
        let (name, duration) = timer.stop();
        self.add_stage(name, duration);
        value
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn stage(&self, name: &str) -> Option<Duration> {
        self.totals.get(name).copied()
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        for stage in &self.stages {
            let share = if total > 0.0 {
                stage.duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            debug!(
                stage = stage.name,
                "{:.3}ms ({:.1}%)",
                stage.duration.as_secs_f64() * 1000.0,
                share
            );
        }
        debug!("Frame total {:.3}ms", total * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}
