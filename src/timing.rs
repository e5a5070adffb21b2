use log::debug;
use std::time::{Duration, Instant};

/// Per-stage wall clock time of one or more encodes. Owned by the caller and passed down by
/// `&mut`, so timing never touches shared state. Repeated stages (e.g. one per OFDM symbol)
/// accumulate into a single entry, in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct StageTimer {
    stages: Vec<(&'static str, Duration)>,
}

impl StageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` and charge its duration to `stage`
    pub fn time<T, F: FnOnce() -> T>(&mut self, stage: &'static str, f: F) -> T {
        let start = Instant::now();
        let res = f();
        self.record(stage, start.elapsed());
        res
    }

    pub fn record(&mut self, stage: &'static str, elapsed: Duration) {
        match self.stages.iter_mut().find(|(name, _)| *name == stage) {
            Some((_, total)) => *total += elapsed,
            None => self.stages.push((stage, elapsed)),
        }
    }

    pub fn stages(&self) -> &[(&'static str, Duration)] {
        &self.stages
    }

    pub fn get(&self, stage: &str) -> Option<Duration> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, d)| *d)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, d)| *d).sum()
    }

    /// Log every stage at debug level
    pub fn log_summary(&self) {
        for (name, d) in &self.stages {
            debug!("{:>14}: {:>8} ns", name, d.as_nanos());
        }
        debug!("{:>14}: {:>8} ns", "total", self.total().as_nanos());
    }
}
