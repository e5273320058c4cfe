//! Wall-clock timing for benchmark phases

use std::time::{Duration, Instant};

/// Monotonic timer measuring one named phase
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    name: &'static str,
    start_time: Instant,
}

impl PhaseTimer {
    /// Start timing `name`
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start_time: Instant::now(),
        }
    }

    /// Phase name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Elapsed time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Elapsed time in whole microseconds
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed().as_micros()
    }

    /// Stop the timer, log the phase and return the elapsed time
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        log::trace!("{} took {}", self.name, format_duration(elapsed));
        elapsed
    }
}

/// Format duration with automatic unit selection for readability
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.3}μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.3}ms", nanos as f64 / 1_000_000.0)
    } else if nanos < 60_000_000_000 {
        format!("{:.3}s", nanos as f64 / 1_000_000_000.0)
    } else {
        format!("{:.2}m", duration.as_secs_f64() / 60.0)
    }
}
