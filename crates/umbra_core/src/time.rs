//! Fixed-step time system
//!
//! Script callbacks run once per simulation tick with a constant delta.

use std::time::Duration;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const TICK_RATE_HZ: u32 = 60;

/// Simulation time tracker
pub struct SimulationTime {
    tick_duration: Duration,
    tick_count: u64,
    accumulated_time: Duration,
}

impl SimulationTime {
    pub fn new() -> Self {
        Self::with_rate(TICK_RATE_HZ)
    }

    /// Tracker ticking at `rate_hz`. A rate of zero is clamped to 1 Hz.
    pub fn with_rate(rate_hz: u32) -> Self {
        Self {
            tick_duration: Duration::from_secs(1) / rate_hz.max(1),
            tick_count: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Advance one tick and return its delta in seconds.
    pub fn advance_tick(&mut self) -> f32 {
        self.tick_count += 1;
        self.accumulated_time += self.tick_duration;
        self.tick_duration.as_secs_f32()
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_fixed_steps() {
        let mut time = SimulationTime::with_rate(50);
        let dt = time.advance_tick();
        time.advance_tick();
        assert!((dt - 0.02).abs() < 1e-6);
        assert_eq!(time.tick_count(), 2);
        assert_eq!(time.total_time(), Duration::from_millis(40));
    }

    #[test]
    fn zero_rate_is_clamped() {
        assert_eq!(SimulationTime::with_rate(0).tick_duration(), Duration::from_secs(1));
    }
}
