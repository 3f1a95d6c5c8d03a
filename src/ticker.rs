/*
 * Ticker Module
 *
 * Fixed-interval tick timer driven by the frame loop. Elapsed frame time
 * goes into an accumulator and every whole interval yields one tick, so
 * the simulation rate is independent of both the frame rate and the
 * sensor sampling rate.
 */

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulator: Duration,
    max_catch_up: u32,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            max_catch_up,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    // Stop ticking and discard any partially accumulated interval
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // Add elapsed time and return how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.interval.is_zero() {
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.interval && ticks < self.max_catch_up {
            self.accumulator -= self.interval;
            ticks += 1;
        }

        // Too far behind (e.g. the window was suspended): drop the backlog
        if self.accumulator >= self.interval {
            log::debug!(
                "tick backlog of {:?} dropped after {} catch-up ticks",
                self.accumulator,
                ticks
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }
}
