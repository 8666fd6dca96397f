//! Host delay adapter.
//!
//! Implements [`DelayNs`] by sleeping the calling thread.  Only that
//! thread blocks; other threads keep running.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

/// Thread-sleep delay for host builds and simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
