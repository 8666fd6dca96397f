//! Log-based alert sink adapter.
//!
//! Implements [`AlertSink`] by writing rumble and screen requests to the
//! logger.  Useful on the host, or on a robot without a paired controller.

use log::warn;

use crate::app::ports::AlertSink;

/// Adapter that logs every alert instead of driving a controller.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl LogAlertSink {
    pub fn new() -> Self {
        Self
    }
}

impl AlertSink for LogAlertSink {
    fn rumble(&mut self, pattern: &str) {
        warn!("ALERT | rumble \"{}\"", pattern);
    }

    fn print(&mut self, row: u8, col: u8, text: &str) {
        warn!("ALERT | screen[{},{}] {}", row, col, text);
    }
}
