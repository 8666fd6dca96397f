//! Port traits: the boundary between the monitoring logic and the controller.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ classify / audit / watchdog
//! ```
//!
//! The controller SDK (or [`SimBrain`](crate::adapters::sim_brain::SimBrain)
//! on the host) implements these traits, so the predicates and the
//! watchdog never touch a global hardware handle.  The delay primitive is
//! [`embedded_hal::delay::DelayNs`] and needs no trait of its own.

use crate::device::{DeviceType, Port};

// ───────────────────────────────────────────────────────────────
// Device bus (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Live query of what is attached to a port.
///
/// Must be total and side-effect free: a port with nothing attached, or
/// one outside the hardware range, reports [`DeviceType::None`] or
/// [`DeviceType::Undefined`].  Implementations must not cache; every call
/// reflects the hardware at that instant.
pub trait DeviceBus {
    fn plugged_type(&self, port: Port) -> DeviceType;
}

impl<B: DeviceBus + ?Sized> DeviceBus for &B {
    fn plugged_type(&self, port: Port) -> DeviceType {
        (**self).plugged_type(port)
    }
}

impl<B: DeviceBus + ?Sized> DeviceBus for std::sync::Arc<B> {
    fn plugged_type(&self, port: Port) -> DeviceType {
        (**self).plugged_type(port)
    }
}

// ───────────────────────────────────────────────────────────────
// Alert sink (driven adapter: domain → operator)
// ───────────────────────────────────────────────────────────────

/// Operator-facing alert outputs on the handheld controller.
pub trait AlertSink {
    /// Rumble using the SDK's pattern syntax (`-` long, `.` short, ` ` pause).
    fn rumble(&mut self, pattern: &str);

    /// Print `text` on the controller screen at `row`, `col`.
    fn print(&mut self, row: u8, col: u8, text: &str);
}

impl<A: AlertSink + ?Sized> AlertSink for &mut A {
    fn rumble(&mut self, pattern: &str) {
        (**self).rumble(pattern);
    }

    fn print(&mut self, row: u8, col: u8, text: &str) {
        (**self).print(row, col, text);
    }
}
