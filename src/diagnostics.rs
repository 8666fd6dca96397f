//! Human-readable device diagnostics and the watchdog's fault report.
//!
//! None of this is on the watchdog's polling path; callers use it to
//! print what is attached or to log/transmit a fault after the fact.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::app::ports::DeviceBus;
use crate::classify::is_plugged_in;
use crate::device::{DeviceName, DeviceSet, DeviceType, Port, truncated_name};

/// Display label for a device type.  Total: unlisted tags are `"unknown"`.
pub fn device_type_to_string(kind: DeviceType) -> &'static str {
    kind.as_str()
}

/// One `"<label>: <port>,\n"` line per device that is currently plugged in.
///
/// Devices that are unplugged are left out.  Each line performs its own
/// live read for the label, so the output reflects the bus as it was
/// while the summary was being built.
pub fn plugged_device_summary<B: DeviceBus + ?Sized>(bus: &B, devices: &DeviceSet) -> String {
    let mut out = String::new();
    for device in devices {
        let port = device.port();
        if is_plugged_in(bus, port) {
            let label = device_type_to_string(bus.plugged_type(port));
            let _ = writeln!(out, "{label}: {port},");
        }
    }
    out
}

/// Status code the watchdog run ends with once it has alerted.
pub const FAULT_STATUS_CODE: i32 = 1;

/// What the watchdog saw when it stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultReport {
    /// Port of the first device found unplugged.
    pub port: Port,
    /// Name of that device (empty if it was declared without one).
    pub device: DeviceName,
    /// Poll on which the fault was seen, counting from 1.
    pub tick: u64,
    /// Tag the bus reported for the port.
    pub observed: DeviceType,
}

impl FaultReport {
    pub fn new(port: Port, device: &str, tick: u64, observed: DeviceType) -> Self {
        Self {
            port,
            device: truncated_name(device),
            tick,
            observed,
        }
    }

    pub fn status_code(&self) -> i32 {
        FAULT_STATUS_CODE
    }
}

impl core::fmt::Display for FaultReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.device.is_empty() {
            write!(f, "port {} unplugged", self.port)?;
        } else {
            write!(f, "'{}' (port {}) unplugged", self.device, self.port)?;
        }
        write!(f, " on tick {}, bus reports {}", self.tick, self.observed)
    }
}
