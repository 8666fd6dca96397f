//! Simulated controller brain.
//!
//! An in-memory smart-port table implementing [`DeviceBus`] for host
//! builds and tests.  Clones share the same table, so one clone can be
//! handed to a watchdog thread while another plugs and unplugs devices.
//! Ports outside `1..=MAX_SMART_PORTS` always read as `Undefined`, the
//! way the real brain answers for a port it does not have.

use core::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::app::ports::DeviceBus;
use crate::device::{DeviceType, MAX_SMART_PORTS, Port};

const SLOTS: usize = MAX_SMART_PORTS as usize;

#[derive(Debug, Clone)]
pub struct SimBrain {
    ports: Arc<[AtomicU8; SLOTS]>,
}

impl Default for SimBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBrain {
    /// A brain with nothing plugged in.
    pub fn new() -> Self {
        Self {
            ports: Arc::new(core::array::from_fn(|_| {
                AtomicU8::new(DeviceType::None.raw())
            })),
        }
    }

    /// Attach a device of `kind` at `port`.  Out-of-range ports are ignored.
    pub fn plug(&self, port: u8, kind: DeviceType) {
        if let Some(slot) = self.slot(Port::new(port)) {
            slot.store(kind.raw(), Ordering::SeqCst);
        }
    }

    /// Detach whatever is at `port`.
    pub fn unplug(&self, port: u8) {
        self.plug(port, DeviceType::None);
    }

    fn slot(&self, port: Port) -> Option<&AtomicU8> {
        if port.is_smart_port() {
            self.ports.get(port.number() as usize - 1)
        } else {
            None
        }
    }
}

impl DeviceBus for SimBrain {
    fn plugged_type(&self, port: Port) -> DeviceType {
        self.slot(port).map_or(DeviceType::Undefined, |slot| {
            DeviceType::from_raw(slot.load(Ordering::SeqCst))
        })
    }
}
