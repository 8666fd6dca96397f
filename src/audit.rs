//! Batch audits over declared devices.
//!
//! Each scan returns the offending ports in input order.  Duplicates are
//! allowed; nothing is mutated.

use crate::app::ports::DeviceBus;
use crate::classify::{is_motor, is_plugged_in, is_type};
use crate::device::{DeviceSet, MAX_DEVICES, MotorGroup, Port};

/// Offending ports, in the order they were found.
///
/// Sized for the worst case of [`check_motor_group`], which can report a
/// port twice.
pub type PortList = heapless::Vec<Port, { 2 * MAX_DEVICES }>;

/// Ports in `group` that are not motors, plus every port that IS plugged in.
///
/// The second condition reads inverted for a "find missing motors" scan.
/// It is kept as the robot code has always behaved until the intended
/// polarity is confirmed.  A port holding a motor is therefore reported
/// once; an empty port once; a port holding some other device twice.
pub fn check_motor_group<B: DeviceBus + ?Sized>(bus: &B, group: &MotorGroup) -> PortList {
    let mut ports = PortList::new();
    for port in group.ports() {
        if !is_motor(bus, port) {
            let _ = ports.push(port);
        }
        if is_plugged_in(bus, port) {
            let _ = ports.push(port);
        }
    }
    ports
}

/// Ports of every device in `devices` that is not plugged in.
pub fn check_devices<B: DeviceBus + ?Sized>(bus: &B, devices: &DeviceSet) -> PortList {
    let mut ports = PortList::new();
    for device in devices {
        if !is_plugged_in(bus, device.port()) {
            let _ = ports.push(device.port());
        }
    }
    ports
}

/// Ports of devices whose live type differs from the type they declare.
///
/// Devices without an expected type are skipped.  An unplugged device
/// counts as a mismatch.
pub fn check_device_kinds<B: DeviceBus + ?Sized>(bus: &B, devices: &DeviceSet) -> PortList {
    let mut ports = PortList::new();
    for device in devices {
        if let Some(expected) = device.expected() {
            if !is_type(bus, device.port(), expected) {
                let _ = ports.push(device.port());
            }
        }
    }
    ports
}
