//! Point-in-time predicates over a single port.
//!
//! Every call performs a fresh [`DeviceBus`] read; nothing is cached, so two
//! calls may disagree if the hardware changed in between.

use crate::app::ports::DeviceBus;
use crate::device::{DeviceType, Port};

/// True if something usable is attached (tag is neither `None` nor `Undefined`).
pub fn is_plugged_in<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    bus.plugged_type(port).is_present()
}

/// True if the live tag at `port` is exactly `expected`.
pub fn is_type<B: DeviceBus + ?Sized>(bus: &B, port: Port, expected: DeviceType) -> bool {
    bus.plugged_type(port) == expected
}

pub fn is_motor<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    is_type(bus, port, DeviceType::Motor)
}

pub fn is_imu<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    is_type(bus, port, DeviceType::Imu)
}

pub fn is_radio<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    is_type(bus, port, DeviceType::Radio)
}

pub fn is_rotation<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    is_type(bus, port, DeviceType::Rotation)
}

/// IMU present and still plugged in.
///
/// Two separate reads: the plug state is re-confirmed after the type match,
/// so an IMU that drops out between the reads is reported as failed.
pub fn check_imu<B: DeviceBus + ?Sized>(bus: &B, port: Port) -> bool {
    is_imu(bus, port) && is_plugged_in(bus, port)
}
