//! Device model: ports, type tags, device handles and the sets the
//! auditors and the watchdog iterate over.
//!
//! Nothing in here caches hardware state.  A [`Device`] is a logical
//! handle (port + optional name + optional expected type); the live
//! [`DeviceType`] is always read through a
//! [`DeviceBus`](crate::app::ports::DeviceBus).

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Number of smart ports on the controller.
pub const MAX_SMART_PORTS: u8 = 21;

/// Maximum number of devices a single [`DeviceSet`] can declare.
pub const MAX_DEVICES: usize = 32;

/// Maximum length of a device name (bytes, truncated beyond).
pub const MAX_NAME_LEN: usize = 24;

pub type DeviceName = heapless::String<MAX_NAME_LEN>;

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Physical connector slot on the controller.
///
/// Not range-checked: an out-of-range port simply reads back as
/// `None`/`Undefined` from the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u8);

impl Port {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// True if the port names one of the controller's smart ports.
    pub const fn is_smart_port(self) -> bool {
        self.0 >= 1 && self.0 <= MAX_SMART_PORTS
    }
}

impl From<u8> for Port {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Device type tag
// ---------------------------------------------------------------------------

/// Raw code that names no listed device type.
///
/// Only [`DeviceType::from_raw`] builds one, so the code inside never
/// collides with a listed tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownCode(u8);

impl UnknownCode {
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What, if anything, occupies a port.
///
/// Raw codes follow the controller's device table.  Any code not listed
/// here is carried through as [`DeviceType::Unknown`].  Every `u8` maps
/// to exactly one value and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    None,
    Motor,
    Rotation,
    Imu,
    Distance,
    Radio,
    Vision,
    Adi,
    Optical,
    Gps,
    Serial,
    Undefined,
    Unknown(UnknownCode),
}

impl DeviceType {
    /// Every named tag, in raw-code order.
    pub const KNOWN: [DeviceType; 12] = [
        Self::None,
        Self::Motor,
        Self::Rotation,
        Self::Imu,
        Self::Distance,
        Self::Radio,
        Self::Vision,
        Self::Adi,
        Self::Optical,
        Self::Gps,
        Self::Serial,
        Self::Undefined,
    ];

    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            2 => Self::Motor,
            4 => Self::Rotation,
            6 => Self::Imu,
            7 => Self::Distance,
            8 => Self::Radio,
            11 => Self::Vision,
            12 => Self::Adi,
            16 => Self::Optical,
            20 => Self::Gps,
            129 => Self::Serial,
            255 => Self::Undefined,
            other => Self::Unknown(UnknownCode(other)),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Motor => 2,
            Self::Rotation => 4,
            Self::Imu => 6,
            Self::Distance => 7,
            Self::Radio => 8,
            Self::Vision => 11,
            Self::Adi => 12,
            Self::Optical => 16,
            Self::Gps => 20,
            Self::Serial => 129,
            Self::Undefined => 255,
            Self::Unknown(code) => code.0,
        }
    }

    /// `None` and `Undefined` both mean nothing usable is attached.
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::None | Self::Undefined)
    }

    /// Display label.  Total: anything unlisted is `"unknown"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Undefined => "undefined",
            Self::Motor => "motor",
            Self::Rotation => "rotation",
            Self::Imu => "imu",
            Self::Radio => "radio",
            Self::Distance => "distance",
            Self::Vision => "vision",
            Self::Adi => "adi",
            Self::Optical => "optical",
            Self::Gps => "gps",
            Self::Serial => "serial",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for DeviceType {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl From<DeviceType> for u8 {
    fn from(t: DeviceType) -> Self {
        t.raw()
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label names no known device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDeviceLabel;

impl fmt::Display for UnknownDeviceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown device type label")
    }
}

impl FromStr for DeviceType {
    type Err = UnknownDeviceLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownDeviceLabel)
    }
}

impl Serialize for DeviceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !serializer.is_human_readable() {
            return serializer.serialize_u8(self.raw());
        }
        match self {
            // The label would lose the code.
            Self::Unknown(code) => serializer.serialize_u8(code.0),
            known => serializer.serialize_str(known.as_str()),
        }
    }
}

struct DeviceTypeVisitor;

impl Visitor<'_> for DeviceTypeVisitor {
    type Value = DeviceType;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a device type label or raw device code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DeviceType, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DeviceType, E> {
        u8::try_from(v)
            .map(DeviceType::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DeviceType, E> {
        u8::try_from(v)
            .map(DeviceType::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(DeviceTypeVisitor)
        } else {
            deserializer.deserialize_u8(DeviceTypeVisitor)
        }
    }
}

// ---------------------------------------------------------------------------
// Device handle
// ---------------------------------------------------------------------------

/// Logical handle to a declared peripheral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    port: Port,
    name: DeviceName,
    expected: Option<DeviceType>,
}

impl Device {
    pub fn new(port: u8) -> Self {
        Self::on_port(Port::new(port))
    }

    pub fn on_port(port: Port) -> Self {
        Self {
            port,
            name: DeviceName::new(),
            expected: None,
        }
    }

    /// Attach a name (truncated to [`MAX_NAME_LEN`] bytes on a char boundary).
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = truncated_name(name);
        self
    }

    /// Declare the type this device should report.
    #[must_use]
    pub fn expecting(mut self, kind: DeviceType) -> Self {
        self.expected = Some(kind);
        self
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected(&self) -> Option<DeviceType> {
        self.expected
    }
}

pub(crate) fn truncated_name(name: &str) -> DeviceName {
    let mut out = DeviceName::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Device set
// ---------------------------------------------------------------------------

/// Ordered, fixed-capacity collection of devices to audit or watch.
///
/// Built once before monitoring starts; the core only iterates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSet {
    devices: heapless::Vec<Device, MAX_DEVICES>,
}

impl DeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set of unnamed devices from bare port numbers.
    pub fn from_ports(ports: &[u8]) -> Result<Self, Error> {
        let mut set = Self::new();
        for &p in ports {
            set.push(Device::new(p))?;
        }
        Ok(set)
    }

    pub fn push(&mut self, device: Device) -> Result<(), Error> {
        self.devices.push(device).map_err(|_| Error::SetFull {
            capacity: MAX_DEVICES,
        })
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl<'a> IntoIterator for &'a DeviceSet {
    type Item = &'a Device;
    type IntoIter = core::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Motor group
// ---------------------------------------------------------------------------

/// One motor in a [`MotorGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMotor {
    pub port: Port,
    pub reversed: bool,
}

/// Motors driven together, declared with the SDK's signed-port
/// convention (negative = reversed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotorGroup {
    motors: heapless::Vec<GroupMotor, { MAX_SMART_PORTS as usize }>,
}

impl MotorGroup {
    pub fn new(signed_ports: &[i8]) -> Result<Self, Error> {
        let mut motors = heapless::Vec::new();
        for &p in signed_ports {
            let motor = GroupMotor {
                port: Port::new(p.unsigned_abs()),
                reversed: p < 0,
            };
            motors.push(motor).map_err(|_| Error::SetFull {
                capacity: MAX_SMART_PORTS as usize,
            })?;
        }
        Ok(Self { motors })
    }

    pub fn motors(&self) -> &[GroupMotor] {
        &self.motors
    }

    /// Member ports in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = Port> + '_ {
        self.motors.iter().map(|m| m.port)
    }

    pub fn len(&self) -> usize {
        self.motors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }
}
