//! Device manifest.
//!
//! Declares which devices a robot expects and how its motors are
//! grouped.  Loaded from JSON (hand-written, on the SD card or embedded
//! with `include_bytes!`) or postcard (compact, generated), validated,
//! then turned into the [`DeviceSet`] the watchdog and auditors consume.
//!
//! The lists decode unbounded so that [`MonitorConfig::validate`] can
//! tell an oversized manifest apart from a malformed one.
//!
//! Polling cadence and alert text are fixed in
//! [`watchdog`](crate::watchdog) and are not part of this file.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::device::{
    Device, DeviceName, DeviceSet, DeviceType, MAX_DEVICES, MAX_SMART_PORTS, MotorGroup, Port,
};
use crate::error::{ConfigError, Error};

/// One declared device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub name: DeviceName,
    pub port: Port,
    /// Type the port should report.  Omit to only watch for presence.
    #[serde(default)]
    pub kind: Option<DeviceType>,
}

/// One declared motor group, in signed-port form (negative = reversed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorGroupEntry {
    pub name: DeviceName,
    pub ports: Vec<i8>,
}

/// The whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
    #[serde(default)]
    pub motor_groups: Vec<MotorGroupEntry>,
}

impl MonitorConfig {
    /// Parse and validate a JSON manifest.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|e| {
            warn!("Manifest: JSON decode failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a postcard manifest.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|e| {
            warn!("Manifest: postcard decode failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_postcard(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Malformed)
    }

    /// Reject duplicate ports, device lists larger than a [`DeviceSet`],
    /// and motor groups that are empty or longer than [`MAX_SMART_PORTS`].
    ///
    /// Ports outside the smart-port range are accepted with a warning:
    /// they will read as unplugged and fault the watchdog on its first
    /// tick, which is the behaviour the operator should see.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.devices.len() > MAX_DEVICES {
            return Err(ConfigError::TooManyDevices);
        }
        let mut seen = [false; 256];
        for entry in &self.devices {
            let n = entry.port.number() as usize;
            if seen[n] {
                return Err(ConfigError::DuplicatePort(entry.port));
            }
            seen[n] = true;
            if !entry.port.is_smart_port() {
                warn!(
                    "Manifest: '{}' on port {} is outside the smart-port range",
                    entry.name, entry.port
                );
            }
        }
        for group in &self.motor_groups {
            if group.ports.is_empty() {
                return Err(ConfigError::EmptyMotorGroup);
            }
            if group.ports.len() > usize::from(MAX_SMART_PORTS) {
                return Err(ConfigError::OversizedMotorGroup);
            }
        }
        Ok(())
    }

    /// Devices in declaration order.
    pub fn device_set(&self) -> Result<DeviceSet, Error> {
        let mut set = DeviceSet::new();
        for entry in &self.devices {
            let mut device = Device::on_port(entry.port).named(&entry.name);
            if let Some(kind) = entry.kind {
                device = device.expecting(kind);
            }
            set.push(device)
                .map_err(|_| Error::Config(ConfigError::TooManyDevices))?;
        }
        Ok(set)
    }

    /// Motor groups in declaration order, paired with their names.
    pub fn motor_groups(&self) -> Result<Vec<(&str, MotorGroup)>, Error> {
        self.motor_groups
            .iter()
            .map(|g| {
                let group = MotorGroup::new(&g.ports)
                    .map_err(|_| Error::Config(ConfigError::OversizedMotorGroup))?;
                Ok((g.name.as_str(), group))
            })
            .collect()
    }
}
