//! Portguard: smart-port health monitoring for V5 robot controllers.
//!
//! Classifies what is attached to each port, audits declared devices and
//! motor groups, and runs a background watchdog that alerts the driver
//! and stops on the first disconnection.  Hardware is reached only
//! through the traits in [`app::ports`]; [`adapters`] has host-side
//! implementations for simulation and tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod audit;
pub mod classify;
pub mod config;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod watchdog;

pub use app::ports::{AlertSink, DeviceBus};
pub use device::{Device, DeviceSet, DeviceType, MotorGroup, Port};
pub use diagnostics::FaultReport;
pub use error::{ConfigError, Error};
pub use watchdog::{Watchdog, WatchdogHandle, WatchdogStatus};
