//! Application boundary.
//!
//! The monitoring logic in [`classify`](crate::classify),
//! [`audit`](crate::audit) and [`watchdog`](crate::watchdog) reaches the
//! controller only through the traits in [`ports`], keeping it testable
//! without a real brain attached.

pub mod ports;
