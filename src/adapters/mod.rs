//! Adapters: concrete implementations of the port traits for host builds.
//!
//! | Adapter     | Implements  | Connects to                  |
//! |-------------|-------------|------------------------------|
//! | `sim_brain` | DeviceBus   | In-memory smart-port table   |
//! | `log_sink`  | AlertSink   | `log` output                 |
//! | `delay`     | DelayNs     | `std::thread::sleep`         |
//! | `task`      | —           | Named `std::thread` spawning |
//!
//! On the robot, the controller SDK bindings implement the same traits.

pub mod delay;
pub mod log_sink;
pub mod sim_brain;
pub mod task;
