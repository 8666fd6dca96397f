//! Disconnect watchdog.
//!
//! Polls a fixed [`DeviceSet`] every [`POLL_INTERVAL_MS`] and stops for
//! good on the first device it finds unplugged.
//!
//! ```text
//!            ┌───────────── all plugged in: sleep 500 ms ─────────────┐
//!            ▼                                                        │
//!   start ─▶ RUNNING ── for each device, in set order ────────────────┘
//!               │
//!               │ first !is_plugged_in(port)
//!               ▼
//!            ALERTED ── rumble "---", print "DEVICE UNPLUGGED!!!" ──▶ return FaultReport
//! ```
//!
//! `ALERTED` is terminal.  There is no resume: a fresh run needs a fresh
//! [`Watchdog`] (on the robot, a program restart).  Only the first failing
//! device is reported; devices after it are not queried on that tick.
//!
//! The loop blocks between polls, so on the robot it runs on its own
//! thread via [`Watchdog::spawn`].  The result comes back through the
//! thread's return value.

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::adapters::task;
use crate::app::ports::{AlertSink, DeviceBus};
use crate::device::DeviceSet;
use crate::diagnostics::FaultReport;

/// Fixed delay between polls.
pub const POLL_INTERVAL_MS: u32 = 500;

/// Rumble pattern played on the controller when a device drops out.
pub const ALERT_RUMBLE_PATTERN: &str = "---";

/// Message printed on the controller screen when a device drops out.
pub const ALERT_MESSAGE: &str = "DEVICE UNPLUGGED!!!";

/// Screen position of [`ALERT_MESSAGE`].
pub const ALERT_ROW: u8 = 0;
pub const ALERT_COL: u8 = 0;

/// Stack for the watchdog thread when spawned with [`Watchdog::spawn`].
/// Leaves room for a host logger formatting the fault record.
pub const DEFAULT_STACK_KB: usize = 48;

const THREAD_NAME: &str = "port-watchdog";

/// Result of a single [`Watchdog::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchdogStatus {
    /// Every device was plugged in; the watchdog slept and will poll again.
    Running,
    /// A device was found unplugged, now or on an earlier step.
    Alerted(FaultReport),
}

impl WatchdogStatus {
    pub fn is_alerted(&self) -> bool {
        matches!(self, Self::Alerted(_))
    }
}

/// One watchdog run over a fixed device set.
pub struct Watchdog<B, A, D> {
    bus: B,
    alerts: A,
    delay: D,
    devices: DeviceSet,
    ticks: u64,
    fault: Option<FaultReport>,
}

impl<B, A, D> Watchdog<B, A, D>
where
    B: DeviceBus,
    A: AlertSink,
    D: DelayNs,
{
    pub fn new(bus: B, alerts: A, delay: D, devices: DeviceSet) -> Self {
        Self {
            bus,
            alerts,
            delay,
            devices,
            ticks: 0,
            fault: None,
        }
    }

    /// Completed polls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn devices(&self) -> &DeviceSet {
        &self.devices
    }

    /// The fault that ended this run, if it has ended.
    pub fn fault(&self) -> Option<&FaultReport> {
        self.fault.as_ref()
    }

    /// Advance one tick: poll every device, then sleep if all were present.
    ///
    /// Once alerted, further calls return the same report and touch
    /// neither the bus, the alert sink nor the delay.
    pub fn step(&mut self) -> WatchdogStatus {
        if let Some(report) = &self.fault {
            return WatchdogStatus::Alerted(report.clone());
        }

        self.ticks += 1;
        if let Some(report) = self.poll() {
            self.raise(&report);
            self.fault = Some(report.clone());
            return WatchdogStatus::Alerted(report);
        }

        debug!("Watchdog: tick {} ok ({} devices)", self.ticks, self.devices.len());
        self.delay.delay_ms(POLL_INTERVAL_MS);
        WatchdogStatus::Running
    }

    /// Poll until the first fault and return its report.
    ///
    /// Never returns while every device stays plugged in.
    pub fn run(mut self) -> FaultReport {
        info!(
            "Watchdog: monitoring {} devices every {}ms",
            self.devices.len(),
            POLL_INTERVAL_MS
        );
        if self.devices.is_empty() {
            warn!("Watchdog: device set is empty, nothing can fault");
        }

        loop {
            if let WatchdogStatus::Alerted(report) = self.step() {
                return report;
            }
        }
    }

    /// First device in set order that is not plugged in.
    ///
    /// One bus read per device: the tag that fails the plugged-in test is
    /// the one that goes into the report.
    fn poll(&self) -> Option<FaultReport> {
        self.devices.iter().find_map(|device| {
            let port = device.port();
            let observed = self.bus.plugged_type(port);
            (!observed.is_present())
                .then(|| FaultReport::new(port, device.name(), self.ticks, observed))
        })
    }

    fn raise(&mut self, report: &FaultReport) {
        error!("Watchdog: {report}; halting");
        self.alerts.rumble(ALERT_RUMBLE_PATTERN);
        self.alerts.print(ALERT_ROW, ALERT_COL, ALERT_MESSAGE);
    }
}

impl<B, A, D> Watchdog<B, A, D>
where
    B: DeviceBus + Send + 'static,
    A: AlertSink + Send + 'static,
    D: DelayNs + Send + 'static,
{
    /// Start [`run`](Self::run) on a dedicated thread with
    /// [`DEFAULT_STACK_KB`] of stack.
    pub fn spawn(self) -> anyhow::Result<WatchdogHandle> {
        self.spawn_with_stack(DEFAULT_STACK_KB)
    }

    /// Start [`run`](Self::run) on a dedicated thread with `stack_kb` of
    /// stack, for loggers or adapters that need more than the default.
    pub fn spawn_with_stack(self, stack_kb: usize) -> anyhow::Result<WatchdogHandle> {
        let thread = task::spawn_named(THREAD_NAME, stack_kb, move || self.run())?;
        Ok(WatchdogHandle { thread })
    }
}

/// Handle to a watchdog running on its own thread.
pub struct WatchdogHandle {
    thread: std::thread::JoinHandle<FaultReport>,
}

impl WatchdogHandle {
    /// True once the run has alerted and returned.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the run alerts and return its report.
    pub fn join(self) -> anyhow::Result<FaultReport> {
        self.thread
            .join()
            .map_err(|_| anyhow::anyhow!("{THREAD_NAME} thread panicked"))
    }
}
