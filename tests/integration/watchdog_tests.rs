//! Integration tests: Watchdog → bus polling → alert sink → FaultReport.

use std::time::Duration;

use portguard::adapters::delay::StdDelay;
use portguard::adapters::sim_brain::SimBrain;
use portguard::app::ports::AlertSink;
use portguard::device::{Device, DeviceSet, DeviceType, Port};
use portguard::watchdog::{
    ALERT_MESSAGE, ALERT_RUMBLE_PATTERN, DEFAULT_STACK_KB, POLL_INTERVAL_MS, Watchdog,
    WatchdogStatus,
};

use super::mock_hw::{AlertCall, RecordingAlerts, Rig};

fn three_motors(rig: &Rig) -> DeviceSet {
    rig.plug(1, DeviceType::Motor)
        .plug(2, DeviceType::Motor)
        .plug(3, DeviceType::Motor);
    let mut set = DeviceSet::new();
    set.push(Device::new(1).named("left")).unwrap();
    set.push(Device::new(2).named("right")).unwrap();
    set.push(Device::new(3).named("intake")).unwrap();
    set
}

fn expected_alert() -> Vec<AlertCall> {
    vec![
        AlertCall::Rumble(ALERT_RUMBLE_PATTERN.to_string()),
        AlertCall::Print {
            row: 0,
            col: 0,
            text: ALERT_MESSAGE.to_string(),
        },
    ]
}

#[test]
fn unplug_on_tick_three_alerts_once_and_stops() {
    let rig = Rig::new();
    let set = three_motors(&rig);
    rig.at_tick(3, 2, DeviceType::None);
    let alerts = RecordingAlerts::new();

    let wd = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), set);
    let report = wd.run();

    assert_eq!(report.port, Port::new(2));
    assert_eq!(report.device.as_str(), "right");
    assert_eq!(report.tick, 3);
    assert_eq!(report.observed, DeviceType::None);
    assert_eq!(report.status_code(), 1);

    assert_eq!(alerts.calls(), expected_alert());

    // Device 3 is never reached on the faulting tick, and nothing after it.
    assert_eq!(rig.ports_queried_on(1), vec![1, 2, 3]);
    assert_eq!(rig.ports_queried_on(2), vec![1, 2, 3]);
    assert_eq!(rig.ports_queried_on(3), vec![1, 2]);
    assert!(rig.queries().iter().all(|(t, _)| *t <= 3));
    assert_eq!(rig.delays_ms(), vec![POLL_INTERVAL_MS; 2]);
}

#[test]
fn healthy_set_polls_at_fixed_cadence_without_alerting() {
    let rig = Rig::new();
    let set = three_motors(&rig);
    let alerts = RecordingAlerts::new();
    let mut wd = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), set);

    for _ in 0..25 {
        assert_eq!(wd.step(), WatchdogStatus::Running);
    }

    assert!(alerts.calls().is_empty());
    assert_eq!(wd.ticks(), 25);
    assert_eq!(rig.delays_ms(), vec![500; 25]);
    assert_eq!(rig.queries().len(), 75);
    assert!(wd.fault().is_none());
}

#[test]
fn alerted_is_sticky() {
    let rig = Rig::new();
    let set = three_motors(&rig);
    rig.at_tick(2, 1, DeviceType::Undefined);
    let alerts = RecordingAlerts::new();
    let mut wd = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), set);

    assert_eq!(wd.step(), WatchdogStatus::Running);
    let first = wd.step();
    assert!(first.is_alerted());

    // Plugging the device back in changes nothing.
    rig.at_tick(2, 1, DeviceType::Motor);
    let queries = rig.queries().len();
    for _ in 0..5 {
        assert_eq!(wd.step(), first);
    }

    assert_eq!(rig.queries().len(), queries);
    assert_eq!(alerts.calls(), expected_alert());
    assert_eq!(rig.delays_ms(), vec![500]);
    assert_eq!(wd.ticks(), 2);
}

#[test]
fn first_failing_device_in_order_is_reported() {
    let rig = Rig::new();
    rig.plug(5, DeviceType::Imu);
    let set = DeviceSet::from_ports(&[5, 8, 9]).unwrap();
    let alerts = RecordingAlerts::new();

    let report = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), set).run();

    assert_eq!(report.port, Port::new(8));
    assert_eq!(report.tick, 1);
    assert_eq!(rig.ports_queried_on(1), vec![5, 8]);
    assert!(rig.delays_ms().is_empty());
    assert_eq!(alerts.calls().len(), 2);
}

#[test]
fn undefined_counts_as_unplugged() {
    let rig = Rig::new();
    rig.plug(1, DeviceType::Undefined);
    let set = DeviceSet::from_ports(&[1]).unwrap();
    let report = Watchdog::new(rig.bus(), RecordingAlerts::new(), rig.delay(), set).run();
    assert_eq!(report.observed, DeviceType::Undefined);
}

#[test]
fn any_present_type_keeps_the_watchdog_quiet() {
    let rig = Rig::new();
    rig.plug(1, DeviceType::Gps)
        .plug(2, DeviceType::from_raw(77))
        .plug(3, DeviceType::Serial);
    let set = DeviceSet::from_ports(&[1, 2, 3]).unwrap();
    let alerts = RecordingAlerts::new();
    let mut wd = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), set);
    for _ in 0..5 {
        assert_eq!(wd.step(), WatchdogStatus::Running);
    }
    assert!(alerts.calls().is_empty());
}

#[test]
fn empty_set_never_faults() {
    let rig = Rig::new();
    let alerts = RecordingAlerts::new();
    let mut wd = Watchdog::new(rig.bus(), alerts.clone(), rig.delay(), DeviceSet::new());
    for _ in 0..3 {
        assert_eq!(wd.step(), WatchdogStatus::Running);
    }
    assert!(rig.queries().is_empty());
    assert_eq!(rig.delays_ms().len(), 3);
    assert!(alerts.calls().is_empty());
}

#[test]
fn spawned_watchdog_reports_through_its_handle() {
    let brain = SimBrain::new();
    brain.plug(1, DeviceType::Motor);
    brain.plug(2, DeviceType::Imu);
    brain.plug(3, DeviceType::Radio);
    let mut set = DeviceSet::new();
    set.push(Device::new(1).named("drive")).unwrap();
    set.push(Device::new(2).named("imu")).unwrap();
    set.push(Device::new(3).named("radio")).unwrap();
    let alerts = RecordingAlerts::new();

    let handle = Watchdog::new(brain.clone(), alerts.clone(), StdDelay::new(), set)
        .spawn()
        .unwrap();

    std::thread::sleep(Duration::from_millis(50));
    assert!(!handle.is_finished());
    assert!(alerts.calls().is_empty());

    brain.unplug(2);
    let report = handle.join().unwrap();

    assert_eq!(report.port, Port::new(2));
    assert_eq!(report.device.as_str(), "imu");
    assert!(report.tick >= 1);
    assert_eq!(alerts.calls(), expected_alert());
}

/// Alert sink that renders into a large on-stack buffer, the way a host
/// logger formats a record.
struct BufferedAlerts {
    inner: RecordingAlerts,
}

impl BufferedAlerts {
    fn render(text: &str) -> String {
        let mut buf = [0u8; 20 * 1024];
        let buf = std::hint::black_box(&mut buf);
        let n = text.len().min(buf.len());
        buf[..n].copy_from_slice(&text.as_bytes()[..n]);
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }
}

impl AlertSink for BufferedAlerts {
    fn rumble(&mut self, pattern: &str) {
        let pattern = Self::render(pattern);
        self.inner.rumble(&pattern);
    }

    fn print(&mut self, row: u8, col: u8, text: &str) {
        let text = Self::render(text);
        self.inner.print(row, col, &text);
    }
}

#[test]
fn default_stack_fits_a_formatting_alert_sink() {
    assert!(DEFAULT_STACK_KB >= 32);

    let brain = SimBrain::new();
    let set = DeviceSet::from_ports(&[4]).unwrap();
    let alerts = RecordingAlerts::new();
    let sink = BufferedAlerts {
        inner: alerts.clone(),
    };

    let report = Watchdog::new(brain, sink, StdDelay::new(), set)
        .spawn()
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(report.port, Port::new(4));
    assert_eq!(alerts.calls(), expected_alert());
}

#[test]
fn stack_size_can_be_raised_per_watchdog() {
    let brain = SimBrain::new();
    let set = DeviceSet::from_ports(&[9]).unwrap();
    let alerts = RecordingAlerts::new();

    let report = Watchdog::new(brain, alerts.clone(), StdDelay::new(), set)
        .spawn_with_stack(DEFAULT_STACK_KB * 2)
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(report.port, Port::new(9));
    assert_eq!(report.tick, 1);
    assert_eq!(alerts.calls(), expected_alert());
}
