//! Mock controller for integration tests.
//!
//! [`Rig`] owns a scripted port table plus a tick counter.  The bus it
//! hands out records every query with the tick it happened on; the delay
//! it hands out advances the tick, so scripted plug changes land on
//! exact watchdog ticks without any real sleeping.

use embedded_hal::delay::DelayNs;
use portguard::app::ports::{AlertSink, DeviceBus};
use portguard::device::{DeviceType, Port};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ── Alert call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertCall {
    Rumble(String),
    Print { row: u8, col: u8, text: String },
}

/// Alert sink whose clones share one call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlerts {
    calls: Arc<Mutex<Vec<AlertCall>>>,
}

#[allow(dead_code)]
impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<AlertCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn rumble(&mut self, pattern: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(AlertCall::Rumble(pattern.to_string()));
    }

    fn print(&mut self, row: u8, col: u8, text: &str) {
        self.calls.lock().unwrap().push(AlertCall::Print {
            row,
            col,
            text: text.to_string(),
        });
    }
}

// ── Rig ───────────────────────────────────────────────────────

#[derive(Default)]
struct RigState {
    tick: u64,
    base: HashMap<u8, DeviceType>,
    /// (from_tick, port, kind), applied in insertion order.
    changes: Vec<(u64, u8, DeviceType)>,
    queries: Vec<(u64, Port)>,
    delays_ms: Vec<u32>,
}

impl RigState {
    fn type_at(&self, port: u8) -> DeviceType {
        self.changes
            .iter()
            .rev()
            .find(|(from, p, _)| *p == port && *from <= self.tick)
            .map(|(_, _, kind)| *kind)
            .or_else(|| self.base.get(&port).copied())
            .unwrap_or(DeviceType::None)
    }
}

#[derive(Clone)]
pub struct Rig {
    state: Arc<Mutex<RigState>>,
}

#[allow(dead_code)]
impl Rig {
    /// Empty port table, starting on tick 1.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RigState {
                tick: 1,
                ..RigState::default()
            })),
        }
    }

    /// Attach `kind` at `port` from the start.
    pub fn plug(&self, port: u8, kind: DeviceType) -> &Self {
        self.lock().base.insert(port, kind);
        self
    }

    /// Make `port` report `kind` from tick `tick` onwards.
    pub fn at_tick(&self, tick: u64, port: u8, kind: DeviceType) -> &Self {
        self.lock().changes.push((tick, port, kind));
        self
    }

    pub fn bus(&self) -> RigBus {
        RigBus { rig: self.clone() }
    }

    pub fn delay(&self) -> RigDelay {
        RigDelay { rig: self.clone() }
    }

    pub fn tick(&self) -> u64 {
        self.lock().tick
    }

    pub fn queries(&self) -> Vec<(u64, Port)> {
        self.lock().queries.clone()
    }

    pub fn ports_queried_on(&self, tick: u64) -> Vec<u8> {
        self.lock()
            .queries
            .iter()
            .filter(|(t, _)| *t == tick)
            .map(|(_, p)| p.number())
            .collect()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.lock().delays_ms.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RigState> {
        self.state.lock().unwrap()
    }
}

/// Bus view of a [`Rig`].
pub struct RigBus {
    rig: Rig,
}

impl DeviceBus for RigBus {
    fn plugged_type(&self, port: Port) -> DeviceType {
        let mut state = self.rig.lock();
        let tick = state.tick;
        state.queries.push((tick, port));
        state.type_at(port.number())
    }
}

/// Delay view of a [`Rig`]: every millisecond delay ends the current tick.
pub struct RigDelay {
    rig: Rig,
}

impl DelayNs for RigDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut state = self.rig.lock();
        state.delays_ms.push(ms);
        state.tick += 1;
    }
}
