//! AGV entity for the warehouse simulation
//!
//! AGVs are shared between operations and processes, so the handful of
//! attributes that may change after construction live in `Cell`s and are
//! updated through `&self`.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::types::{AgvId, MINUTES_PER_HOUR};

/// Shared handle to an AGV
pub type AgvRef = Rc<Agv>;

/// An autonomous guided vehicle
#[derive(Debug)]
pub struct Agv {
    pub id: AgvId,
    /// Current battery charge (kWh). Stored only.
    battery_kwh: Cell<f64>,
    /// Power draw while operating (kW)
    pub consumption_kw: f64,
    /// Time needed for a full charge (minutes). Stored only.
    pub charging_time_min: f64,
    /// Textual location label, e.g. "Dock-1"
    pub position: String,
    pub max_speed_mps: f32,
    act_speed_mps: Cell<f32>,
}

impl Agv {
    pub fn new(
        id: impl Into<AgvId>,
        battery_kwh: f64,
        consumption_kw: f64,
        charging_time_min: f64,
        position: impl Into<String>,
        max_speed_mps: f32,
        act_speed_mps: f32,
    ) -> Self {
        Self {
            id: id.into(),
            battery_kwh: Cell::new(battery_kwh),
            consumption_kw,
            charging_time_min,
            position: position.into(),
            max_speed_mps,
            act_speed_mps: Cell::new(act_speed_mps),
        }
    }

    /// Convenience constructor returning a shared handle
    pub fn shared(
        id: impl Into<AgvId>,
        battery_kwh: f64,
        consumption_kw: f64,
        charging_time_min: f64,
        position: impl Into<String>,
        max_speed_mps: f32,
        act_speed_mps: f32,
    ) -> AgvRef {
        Rc::new(Self::new(
            id,
            battery_kwh,
            consumption_kw,
            charging_time_min,
            position,
            max_speed_mps,
            act_speed_mps,
        ))
    }

    pub fn battery_kwh(&self) -> f64 {
        self.battery_kwh.get()
    }

    pub fn set_battery_kwh(&self, battery_kwh: f64) {
        self.battery_kwh.set(battery_kwh);
    }

    pub fn act_speed_mps(&self) -> f32 {
        self.act_speed_mps.get()
    }

    /// Set the current speed. Not clamped to `max_speed_mps`.
    pub fn set_act_speed_mps(&self, speed: f32) {
        self.act_speed_mps.set(speed);
    }

    /// Energy (kWh) drawn while operating for the given number of minutes.
    /// Negative durations are not rejected and give negative energy.
    pub fn energy_for_duration(&self, minutes: f64) -> f64 {
        (minutes / MINUTES_PER_HOUR) * self.consumption_kw
    }
}

impl fmt::Display for Agv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AGV({})", self.id)
    }
}

/// Append `agv` to `seen` unless the same instance is already present
pub(crate) fn push_distinct(seen: &mut Vec<AgvRef>, agv: &AgvRef) {
    if !seen.iter().any(|existing| Rc::ptr_eq(existing, agv)) {
        seen.push(Rc::clone(agv));
    }
}

/// Join AGV ids with ", " in the given order
pub fn join_ids<'a>(agvs: impl IntoIterator<Item = &'a AgvRef>) -> String {
    agvs.into_iter()
        .map(|agv| agv.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
