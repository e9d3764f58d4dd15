//! Operations executed within an industrial process
//!
//! Every operation shares the same base data (id, description, required
//! AGVs, auxiliary data) and differs only in how its duration is derived,
//! which is captured by [`OperationKind`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::agv::AgvRef;
use super::types::{
    DataValue, OperationId, DATA_KEY_DISTANCE_M, SECONDS_PER_MINUTE, TRANSPORT_OVERHEAD_MINUTES,
};

/// Shared handle to an operation
pub type OperationRef = Rc<Operation>;

/// How an operation's duration is obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationKind {
    /// Load/unload, pick, pack: takes a fixed amount of time
    Fixed { minutes: f64 },
    /// Moves goods over a distance with a single AGV at its current speed
    Transport { distance_m: f64 },
}

/// A unit of work requiring zero or more AGVs
#[derive(Debug)]
pub struct Operation {
    pub id: OperationId,
    pub description: String,
    pub kind: OperationKind,
    resources: Vec<AgvRef>,
    data: RefCell<BTreeMap<String, DataValue>>,
}

impl Operation {
    /// Create a fixed-duration operation
    pub fn fixed(
        id: impl Into<OperationId>,
        description: impl Into<String>,
        minutes: f64,
        resources: Vec<AgvRef>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: OperationKind::Fixed { minutes },
            resources,
            data: RefCell::new(BTreeMap::new()),
        }
    }

    /// Create a transport operation over `distance_m` meters using `agv`.
    /// The distance is also recorded under [`DATA_KEY_DISTANCE_M`].
    pub fn transport(
        id: impl Into<OperationId>,
        description: impl Into<String>,
        distance_m: f64,
        agv: AgvRef,
    ) -> Self {
        let operation = Self {
            id: id.into(),
            description: description.into(),
            kind: OperationKind::Transport { distance_m },
            resources: vec![agv],
            data: RefCell::new(BTreeMap::new()),
        };
        operation.set_data(DATA_KEY_DISTANCE_M, distance_m);
        operation
    }

    /// Wrap the operation in a shared handle
    pub fn into_shared(self) -> OperationRef {
        Rc::new(self)
    }

    /// AGVs required by this operation, in declaration order
    pub fn resources(&self) -> &[AgvRef] {
        &self.resources
    }

    /// Planned duration in minutes.
    ///
    /// For transports this is the same speed-dependent value as
    /// [`Operation::duration_minutes`]; only fixed operations have an
    /// independent planned figure. The asymmetry is kept as-is.
    pub fn nominal_duration_minutes(&self) -> f64 {
        match self.kind {
            OperationKind::Fixed { minutes } => minutes,
            OperationKind::Transport { .. } => self.duration_minutes(),
        }
    }

    /// Duration in minutes used by every aggregate.
    ///
    /// A transport whose AGV is stopped (speed <= 0) never finishes and
    /// returns `f64::INFINITY`.
    pub fn duration_minutes(&self) -> f64 {
        match self.kind {
            OperationKind::Fixed { minutes } => minutes,
            OperationKind::Transport { distance_m } => {
                let speed_mps = f64::from(self.resources[0].act_speed_mps());
                if speed_mps <= 0.0 {
                    return f64::INFINITY;
                }
                (distance_m / speed_mps) / SECONDS_PER_MINUTE + TRANSPORT_OVERHEAD_MINUTES
            }
        }
    }

    pub fn set_data(&self, key: impl Into<String>, value: impl Into<DataValue>) {
        self.data.borrow_mut().insert(key.into(), value.into());
    }

    pub fn data(&self, key: &str) -> Option<DataValue> {
        self.data.borrow().get(key).cloned()
    }

    /// Snapshot of all auxiliary data, ordered by key
    pub fn data_entries(&self) -> Vec<(String, DataValue)> {
        self.data
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, OperationKind::Transport { .. })
    }
}
