//! Industrial processes: ordered sequences of operations

use std::rc::Rc;

use super::agv::{push_distinct, AgvRef};
use super::operation::{Operation, OperationRef};
use super::types::ProcessId;

/// Shared handle to a process
pub type ProcessRef = Rc<IndustrialProcess>;

/// A logistics workflow, e.g. inbound receiving.
///
/// Operations run one after another, so the process duration is the plain
/// sum of operation durations in insertion order.
#[derive(Debug)]
pub struct IndustrialProcess {
    pub id: ProcessId,
    operations: Vec<OperationRef>,
}

impl IndustrialProcess {
    pub fn new(id: impl Into<ProcessId>) -> Self {
        Self {
            id: id.into(),
            operations: Vec::new(),
        }
    }

    /// Append an operation. Duplicate ids are allowed.
    pub fn add_operation(&mut self, operation: OperationRef) {
        self.operations.push(operation);
    }

    /// Wrap and append an owned operation, returning the shared handle
    pub fn push(&mut self, operation: Operation) -> OperationRef {
        let operation = operation.into_shared();
        self.add_operation(Rc::clone(&operation));
        operation
    }

    pub fn operations(&self) -> &[OperationRef] {
        &self.operations
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.operations
            .iter()
            .fold(0.0, |total, op| total + op.duration_minutes())
    }

    /// AGVs used by any operation, each instance once, in order of first use
    pub fn distinct_resources(&self) -> Vec<AgvRef> {
        let mut distinct = Vec::new();
        for agv in self.operations.iter().flat_map(|op| op.resources()) {
            push_distinct(&mut distinct, agv);
        }
        distinct
    }

    /// Energy drawn by every AGV of every operation (kWh).
    /// An AGV listed twice on one operation is charged twice.
    pub fn total_energy_kwh(&self) -> f64 {
        let mut total = 0.0;
        for op in &self.operations {
            let minutes = op.duration_minutes();
            for agv in op.resources() {
                total += agv.energy_for_duration(minutes);
            }
        }
        total
    }

    pub fn into_shared(self) -> ProcessRef {
        Rc::new(self)
    }
}
