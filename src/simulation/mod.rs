//! Standalone warehouse logistics simulation
//!
//! This module contains the process/operation/AGV computation model together
//! with scenario loading and report formatting. Everything here is
//! synchronous and free of I/O except reading scenario files.

mod agv;
mod batch;
mod operation;
mod process;
pub mod report;
mod scenario;
mod types;

pub use agv::{join_ids, Agv, AgvRef};
pub use batch::Batch;
pub use operation::{Operation, OperationKind, OperationRef};
pub use process::{IndustrialProcess, ProcessRef};
pub use report::{batch_summary, full_report, json_summary, process_report, BatchSummary};
pub use scenario::{AgvSpec, OperationSpec, ProcessSpec, Scenario, ScenarioConfig};
pub use types::{
    AgvId, DataValue, OperationId, ProcessId, DATA_KEY_DISTANCE_M, MINUTES_PER_HOUR,
    SECONDS_PER_MINUTE, TRANSPORT_OVERHEAD_MINUTES,
};
