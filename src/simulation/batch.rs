//! Batches of processes aggregated for summary reporting

use std::rc::Rc;

use super::agv::{push_distinct, AgvRef};
use super::process::ProcessRef;

/// An ad hoc collection of processes
#[derive(Debug, Default)]
pub struct Batch {
    processes: Vec<ProcessRef>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_process(&mut self, process: ProcessRef) {
        self.processes.push(process);
    }

    pub fn processes(&self) -> &[ProcessRef] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.processes
            .iter()
            .fold(0.0, |total, p| total + p.total_duration_minutes())
    }

    pub fn total_energy_kwh(&self) -> f64 {
        self.processes
            .iter()
            .fold(0.0, |total, p| total + p.total_energy_kwh())
    }

    /// Distinct AGVs across all processes, in order of first use
    pub fn distinct_resources(&self) -> Vec<AgvRef> {
        let mut distinct = Vec::new();
        for process in &self.processes {
            for agv in process.distinct_resources() {
                push_distinct(&mut distinct, &agv);
            }
        }
        distinct
    }
}

impl FromIterator<ProcessRef> for Batch {
    fn from_iter<I: IntoIterator<Item = ProcessRef>>(iter: I) -> Self {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a ProcessRef> for Batch {
    fn from_iter<I: IntoIterator<Item = &'a ProcessRef>>(iter: I) -> Self {
        iter.into_iter().map(Rc::clone).collect()
    }
}
