//! Scenario construction
//!
//! A scenario is the static input of a simulation run: the AGV fleet and the
//! processes that use it. It comes either from the built-in demonstration
//! data or from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::agv::{Agv, AgvRef};
use super::batch::Batch;
use super::operation::Operation;
use super::process::IndustrialProcess;
use super::types::AgvId;

/// AGV entry of a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgvSpec {
    pub id: String,
    pub battery_kwh: f64,
    pub consumption_kw: f64,
    pub charging_time_min: f64,
    pub position: String,
    pub max_speed_mps: f32,
    pub act_speed_mps: f32,
}

/// Operation entry of a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum OperationSpec {
    Fixed {
        id: String,
        description: String,
        minutes: f64,
        #[serde(default)]
        agvs: Vec<String>,
    },
    Transport {
        id: String,
        description: String,
        distance_m: f64,
        agv: String,
    },
}

/// Process entry of a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessSpec {
    pub id: String,
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

/// Scenario file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub agvs: Vec<AgvSpec>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
}

impl ScenarioConfig {
    /// The demonstration scenario: inbound receiving with AGV-A and
    /// outbound picking with AGV-B.
    pub fn demo() -> Self {
        let agv = |id: &str, consumption_kw: f64, position: &str, act_speed_mps: f32| AgvSpec {
            id: id.to_string(),
            battery_kwh: 15.0,
            consumption_kw,
            charging_time_min: 30.0,
            position: position.to_string(),
            max_speed_mps: 2.0,
            act_speed_mps,
        };
        let fixed = |id: &str, description: &str, minutes: f64, agv: &str| OperationSpec::Fixed {
            id: id.to_string(),
            description: description.to_string(),
            minutes,
            agvs: vec![agv.to_string()],
        };
        let transport =
            |id: &str, description: &str, distance_m: f64, agv: &str| OperationSpec::Transport {
                id: id.to_string(),
                description: description.to_string(),
                distance_m,
                agv: agv.to_string(),
            };

        Self {
            agvs: vec![
                agv("AGV-A", 2.0, "Dock-1", 1.2),
                agv("AGV-B", 1.8, "Dock-2", 1.0),
            ],
            processes: vec![
                ProcessSpec {
                    id: "Inbound-Receiving".to_string(),
                    operations: vec![
                        fixed("OP-1", "Dock receive", 6.0, "AGV-A"),
                        transport("OP-2", "Move pallets to storage (120 m)", 120.0, "AGV-A"),
                        fixed("OP-3", "Putaway at rack", 4.0, "AGV-A"),
                    ],
                },
                ProcessSpec {
                    id: "Outbound-Picking".to_string(),
                    operations: vec![
                        fixed("OP-4", "Pick at rack", 5.0, "AGV-B"),
                        transport("OP-5", "Move to packing (150 m)", 150.0, "AGV-B"),
                        fixed("OP-6", "Packing", 7.0, "AGV-B"),
                    ],
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid scenario file {}", path.display()))
    }

    /// Apply a speed override written as `ID=MPS` to the AGV entry, before
    /// the scenario is built and checked.
    pub fn apply_speed_override(&mut self, spec: &str) -> Result<()> {
        let (id, speed) = spec
            .split_once('=')
            .with_context(|| format!("Speed override '{}' is not of the form ID=MPS", spec))?;
        let speed: f32 = speed
            .trim()
            .parse()
            .with_context(|| format!("Invalid speed in override '{}'", spec))?;
        let agv = self
            .agvs
            .iter_mut()
            .find(|agv| agv.id == id.trim())
            .with_context(|| format!("Speed override names unknown AGV {}", id.trim()))?;

        debug!("AGV {} speed {} -> {} m/s", agv.id, agv.act_speed_mps, speed);
        agv.act_speed_mps = speed;
        Ok(())
    }

    /// List degenerate values that the model accepts but that produce
    /// infinite, negative or otherwise meaningless results.
    pub fn degenerate_values(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for agv in &self.agvs {
            if agv.act_speed_mps <= 0.0 {
                issues.push(format!(
                    "AGV {} has non-positive speed {} m/s; its transports never finish",
                    agv.id, agv.act_speed_mps
                ));
            }
            if agv.act_speed_mps > agv.max_speed_mps {
                issues.push(format!(
                    "AGV {} speed {} m/s exceeds its maximum {} m/s",
                    agv.id, agv.act_speed_mps, agv.max_speed_mps
                ));
            }
            if agv.consumption_kw < 0.0 {
                issues.push(format!(
                    "AGV {} has negative consumption {} kW",
                    agv.id, agv.consumption_kw
                ));
            }
        }

        for process in &self.processes {
            for op in &process.operations {
                match op {
                    OperationSpec::Fixed { id, minutes, .. } if *minutes < 0.0 => {
                        issues.push(format!(
                            "Operation {} in {} has negative duration {} min",
                            id, process.id, minutes
                        ));
                    }
                    OperationSpec::Transport { id, distance_m, .. } if *distance_m < 0.0 => {
                        issues.push(format!(
                            "Operation {} in {} has negative distance {} m",
                            id, process.id, distance_m
                        ));
                    }
                    _ => {}
                }
            }
        }

        issues
    }

    /// Build the simulation model.
    ///
    /// With `strict` set, any degenerate value is an error; otherwise each is
    /// logged as a warning and passed through unchanged.
    pub fn build(&self, strict: bool) -> Result<Scenario> {
        let issues = self.degenerate_values();
        if strict && !issues.is_empty() {
            bail!("Scenario has degenerate values: {}", issues.join("; "));
        }
        for issue in &issues {
            warn!("{}", issue);
        }

        let mut agvs: Vec<AgvRef> = Vec::with_capacity(self.agvs.len());
        let mut by_id: HashMap<&str, AgvRef> = HashMap::new();
        for spec in &self.agvs {
            let agv = Agv::shared(
                spec.id.as_str(),
                spec.battery_kwh,
                spec.consumption_kw,
                spec.charging_time_min,
                spec.position.as_str(),
                spec.max_speed_mps,
                spec.act_speed_mps,
            );
            if by_id.insert(spec.id.as_str(), Rc::clone(&agv)).is_some() {
                bail!("Duplicate AGV id {}", spec.id);
            }
            agvs.push(agv);
        }

        let lookup = |process_id: &str, op_id: &str, agv_id: &str| -> Result<AgvRef> {
            by_id.get(agv_id).cloned().with_context(|| {
                format!(
                    "Operation {} in process {} references unknown AGV {}",
                    op_id, process_id, agv_id
                )
            })
        };

        let mut batch = Batch::new();
        for process_spec in &self.processes {
            let mut process = IndustrialProcess::new(process_spec.id.as_str());
            for op_spec in &process_spec.operations {
                let operation = match op_spec {
                    OperationSpec::Fixed {
                        id,
                        description,
                        minutes,
                        agvs: agv_ids,
                    } => {
                        let resources = agv_ids
                            .iter()
                            .map(|agv_id| lookup(&process_spec.id, id, agv_id))
                            .collect::<Result<Vec<_>>>()?;
                        Operation::fixed(id.as_str(), description.as_str(), *minutes, resources)
                    }
                    OperationSpec::Transport {
                        id,
                        description,
                        distance_m,
                        agv,
                    } => {
                        let agv = lookup(&process_spec.id, id, agv)?;
                        Operation::transport(id.as_str(), description.as_str(), *distance_m, agv)
                    }
                };
                process.push(operation);
            }
            debug!(
                "Built process {} with {} operations",
                process.id,
                process.operations().len()
            );
            batch.add_process(process.into_shared());
        }

        debug!(
            "Scenario ready: {} AGVs, {} processes",
            agvs.len(),
            batch.len()
        );

        Ok(Scenario { agvs, batch })
    }
}

/// A built scenario: the fleet and the batch of processes using it
#[derive(Debug)]
pub struct Scenario {
    pub agvs: Vec<AgvRef>,
    pub batch: Batch,
}

impl Scenario {
    /// Build the demonstration scenario
    pub fn demo() -> Result<Self> {
        ScenarioConfig::demo().build(false)
    }

    pub fn agv(&self, id: &AgvId) -> Option<&AgvRef> {
        self.agvs.iter().find(|agv| agv.id == *id)
    }
}
