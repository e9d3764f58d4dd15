//! Text reports for processes and batches
//!
//! The layout is fixed: other tooling parses these lines, so numbers always
//! use `.` as the decimal separator and a fixed number of decimals.

use serde::Serialize;

use super::agv::join_ids;
use super::batch::Batch;
use super::operation::Operation;
use super::process::IndustrialProcess;

/// Minimum width of the description column in operation lines
pub const DESCRIPTION_WIDTH: usize = 18;

/// Format `value` with `decimals` places, rounding half up on the shortest
/// decimal representation of the value (so `0.125` gives `0.13`). Non-finite
/// values are spelled out as `Infinity`, `-Infinity` and `NaN`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let frac = frac_part.as_bytes();
    digits.extend((0..decimals).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(decimals).is_some_and(|&next| next >= b'5') {
        round_up(&mut digits);
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| d as char));
    }
    out
}

/// Add one unit in the last place of an ASCII digit string, carrying left
fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Render the report block for a single process, trailing blank line included
pub fn process_report(process: &IndustrialProcess) -> String {
    let mut out = format!("=== IndustrialProcess: {} ===\n", process.id);
    for op in process.operations() {
        out.push_str(&format!(
            "- op[{}] {:<width$} duration={} min  AGVs=[{}]\n",
            op.id,
            op.description,
            format_fixed(op.duration_minutes(), 2),
            join_ids(op.resources()),
            width = DESCRIPTION_WIDTH
        ));
    }
    let resources = process.distinct_resources();
    out.push_str(&format!(
        "Total duration: {} minutes\n\
         AGVs required: {} -> {}\n\
         Energy consumption: {} kWh\n\n",
        format_fixed(process.total_duration_minutes(), 2),
        resources.len(),
        join_ids(&resources),
        format_fixed(process.total_energy_kwh(), 3)
    ));
    out
}

/// Render the one-line batch summary under its header
pub fn batch_summary(batch: &Batch) -> String {
    format!(
        "=== Batch Summary ===\n\
         Processes: {} | Total time: {} min | Energy: {} kWh | Distinct AGVs: {}\n",
        batch.len(),
        format_fixed(batch.total_duration_minutes(), 2),
        format_fixed(batch.total_energy_kwh(), 3),
        join_ids(&batch.distinct_resources())
    )
}

/// Full report: every process block followed by the batch summary
pub fn full_report(batch: &Batch) -> String {
    let mut out = String::new();
    for process in batch.processes() {
        out.push_str(&process_report(process));
    }
    out.push_str(&batch_summary(batch));
    out
}

/// Machine-readable view of one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSummary {
    pub id: String,
    pub description: String,
    pub transport: bool,
    pub duration_minutes: f64,
    pub agvs: Vec<String>,
}

/// Machine-readable view of one process
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSummary {
    pub id: String,
    pub total_duration_minutes: f64,
    pub energy_kwh: f64,
    pub distinct_agvs: Vec<String>,
    pub operations: Vec<OperationSummary>,
}

/// Machine-readable view of a whole batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub process_count: usize,
    pub total_duration_minutes: f64,
    pub energy_kwh: f64,
    pub distinct_agvs: Vec<String>,
    pub processes: Vec<ProcessSummary>,
}

impl From<&Operation> for OperationSummary {
    fn from(op: &Operation) -> Self {
        Self {
            id: op.id.to_string(),
            description: op.description.clone(),
            transport: op.is_transport(),
            duration_minutes: op.duration_minutes(),
            agvs: op.resources().iter().map(|agv| agv.id.to_string()).collect(),
        }
    }
}

impl From<&IndustrialProcess> for ProcessSummary {
    fn from(process: &IndustrialProcess) -> Self {
        Self {
            id: process.id.to_string(),
            total_duration_minutes: process.total_duration_minutes(),
            energy_kwh: process.total_energy_kwh(),
            distinct_agvs: process
                .distinct_resources()
                .iter()
                .map(|agv| agv.id.to_string())
                .collect(),
            operations: process
                .operations()
                .iter()
                .map(|op| OperationSummary::from(op.as_ref()))
                .collect(),
        }
    }
}

impl From<&Batch> for BatchSummary {
    fn from(batch: &Batch) -> Self {
        Self {
            process_count: batch.len(),
            total_duration_minutes: batch.total_duration_minutes(),
            energy_kwh: batch.total_energy_kwh(),
            distinct_agvs: batch
                .distinct_resources()
                .iter()
                .map(|agv| agv.id.to_string())
                .collect(),
            processes: batch
                .processes()
                .iter()
                .map(|process| ProcessSummary::from(process.as_ref()))
                .collect(),
        }
    }
}

/// Pretty-printed JSON summary of a batch
pub fn json_summary(batch: &Batch) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BatchSummary::from(batch))
}
