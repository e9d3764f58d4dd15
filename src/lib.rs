//! Warehouse Logistics Simulation Library
//!
//! Deterministic model of industrial processes executed by AGVs: operation
//! durations, resource usage and energy consumption.

pub mod simulation;
