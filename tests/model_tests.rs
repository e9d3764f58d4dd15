//! Computation model validation
//!
//! Checks operation durations, process aggregation and energy accounting.

use std::rc::Rc;

use warehouse_sim::simulation::{
    Agv, AgvRef, Batch, DataValue, IndustrialProcess, Operation, DATA_KEY_DISTANCE_M,
    TRANSPORT_OVERHEAD_MINUTES,
};

const TOLERANCE: f64 = 1e-9;

fn agv(id: &str, consumption_kw: f64, speed_mps: f32) -> AgvRef {
    Agv::shared(id, 15.0, consumption_kw, 30.0, "Dock-1", 2.0, speed_mps)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_agv_energy_for_duration() {
    let agv = agv("AGV-A", 2.0, 1.2);
    assert_close(agv.energy_for_duration(60.0), 2.0);
    assert_close(agv.energy_for_duration(15.0), 0.5);
    assert_eq!(agv.energy_for_duration(0.0), 0.0);
    // Negative input is passed through
    assert_close(agv.energy_for_duration(-30.0), -1.0);
}

#[test]
fn test_agv_setters_store_values() {
    let agv = agv("AGV-A", 2.0, 1.2);
    agv.set_battery_kwh(7.5);
    assert_eq!(agv.battery_kwh(), 7.5);

    // Speed above max is allowed
    agv.set_act_speed_mps(3.5);
    assert_eq!(agv.act_speed_mps(), 3.5);
    assert_eq!(agv.max_speed_mps, 2.0);
    assert_eq!(agv.to_string(), "AGV(AGV-A)");
}

#[test]
fn test_fixed_duration_is_nominal() {
    let agv = agv("AGV-A", 2.0, 1.2);
    for minutes in [0.0, 0.25, 6.0, 120.0] {
        let op = Operation::fixed("OP", "Pick", minutes, vec![Rc::clone(&agv)]);
        assert_eq!(op.duration_minutes(), minutes);
        assert_eq!(op.nominal_duration_minutes(), minutes);
    }
}

#[test]
fn test_fixed_operation_without_agvs() {
    let op = Operation::fixed("OP", "Inspect", 3.0, Vec::new());
    assert!(op.resources().is_empty());
    assert_eq!(op.duration_minutes(), 3.0);
    assert!(op.data(DATA_KEY_DISTANCE_M).is_none());
}

#[test]
fn test_transport_duration_formula() {
    for (distance, speed) in [(120.0, 1.2_f32), (150.0, 1.0), (0.0, 0.8), (1000.0, 2.5)] {
        let agv = agv("AGV-A", 2.0, speed);
        let op = Operation::transport("OP", "Move", distance, agv);
        let expected = (distance / f64::from(speed)) / 60.0 + 0.5;
        assert_close(op.duration_minutes(), expected);
    }
}

#[test]
fn test_transport_nominal_equals_duration() {
    let agv = agv("AGV-A", 2.0, 1.2);
    let op = Operation::transport("OP", "Move", 120.0, Rc::clone(&agv));
    assert_eq!(op.nominal_duration_minutes(), op.duration_minutes());

    // Nominal follows the AGV's current speed too
    agv.set_act_speed_mps(2.0);
    assert_close(op.nominal_duration_minutes(), 1.0 + TRANSPORT_OVERHEAD_MINUTES);
    assert_eq!(op.nominal_duration_minutes(), op.duration_minutes());
}

#[test]
fn test_transport_stalled_agv_is_infinite() {
    for speed in [0.0_f32, -1.0] {
        let agv = agv("AGV-A", 2.0, speed);
        let op = Operation::transport("OP", "Move", 50.0, agv);
        assert_eq!(op.duration_minutes(), f64::INFINITY);
        assert_eq!(op.nominal_duration_minutes(), f64::INFINITY);
    }
}

#[test]
fn test_transport_records_distance() {
    let op = Operation::transport("OP", "Move", 120.0, agv("AGV-A", 2.0, 1.2));
    assert_eq!(op.resources().len(), 1);
    assert_eq!(
        op.data(DATA_KEY_DISTANCE_M).and_then(|v| v.as_number()),
        Some(120.0)
    );
    assert!(op.is_transport());
}

#[test]
fn test_operation_data_map() {
    let op = Operation::fixed("OP", "Pack", 2.0, Vec::new());
    op.set_data("carton", "large");
    op.set_data("fragile", true);
    op.set_data("weight_kg", 12.5);
    op.set_data("carton", "small");

    assert_eq!(op.data("carton"), Some(DataValue::Text("small".to_string())));
    assert_eq!(op.data("fragile").and_then(|v| v.as_flag()), Some(true));
    assert_eq!(op.data("weight_kg").and_then(|v| v.as_number()), Some(12.5));
    assert!(op.data("missing").is_none());

    let keys: Vec<String> = op.data_entries().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["carton", "fragile", "weight_kg"]);
}

#[test]
fn test_process_total_duration_is_ordered_sum() {
    let agv = agv("AGV-A", 2.0, 1.2);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed("OP-1", "Dock receive", 6.0, vec![Rc::clone(&agv)]));
    process.push(Operation::transport("OP-2", "Move", 120.0, Rc::clone(&agv)));
    process.push(Operation::fixed("OP-3", "Putaway", 4.0, vec![Rc::clone(&agv)]));

    let mut expected = 0.0;
    for op in process.operations() {
        expected += op.duration_minutes();
    }
    assert_eq!(process.total_duration_minutes(), expected);

    let ids: Vec<&str> = process.operations().iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["OP-1", "OP-2", "OP-3"]);
}

#[test]
fn test_empty_process() {
    let process = IndustrialProcess::new("Idle");
    assert_eq!(process.total_duration_minutes(), 0.0);
    assert_eq!(process.total_energy_kwh(), 0.0);
    assert!(process.distinct_resources().is_empty());
}

#[test]
fn test_process_infinity_propagates() {
    let moving = agv("AGV-A", 2.0, 1.2);
    let stalled = agv("AGV-B", 1.8, 0.0);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed("OP-1", "Pick", 5.0, vec![Rc::clone(&moving)]));
    process.push(Operation::transport("OP-2", "Move", 10.0, stalled));

    assert_eq!(process.total_duration_minutes(), f64::INFINITY);
    assert_eq!(process.total_energy_kwh(), f64::INFINITY);
}

#[test]
fn test_distinct_resources_first_occurrence_order() {
    let a = agv("AGV-A", 2.0, 1.2);
    let b = agv("AGV-B", 1.8, 1.0);
    let c = agv("AGV-C", 1.5, 1.0);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed("OP-1", "Stage", 1.0, vec![Rc::clone(&b)]));
    process.push(Operation::fixed("OP-2", "Lift", 1.0, vec![Rc::clone(&a), Rc::clone(&b)]));
    process.push(Operation::transport("OP-3", "Move", 30.0, Rc::clone(&c)));
    process.push(Operation::fixed("OP-4", "Drop", 1.0, vec![Rc::clone(&a)]));

    let distinct = process.distinct_resources();
    let ids: Vec<&str> = distinct.iter().map(|agv| agv.id.as_str()).collect();
    assert_eq!(ids, vec!["AGV-B", "AGV-A", "AGV-C"]);
}

#[test]
fn test_distinct_resources_compares_instances() {
    // Two AGVs sharing an id are still two vehicles
    let first = agv("AGV-A", 2.0, 1.2);
    let twin = agv("AGV-A", 2.0, 1.2);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed("OP-1", "Pick", 1.0, vec![first]));
    process.push(Operation::fixed("OP-2", "Pick", 1.0, vec![twin]));

    assert_eq!(process.distinct_resources().len(), 2);
}

#[test]
fn test_energy_counts_repeated_agv() {
    let a = agv("AGV-A", 2.0, 1.2);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed(
        "OP-1",
        "Double lift",
        30.0,
        vec![Rc::clone(&a), Rc::clone(&a)],
    ));

    // 2 x (30 min at 2 kW)
    assert_close(process.total_energy_kwh(), 2.0);
    assert_eq!(process.distinct_resources().len(), 1);
}

#[test]
fn test_energy_sums_over_operations_and_agvs() {
    let a = agv("AGV-A", 2.0, 1.2);
    let b = agv("AGV-B", 1.8, 1.0);
    let mut process = IndustrialProcess::new("P");
    process.push(Operation::fixed("OP-1", "Lift", 10.0, vec![Rc::clone(&a), Rc::clone(&b)]));
    process.push(Operation::transport("OP-2", "Move", 150.0, Rc::clone(&b)));
    process.push(Operation::fixed("OP-3", "Wait", 2.0, Vec::new()));

    let expected = a.energy_for_duration(10.0) + b.energy_for_duration(10.0) + b.energy_for_duration(3.0);
    assert_close(process.total_energy_kwh(), expected);
}

#[test]
fn test_speed_change_updates_shared_operations() {
    let a = agv("AGV-A", 2.0, 1.0);
    let transport = Operation::transport("OP-2", "Move", 120.0, Rc::clone(&a)).into_shared();

    let mut first = IndustrialProcess::new("First");
    let mut second = IndustrialProcess::new("Second");
    first.add_operation(Rc::clone(&transport));
    second.add_operation(Rc::clone(&transport));

    assert_close(first.total_duration_minutes(), 2.5);
    a.set_act_speed_mps(2.0);
    assert_close(first.total_duration_minutes(), 1.5);
    assert_close(second.total_duration_minutes(), 1.5);
}

#[test]
fn test_batch_aggregates() {
    let a = agv("AGV-A", 2.0, 1.2);
    let b = agv("AGV-B", 1.8, 1.0);

    let mut first = IndustrialProcess::new("First");
    first.push(Operation::fixed("OP-1", "Pick", 6.0, vec![Rc::clone(&b)]));
    let mut second = IndustrialProcess::new("Second");
    second.push(Operation::fixed("OP-2", "Pick", 4.0, vec![Rc::clone(&a), Rc::clone(&b)]));

    let first = first.into_shared();
    let second = second.into_shared();
    let batch: Batch = [Rc::clone(&first), Rc::clone(&second)].into_iter().collect();

    assert_eq!(batch.len(), 2);
    assert_close(batch.total_duration_minutes(), 10.0);
    assert_close(
        batch.total_energy_kwh(),
        first.total_energy_kwh() + second.total_energy_kwh(),
    );

    let distinct = batch.distinct_resources();
    let ids: Vec<&str> = distinct.iter().map(|agv| agv.id.as_str()).collect();
    assert_eq!(ids, vec!["AGV-B", "AGV-A"]);
}

#[test]
fn test_empty_batch() {
    let batch = Batch::new();
    assert!(batch.is_empty());
    assert_eq!(batch.total_duration_minutes(), 0.0);
    assert_eq!(batch.total_energy_kwh(), 0.0);
    assert!(batch.distinct_resources().is_empty());
}

#[test]
fn test_inbound_receiving_scenario() {
    let agv_a = agv("AGV-A", 2.0, 1.2);
    let mut inbound = IndustrialProcess::new("Inbound-Receiving");
    inbound.push(Operation::fixed("OP-1", "Dock receive", 6.0, vec![Rc::clone(&agv_a)]));
    let transport = inbound.push(Operation::transport(
        "OP-2",
        "Move pallets to storage (120 m)",
        120.0,
        Rc::clone(&agv_a),
    ));
    inbound.push(Operation::fixed("OP-3", "Putaway at rack", 4.0, vec![Rc::clone(&agv_a)]));

    assert!((transport.duration_minutes() - 2.1667).abs() < 1e-4);
    assert!((inbound.total_duration_minutes() - 12.1667).abs() < 1e-4);
    assert!((inbound.total_energy_kwh() - 0.4056).abs() < 1e-4);

    let distinct = inbound.distinct_resources();
    assert_eq!(distinct.len(), 1);
    assert!(Rc::ptr_eq(&distinct[0], &agv_a));
}

#[test]
fn test_identity_fields_are_public() {
    let mut process = IndustrialProcess::new("Returns");
    let op = process.push(Operation::fixed("OP-9", "Inspect return", 2.0, Vec::new()));

    assert_eq!(process.id.as_str(), "Returns");
    assert_eq!(op.id.to_string(), "OP-9");
    assert_eq!(op.description, "Inspect return");
    assert!(Rc::ptr_eq(&op, &process.operations()[0]));
}
