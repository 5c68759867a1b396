use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use supplyline::build_network;
use supplyline::domain::id::NodeId;
use supplyline::error::Error;
use supplyline::loader::parser::load_network_tables;

/// Writes the five config tables into a fresh temp directory.
fn write_tables(connections_rows: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("supplyline-test-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();

    fs::write(
        dir.join("refineries.csv"),
        "id;name;capacity;max_output;production;overflow_penalty;underflow_penalty;over_output_penalty;production_cost;production_co2;initial_stock;node_type\n\
         R1;North Refinery;200;80;15;1.5;1.0;2.0;0.5;0.3;100;REFINERY\n",
    )
    .unwrap();

    fs::write(
        dir.join("tanks.csv"),
        "id;name;capacity;max_input;max_output;overflow_penalty;underflow_penalty;over_input_penalty;over_output_penalty;initial_stock;node_type\n\
         T1;Harbor Tank;50;60;50;1.5;1.0;2.0;2.0;0;STORAGE\n",
    )
    .unwrap();

    fs::write(
        dir.join("customers.csv"),
        "id;name;max_input;over_input_penalty;late_delivery_penalty;early_delivery_penalty;node_type\n\
         C1;City Works;100;2.0;3.0;1.0;CUSTOMER\n",
    )
    .unwrap();

    fs::write(dir.join("connections.csv"), connections_rows).unwrap();

    dir
}

const VALID_CONNECTIONS: &str = "id;from_id;to_id;distance;lead_time_days;max_capacity;connection_type\n\
                                 X1;R1;T1;10;1;40;PIPELINE\n\
                                 X2;T1;C1;10;1;50;TRUCK\n";

#[test]
fn test_tables_parse_and_teams_are_optional() {
    let dir = write_tables(VALID_CONNECTIONS);

    let tables = load_network_tables(&dir).expect("tables should load");

    assert_eq!(tables.sources.len(), 1);
    assert_eq!(tables.storages.len(), 1);
    assert_eq!(tables.customers.len(), 1);
    assert_eq!(tables.connections.len(), 2);
    assert!(tables.teams.is_empty(), "A missing teams table is not an error");

    assert_eq!(tables.sources[0].initial_stock, 100.0);
    assert_eq!(tables.connections[0].lead_time_days, 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_build_network_derives_ratios_and_seeds_ledger() {
    let dir = write_tables(VALID_CONNECTIONS);

    let (network, ledger) = build_network(&dir).expect("network should build");

    let supply = network
        .connection_between(&NodeId::new("R1"), &NodeId::new("T1"))
        .expect("R1-T1 connection must exist");
    assert_eq!(supply.ratio, 4.0, "ratio = 40 / (10 * 1)");

    assert_eq!(ledger.stock_of(&NodeId::new("R1")), 100.0);
    assert_eq!(ledger.stock_of(&NodeId::new("T1")), 0.0);
    assert_eq!(ledger.headroom(&NodeId::new("T1")), 50.0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_build_network_rejects_unknown_endpoint() {
    let broken = "id;from_id;to_id;distance;lead_time_days;max_capacity;connection_type\n\
                  X1;R1;GHOST;10;1;40;PIPELINE\n";
    let dir = write_tables(broken);

    let result = build_network(&dir);

    assert!(
        matches!(result, Err(Error::UnknownNodeReference { .. })),
        "A connection to a node missing from the tables must fail construction"
    );

    fs::remove_dir_all(&dir).unwrap();
}
