use std::sync::Arc;
use std::time::Duration;

use supplyline::api::round_dto::DemandDto;
use supplyline::config::RunConfig;
use supplyline::domain::connection::{Connection, TransportMode};
use supplyline::domain::demand::ExpiryPolicy;
use supplyline::domain::id::{ConnectionId, NodeId};
use supplyline::domain::ledger::StockLedger;
use supplyline::domain::network::NetworkModel;
use supplyline::domain::node::{Node, NodeRole, PenaltyWeights};
use supplyline::domain::policy::greedy::GreedyPolicy;
use supplyline::driver::simulation_driver::{DriverState, SimulationDriver};
use supplyline::service::round_client::RoundService;
use supplyline::service::scripted::ScriptedRoundService;

fn node(id: &str, role: NodeRole, capacity: f64, stock: f64) -> Node {
    Node {
        id: NodeId::new(id),
        name: id.to_string(),
        role,
        capacity,
        max_input: 1000.0,
        max_output: 1000.0,
        initial_stock: stock,
        penalties: PenaltyWeights::default(),
    }
}

fn connection(id: &str, from: &str, to: &str, lead_time: u32, max_capacity: f64) -> Connection {
    Connection::new(
        ConnectionId::new(id),
        NodeId::new(from),
        NodeId::new(to),
        10.0,
        lead_time,
        max_capacity,
        TransportMode::Truck,
    )
}

fn demand(customer: &str, amount: f64, start_day: u32, end_day: u32) -> DemandDto {
    DemandDto {
        customer_id: customer.to_string(),
        amount,
        post_day: 0,
        start_day,
        end_day,
    }
}

fn test_network() -> NetworkModel {
    let nodes = vec![
        node("R1", NodeRole::Source, 500.0, 200.0),
        node("T1", NodeRole::Storage, 100.0, 60.0),
        node("C1", NodeRole::Customer, 0.0, 0.0),
    ];
    let connections = vec![
        connection("R1-T1", "R1", "T1", 1, 40.0),
        connection("T1-C1", "T1", "C1", 1, 80.0),
    ];
    NetworkModel::new(nodes, connections).unwrap()
}

fn test_config() -> RunConfig {
    RunConfig {
        round_delay: Duration::ZERO,
        ..RunConfig::default()
    }
}

fn build_driver(
    network: NetworkModel,
    service: Arc<ScriptedRoundService>,
    config: RunConfig,
) -> SimulationDriver {
    let ledger = StockLedger::from_nodes(network.nodes());
    let policy = Box::new(GreedyPolicy::new(config.horizon_end));
    let dyn_service: Arc<dyn RoundService> = service;
    SimulationDriver::new(network, ledger, policy, dyn_service, config)
}

#[tokio::test]
async fn test_bootstrap_round_is_empty_and_all_days_are_played() {
    let service = Arc::new(ScriptedRoundService::new(Vec::new()));
    let mut driver = build_driver(test_network(), service.clone(), test_config());

    driver.run().await.expect("run should succeed");

    let rounds = service.rounds_played();
    assert_eq!(rounds.len(), 43, "Bootstrap plus one round per day 1..=42");
    assert_eq!(rounds[0].day, 0);
    assert!(rounds[0].movements.is_empty(), "The bootstrap round must carry no movements");
    for (index, round) in rounds.iter().enumerate() {
        assert_eq!(round.day as usize, index, "Rounds must be played in day order");
    }

    assert_eq!(driver.state(), DriverState::Finished);
    assert_eq!(service.sessions_started(), 1);
    assert_eq!(service.sessions_ended(), 1);
    assert_eq!(driver.history().len(), 42);
}

#[tokio::test]
async fn test_bootstrap_demand_is_delivered_next_day() {
    // Demand revealed by the bootstrap round: 50 units, window [2, 5].
    let script = vec![vec![demand("C1", 50.0, 2, 5)]];
    let service = Arc::new(ScriptedRoundService::new(script));
    let mut driver = build_driver(test_network(), service.clone(), test_config());

    driver.run().await.expect("run should succeed");

    let rounds = service.rounds_played();
    let day1_delivery: Vec<_> = rounds[1]
        .movements
        .iter()
        .filter(|m| m.connection_id == "T1-C1")
        .collect();
    assert_eq!(day1_delivery.len(), 1, "Storage T1 holds 60, so day 1 ships the full 50");
    assert_eq!(day1_delivery[0].amount, 50.0);

    assert!(driver.backlog().is_empty(), "Fulfilled demand must not linger in the backlog");
}

#[tokio::test]
async fn test_session_is_torn_down_on_mid_run_failure() {
    let service = Arc::new(ScriptedRoundService::new(Vec::new()).with_failure_on_day(5));
    let mut driver = build_driver(test_network(), service.clone(), test_config());

    let result = driver.run().await;

    assert!(result.is_err(), "A failed round must fail the run");
    assert_eq!(driver.state(), DriverState::Finished);
    assert_eq!(
        service.sessions_ended(),
        1,
        "The session must be released even when the run aborts"
    );
}

#[tokio::test]
async fn test_driver_refuses_second_run() {
    let service = Arc::new(ScriptedRoundService::new(Vec::new()));
    let mut driver = build_driver(test_network(), service.clone(), test_config());

    driver.run().await.expect("first run should succeed");
    let second = driver.run().await;

    assert!(second.is_err(), "A finished driver must not start another run");
    assert_eq!(service.sessions_started(), 1, "No second session may be opened");
}

#[tokio::test]
async fn test_beyond_horizon_demand_survives_in_final_backlog() {
    // Window starts on day 50, past the 42-day horizon: never fulfillable.
    let script = vec![vec![demand("C1", 10.0, 50, 60)]];
    let service = Arc::new(ScriptedRoundService::new(script));
    let mut driver = build_driver(test_network(), service.clone(), test_config());

    driver.run().await.expect("run should succeed");

    assert_eq!(driver.backlog().pending_len(), 1, "Unfulfillable demand must not vanish");
    assert_eq!(driver.backlog().pending()[0].customer, NodeId::new("C1"));
    assert_eq!(driver.backlog().pending()[0].start_day, 50);
}

#[tokio::test]
async fn test_report_missed_expiry_moves_stale_demand() {
    // Window [1, 1] with an empty storage: day 1 cannot deliver, from
    // day 2 on the request is permanently missed.
    let nodes = vec![
        node("T1", NodeRole::Storage, 100.0, 0.0),
        node("C1", NodeRole::Customer, 0.0, 0.0),
    ];
    let connections = vec![connection("T1-C1", "T1", "C1", 1, 80.0)];
    let network = NetworkModel::new(nodes, connections).unwrap();

    let script = vec![vec![demand("C1", 10.0, 1, 1)]];
    let service = Arc::new(ScriptedRoundService::new(script));
    let config = RunConfig { expiry_policy: ExpiryPolicy::ReportMissed, ..test_config() };
    let mut driver = build_driver(network, service.clone(), config);

    driver.run().await.expect("run should succeed");

    assert_eq!(driver.backlog().pending_len(), 0);
    assert_eq!(driver.backlog().missed_len(), 1);
    let last_record = driver.history().last().unwrap();
    assert_eq!(last_record.missed_demand, 1, "The day records must count missed demand");
}
