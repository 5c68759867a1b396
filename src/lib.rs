use std::path::Path;

use crate::domain::connection::Connection;
use crate::domain::ledger::StockLedger;
use crate::domain::network::NetworkModel;
use crate::domain::node::Node;
use crate::error::Result;
use crate::loader::parser::load_network_tables;

pub mod api;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod loader;
pub mod logger;
pub mod reporting;
pub mod service;

/// Loads the config tables from `data_dir` and builds the immutable
/// network model plus the seeded stock ledger.
pub fn build_network(data_dir: &Path) -> Result<(NetworkModel, StockLedger)> {
    let tables = load_network_tables(data_dir)?;

    let nodes: Vec<Node> = tables
        .sources
        .into_iter()
        .map(Node::from_source)
        .chain(tables.storages.into_iter().map(Node::from_storage))
        .chain(tables.customers.into_iter().map(Node::from_customer))
        .collect();

    let connections: Vec<Connection> =
        tables.connections.into_iter().map(Connection::from).collect();

    let network = NetworkModel::new(nodes, connections)?;
    let ledger = StockLedger::from_nodes(network.nodes());
    log::info!("Network model constructed, starting stock {} units.", ledger.total_stock());

    Ok((network, ledger))
}
