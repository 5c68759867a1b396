use thiserror::Error;

use crate::domain::id::{ConnectionId, NodeId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config table: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to decode round service response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Round service request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Round service answered with status {status}: {body}")]
    ServiceStatusError { status: u16, body: String },

    #[error("Round service session error: {0}")]
    SessionError(String),

    #[error("Connection '{connection}' references unknown node '{node}'")]
    UnknownNodeReference {
        connection: ConnectionId,
        node: NodeId,
    },

    #[error("Node '{node}' holds {available} units, cannot deduct {requested}")]
    InsufficientStock {
        node: NodeId,
        requested: f64,
        available: f64,
    },

    #[error("Adding {amount} units to node '{node}' would exceed its capacity of {capacity}")]
    CapacityExceeded {
        node: NodeId,
        amount: f64,
        capacity: f64,
    },

    #[error("Node '{0}' has no stock ledger entry")]
    UnknownLedgerNode(NodeId),

    #[error("Invalid run configuration: {0}")]
    ConfigError(String),

    #[error("Simulation driver cannot start from state '{0}'")]
    DriverStateError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
