use crate::api::network_dto::{CustomerRecordDto, SourceRecordDto, StorageRecordDto};
use crate::domain::id::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    Storage,
    Customer,
}

/// Cost weights attached to a node. Carried for accounting; the greedy
/// policy never enforces them.
#[derive(Debug, Clone, Default)]
pub struct PenaltyWeights {
    pub overflow: f64,
    pub underflow: f64,
    pub over_input: f64,
    pub over_output: f64,
    pub late_delivery: f64,
    pub early_delivery: f64,
}

/// Static attributes of one network node. Stock does not live here: the
/// current level is owned by the `StockLedger`, this struct only carries
/// the starting value.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub role: NodeRole,
    pub capacity: f64,
    pub max_input: f64,
    pub max_output: f64,
    pub initial_stock: f64,
    pub penalties: PenaltyWeights,
}

impl Node {
    pub fn from_source(dto: SourceRecordDto) -> Node {
        Node {
            id: NodeId::new(dto.id),
            name: dto.name,
            role: NodeRole::Source,
            capacity: dto.capacity,
            max_input: 0.0,
            max_output: dto.max_output,
            initial_stock: dto.initial_stock,
            penalties: PenaltyWeights {
                overflow: dto.overflow_penalty,
                underflow: dto.underflow_penalty,
                over_output: dto.over_output_penalty,
                ..PenaltyWeights::default()
            },
        }
    }

    pub fn from_storage(dto: StorageRecordDto) -> Node {
        Node {
            id: NodeId::new(dto.id),
            name: dto.name,
            role: NodeRole::Storage,
            capacity: dto.capacity,
            max_input: dto.max_input,
            max_output: dto.max_output,
            initial_stock: dto.initial_stock,
            penalties: PenaltyWeights {
                overflow: dto.overflow_penalty,
                underflow: dto.underflow_penalty,
                over_input: dto.over_input_penalty,
                over_output: dto.over_output_penalty,
                ..PenaltyWeights::default()
            },
        }
    }

    pub fn from_customer(dto: CustomerRecordDto) -> Node {
        Node {
            id: NodeId::new(dto.id),
            name: dto.name,
            role: NodeRole::Customer,
            capacity: 0.0,
            max_input: dto.max_input,
            max_output: 0.0,
            initial_stock: 0.0,
            penalties: PenaltyWeights {
                over_input: dto.over_input_penalty,
                late_delivery: dto.late_delivery_penalty,
                early_delivery: dto.early_delivery_penalty,
                ..PenaltyWeights::default()
            },
        }
    }

    /// True for the node roles that hold commodity and appear in the ledger.
    pub fn holds_stock(&self) -> bool {
        matches!(self.role, NodeRole::Source | NodeRole::Storage)
    }
}
