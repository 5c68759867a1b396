use std::collections::BTreeMap;

use crate::domain::id::NodeId;
use crate::domain::node::Node;
use crate::error::{Error, Result};

/// Tolerance for float dust when checking the stock bounds. Amounts are
/// pre-clipped by the policy, so anything beyond this is a real violation.
const BOUNDS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
struct StockEntry {
    stock: f64,
    capacity: f64,
}

/// Mutable per-node stock, keyed by node id. Only Source and Storage
/// nodes have entries. Invariant: `0 <= stock <= capacity` for every
/// entry, at all times.
///
/// `deduct` and `add` are guards, not an expected error path: the policy
/// clips every amount against stock, headroom and connection capacity
/// before committing, so a failure here means a policy bug.
#[derive(Debug, Clone)]
pub struct StockLedger {
    entries: BTreeMap<NodeId, StockEntry>,
}

impl StockLedger {
    /// Seeds the ledger with the initial stock of every stock-holding node.
    pub fn from_nodes<'a>(nodes: impl Iterator<Item = &'a Node>) -> StockLedger {
        let entries = nodes
            .filter(|node| node.holds_stock())
            .map(|node| {
                (node.id.clone(), StockEntry { stock: node.initial_stock, capacity: node.capacity })
            })
            .collect();

        StockLedger { entries }
    }

    /// Current stock of `node`; zero for nodes without a ledger entry.
    pub fn stock_of(&self, node: &NodeId) -> f64 {
        self.entries.get(node).map(|entry| entry.stock).unwrap_or(0.0)
    }

    /// Remaining capacity of `node`; zero for nodes without a ledger entry,
    /// so such nodes are never picked as a transfer destination.
    pub fn headroom(&self, node: &NodeId) -> f64 {
        self.entries.get(node).map(|entry| entry.capacity - entry.stock).unwrap_or(0.0)
    }

    pub fn deduct(&mut self, node: &NodeId, amount: f64) -> Result<()> {
        let entry = self
            .entries
            .get_mut(node)
            .ok_or_else(|| Error::UnknownLedgerNode(node.clone()))?;

        if amount > entry.stock + BOUNDS_EPSILON {
            return Err(Error::InsufficientStock {
                node: node.clone(),
                requested: amount,
                available: entry.stock,
            });
        }

        entry.stock = (entry.stock - amount).max(0.0);
        Ok(())
    }

    pub fn add(&mut self, node: &NodeId, amount: f64) -> Result<()> {
        let entry = self
            .entries
            .get_mut(node)
            .ok_or_else(|| Error::UnknownLedgerNode(node.clone()))?;

        if entry.stock + amount > entry.capacity + BOUNDS_EPSILON {
            return Err(Error::CapacityExceeded {
                node: node.clone(),
                amount,
                capacity: entry.capacity,
            });
        }

        entry.stock = (entry.stock + amount).min(entry.capacity);
        Ok(())
    }

    /// Total stock across every ledger entry.
    pub fn total_stock(&self) -> f64 {
        self.entries.values().map(|entry| entry.stock).sum()
    }

    /// Total stock across the given nodes (e.g. all sources).
    pub fn total_stock_of(&self, nodes: &[NodeId]) -> f64 {
        nodes.iter().map(|node| self.stock_of(node)).sum()
    }
}
