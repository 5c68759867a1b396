use std::collections::BTreeMap;

use crate::domain::connection::Connection;
use crate::domain::id::{ConnectionId, NodeId};
use crate::domain::node::{Node, NodeRole};
use crate::error::{Error, Result};

/// The immutable transport graph: nodes, directed connections and the
/// derived efficiency ranking.
///
/// Every store is keyed by a `BTreeMap`, so iteration is in ascending id
/// order. The allocation passes rely on that: wherever a "first
/// qualifying" choice is made, the scan order is ascending node id, which
/// makes a run reproducible.
#[derive(Debug)]
pub struct NetworkModel {
    nodes: BTreeMap<NodeId, Node>,
    connections: BTreeMap<ConnectionId, Connection>,
    /// Outgoing connection ids per node, ranked by ratio descending,
    /// ties by ascending destination id, then ascending connection id.
    outgoing: BTreeMap<NodeId, Vec<ConnectionId>>,
}

impl NetworkModel {
    /// Builds the model from the loaded tables. Fails with
    /// `UnknownNodeReference` if a connection names a node that is not in
    /// the node set.
    pub fn new(nodes: Vec<Node>, connections: Vec<Connection>) -> Result<NetworkModel> {
        let node_map: BTreeMap<NodeId, Node> =
            nodes.into_iter().map(|node| (node.id.clone(), node)).collect();

        let mut connection_map: BTreeMap<ConnectionId, Connection> = BTreeMap::new();
        for connection in connections {
            for endpoint in [&connection.from, &connection.to] {
                if !node_map.contains_key(endpoint) {
                    return Err(Error::UnknownNodeReference {
                        connection: connection.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            connection_map.insert(connection.id.clone(), connection);
        }

        let mut outgoing: BTreeMap<NodeId, Vec<ConnectionId>> = BTreeMap::new();
        for connection in connection_map.values() {
            outgoing.entry(connection.from.clone()).or_default().push(connection.id.clone());
        }

        for ranked in outgoing.values_mut() {
            ranked.sort_by(|a, b| {
                let connection_a = &connection_map[a];
                let connection_b = &connection_map[b];
                connection_b
                    .ratio
                    .total_cmp(&connection_a.ratio)
                    .then_with(|| connection_a.to.cmp(&connection_b.to))
                    .then_with(|| connection_a.id.cmp(&connection_b.id))
            });
        }

        Ok(NetworkModel { nodes: node_map, connections: connection_map, outgoing })
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Outgoing connections of `node`, best ratio first.
    pub fn ranked_connections_from(&self, node: &NodeId) -> Vec<&Connection> {
        self.outgoing
            .get(node)
            .map(|ids| ids.iter().map(|id| &self.connections[id]).collect())
            .unwrap_or_default()
    }

    /// The direct connection from `from` to `to`, if any. With parallel
    /// connections the ranked order decides: the best-ratio one wins.
    pub fn connection_between(&self, from: &NodeId, to: &NodeId) -> Option<&Connection> {
        self.ranked_connections_from(from)
            .into_iter()
            .find(|connection| &connection.to == to)
    }

    /// Storage node ids in ascending order, the fixed scan order of both
    /// allocation passes.
    pub fn storage_ids(&self) -> Vec<NodeId> {
        self.ids_with_role(NodeRole::Storage)
    }

    /// Source node ids in ascending order.
    pub fn source_ids(&self) -> Vec<NodeId> {
        self.ids_with_role(NodeRole::Source)
    }

    pub fn is_customer(&self, id: &NodeId) -> bool {
        self.nodes.get(id).map(|node| node.role) == Some(NodeRole::Customer)
    }

    fn ids_with_role(&self, role: NodeRole) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.role == role)
            .map(|node| node.id.clone())
            .collect()
    }
}
