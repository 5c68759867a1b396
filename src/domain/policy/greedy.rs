use crate::domain::connection::Connection;
use crate::domain::demand::{DemandBacklog, DemandRequest};
use crate::domain::id::NodeId;
use crate::domain::ledger::StockLedger;
use crate::domain::movement::Movement;
use crate::domain::network::NetworkModel;
use crate::domain::node::NodeRole;
use crate::domain::policy::AllocationPolicy;

/// Urgency-first greedy matcher.
///
/// Runs two passes per day, demand satisfaction strictly before
/// replenishment, because replenishment has to observe the stock levels
/// left behind by the deliveries.
///
/// **Pass 1 (demand satisfaction).** Requests are handled earliest
/// deadline first. A request is matched against the storages in ascending
/// id order; the first one that can ship the full amount through a direct
/// connection, inside the delivery window, wins. No splitting across
/// storages or days.
///
/// **Pass 2 (replenishment).** Each source with stock pushes through its
/// single best-ratio connection into storages with headroom, ascending id
/// order, until the source runs dry or no headroom is left.
#[derive(Debug)]
pub struct GreedyPolicy {
    horizon_end: u32,
}

impl GreedyPolicy {
    pub fn new(horizon_end: u32) -> GreedyPolicy {
        GreedyPolicy { horizon_end }
    }

    /// Pass 1. Fulfilled requests leave the backlog; the rest are carried
    /// unchanged into tomorrow.
    fn satisfy_demands(
        &self,
        network: &NetworkModel,
        ledger: &mut StockLedger,
        backlog: &mut DemandBacklog,
        current_day: u32,
    ) -> Vec<Movement> {
        let mut movements = Vec::new();
        let mut carried = Vec::new();

        for request in backlog.drain_pending() {
            if !network.is_customer(&request.customer) {
                log::warn!(
                    "Dropping demand of {} units for unknown customer '{}'.",
                    request.amount,
                    request.customer
                );
                continue;
            }

            if request.amount <= 0.0 {
                log::warn!(
                    "Dropping non-positive demand of {} units for customer '{}'.",
                    request.amount,
                    request.customer
                );
                continue;
            }

            match self.match_storage(network, ledger, &request, current_day) {
                Some(movement) => movements.push(movement),
                None => carried.push(request),
            }
        }

        backlog.carry(carried);
        movements
    }

    /// Finds the first storage (ascending id) able to cover `request` in
    /// full and commits the delivery against the ledger.
    fn match_storage(
        &self,
        network: &NetworkModel,
        ledger: &mut StockLedger,
        request: &DemandRequest,
        current_day: u32,
    ) -> Option<Movement> {
        for storage_id in network.storage_ids() {
            let Some(connection) = network.connection_between(&storage_id, &request.customer)
            else {
                continue;
            };

            let storage = network.node(&storage_id)?;
            if storage.max_output < request.amount {
                continue;
            }
            if ledger.stock_of(&storage_id) < request.amount {
                continue;
            }
            if connection.max_capacity < request.amount {
                continue;
            }

            let arrival_day = connection.arrival_day(current_day);
            if arrival_day < request.start_day || arrival_day > request.end_day {
                continue;
            }

            if let Err(e) = ledger.deduct(&storage_id, request.amount) {
                debug_assert!(false, "pre-clipped delivery deduct failed: {}", e);
                log::error!("Invariant violation while delivering from '{}': {}", storage_id, e);
                continue;
            }

            log::info!(
                "Delivering {} units from '{}' to '{}', arrival day {} in window [{}, {}].",
                request.amount,
                storage.name,
                request.customer,
                arrival_day,
                request.start_day,
                request.end_day
            );

            return Some(Movement {
                connection: connection.id.clone(),
                amount: request.amount,
                day: current_day,
            });
        }

        None
    }

    /// Pass 2. A single source may fan out to several storages in one
    /// day, always via the same best-ratio connection.
    fn replenish_storages(
        &self,
        network: &NetworkModel,
        ledger: &mut StockLedger,
        current_day: u32,
    ) -> Vec<Movement> {
        let mut movements = Vec::new();

        for source_id in network.source_ids() {
            if ledger.stock_of(&source_id) <= 0.0 {
                continue;
            }

            let Some(connection) = self.best_supply_connection(network, &source_id) else {
                continue;
            };

            if connection.arrival_day(current_day) > self.horizon_end {
                continue;
            }

            for storage_id in network.storage_ids() {
                let source_stock = ledger.stock_of(&source_id);
                if source_stock <= 0.0 {
                    break;
                }

                let headroom = ledger.headroom(&storage_id);
                if headroom <= 0.0 {
                    continue;
                }

                let quantity = source_stock.min(headroom).min(connection.max_capacity);
                if quantity <= 0.0 {
                    continue;
                }

                if let Err(e) = self.transfer(ledger, &source_id, &storage_id, quantity) {
                    debug_assert!(false, "pre-clipped transfer failed: {}", e);
                    log::error!(
                        "Invariant violation while replenishing '{}' from '{}': {}",
                        storage_id,
                        source_id,
                        e
                    );
                    continue;
                }

                log::info!(
                    "Transporting {} units from '{}' towards '{}', arrival day {}.",
                    quantity,
                    source_id,
                    storage_id,
                    connection.arrival_day(current_day)
                );

                movements.push(Movement {
                    connection: connection.id.clone(),
                    amount: quantity,
                    day: current_day,
                });
            }
        }

        movements
    }

    /// The highest-ratio outgoing connection that ends at a storage node.
    /// Zero-ratio connections never qualify for replenishment.
    fn best_supply_connection<'a>(
        &self,
        network: &'a NetworkModel,
        source: &NodeId,
    ) -> Option<&'a Connection> {
        network.ranked_connections_from(source).into_iter().find(|connection| {
            connection.ratio > 0.0
                && network.node(&connection.to).map(|node| node.role) == Some(NodeRole::Storage)
        })
    }

    fn transfer(
        &self,
        ledger: &mut StockLedger,
        from: &NodeId,
        to: &NodeId,
        quantity: f64,
    ) -> crate::error::Result<()> {
        ledger.deduct(from, quantity)?;
        if let Err(e) = ledger.add(to, quantity) {
            // Undo the deduct so the commodity is not lost.
            let _ = ledger.add(from, quantity);
            return Err(e);
        }
        Ok(())
    }
}

impl AllocationPolicy for GreedyPolicy {
    fn allocate(
        &mut self,
        network: &NetworkModel,
        ledger: &mut StockLedger,
        backlog: &mut DemandBacklog,
        current_day: u32,
    ) -> Vec<Movement> {
        backlog.sort_by_deadline();

        let mut movements = self.satisfy_demands(network, ledger, backlog, current_day);
        movements.extend(self.replenish_storages(network, ledger, current_day));
        movements
    }
}
