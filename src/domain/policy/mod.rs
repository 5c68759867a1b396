pub mod greedy;

use crate::domain::demand::DemandBacklog;
use crate::domain::ledger::StockLedger;
use crate::domain::movement::Movement;
use crate::domain::network::NetworkModel;

/// Decides the movements for one day.
///
/// The contract is the substitution seam for alternative deciders (a
/// learning-based or an exact-optimization policy slots in here without
/// touching the driver). Implementations mutate the ledger and backlog in
/// place and must be deterministic: identical inputs produce identical
/// movement lists and identical resulting ledger/backlog states.
pub trait AllocationPolicy: std::fmt::Debug + Send {
    fn allocate(
        &mut self,
        network: &NetworkModel,
        ledger: &mut StockLedger,
        backlog: &mut DemandBacklog,
        current_day: u32,
    ) -> Vec<Movement>;
}
