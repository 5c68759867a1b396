use std::sync::Arc;

use uuid::Uuid;

use crate::api::round_dto::RoundRequestDto;
use crate::config::RunConfig;
use crate::domain::demand::{DemandBacklog, DemandRequest};
use crate::domain::ledger::StockLedger;
use crate::domain::movement::Movement;
use crate::domain::network::NetworkModel;
use crate::domain::policy::AllocationPolicy;
use crate::error::{Error, Result};
use crate::reporting::DayRecord;
use crate::service::round_client::{RoundService, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running(u32),
    Finished,
}

/// Sequences the run: one bootstrap round at day 0, then one round per
/// day up to the horizon end. Owns the ledger and backlog for the whole
/// run; the policy only ever sees them through `allocate`.
///
/// Strictly sequential: the next day's demand depends on the previous
/// round's response, so there is nothing to parallelize across days.
pub struct SimulationDriver {
    network: NetworkModel,
    ledger: StockLedger,
    backlog: DemandBacklog,
    policy: Box<dyn AllocationPolicy>,
    service: Arc<dyn RoundService>,
    config: RunConfig,
    state: DriverState,
    run_id: Uuid,
    history: Vec<DayRecord>,
}

impl SimulationDriver {
    pub fn new(
        network: NetworkModel,
        ledger: StockLedger,
        policy: Box<dyn AllocationPolicy>,
        service: Arc<dyn RoundService>,
        config: RunConfig,
    ) -> SimulationDriver {
        SimulationDriver {
            network,
            ledger,
            backlog: DemandBacklog::new(),
            policy,
            service,
            config,
            state: DriverState::Idle,
            run_id: Uuid::new_v4(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn history(&self) -> &[DayRecord] {
        &self.history
    }

    /// The final unfulfilled backlog, retained after the run for reporting.
    pub fn backlog(&self) -> &DemandBacklog {
        &self.backlog
    }

    /// Plays the whole run. The session is a scoped resource: whatever
    /// happens inside the day loop, the end-session call is attempted
    /// before the result propagates.
    pub async fn run(&mut self) -> Result<()> {
        if self.state != DriverState::Idle {
            return Err(Error::DriverStateError(format!("{:?}", self.state)));
        }

        let session = self.service.start_session().await?;
        log::info!("Run {}: session '{}' started, horizon end day {}.", self.run_id, session, self.config.horizon_end);

        let result = self.run_rounds(&session).await;

        if let Err(e) = self.service.end_session(&session).await {
            log::warn!("Failed to end session '{}': {}", session, e);
        }

        self.state = DriverState::Finished;
        self.log_final_backlog();

        result
    }

    async fn run_rounds(&mut self, session: &SessionId) -> Result<()> {
        // Bootstrap: an empty movement set for day 0 reveals the first demand.
        self.state = DriverState::Running(0);
        let bootstrap = RoundRequestDto { day: 0, movements: Vec::new() };
        let response = self.service.play_round(session, &bootstrap).await?;
        self.backlog.absorb(response.demand.into_iter().map(DemandRequest::from));

        for day in 1..=self.config.horizon_end {
            self.state = DriverState::Running(day);

            self.backlog.expire(day, self.config.expiry_policy);

            let movements =
                self.policy.allocate(&self.network, &mut self.ledger, &mut self.backlog, day);

            let request = RoundRequestDto {
                day,
                movements: movements.iter().map(Movement::to_dto).collect(),
            };
            let response = self.service.play_round(session, &request).await?;

            let new_demand = response.demand.len();
            self.backlog.absorb(response.demand.into_iter().map(DemandRequest::from));

            self.record_day(day, &movements, new_demand);

            log::info!(
                "Day {}: issued {} movements, {} new demand entries, {} pending.",
                day,
                movements.len(),
                new_demand,
                self.backlog.pending_len()
            );

            // Cooperative pacing for the service's rate limit.
            tokio::time::sleep(self.config.round_delay).await;
        }

        Ok(())
    }

    fn record_day(&mut self, day: u32, movements: &[Movement], new_demand: usize) {
        self.history.push(DayRecord {
            day,
            movements_issued: movements.len(),
            units_moved: movements.iter().map(|movement| movement.amount).sum(),
            new_demand,
            pending_demand: self.backlog.pending_len(),
            missed_demand: self.backlog.missed_len(),
            source_stock: self.ledger.total_stock_of(&self.network.source_ids()),
            storage_stock: self.ledger.total_stock_of(&self.network.storage_ids()),
        });
    }

    fn log_final_backlog(&self) {
        if self.backlog.is_empty() && self.backlog.missed().is_empty() {
            log::info!("Run {}: all demand fulfilled.", self.run_id);
            return;
        }

        for request in self.backlog.pending() {
            log::warn!(
                "Run {}: unfulfilled demand of {} units for customer '{}', window [{}, {}].",
                self.run_id,
                request.amount,
                request.customer,
                request.start_day,
                request.end_day
            );
        }
        for request in self.backlog.missed() {
            log::warn!(
                "Run {}: permanently missed demand of {} units for customer '{}', window [{}, {}].",
                self.run_id,
                request.amount,
                request.customer,
                request.start_day,
                request.end_day
            );
        }
    }
}
