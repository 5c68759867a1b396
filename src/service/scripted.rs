use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::round_dto::{DemandDto, RoundRequestDto, RoundResponseDto};
use crate::error::{Error, Result};
use crate::service::round_client::{RoundService, SessionId};

/// Deterministic in-memory stand-in for the round service.
///
/// Each played round pops the next scripted demand batch; once the script
/// runs out, rounds come back empty. Every request is recorded so tests
/// can assert on what the driver actually sent, including whether the
/// session was torn down.
#[derive(Debug, Default)]
pub struct ScriptedRoundService {
    state: Mutex<ScriptedState>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    demand_script: Vec<Vec<DemandDto>>,
    next_round: usize,
    fail_on_day: Option<u32>,
    rounds_played: Vec<RoundRequestDto>,
    sessions_started: u32,
    sessions_ended: u32,
}

impl ScriptedRoundService {
    /// `demand_script[n]` is the demand revealed by the n-th played round
    /// (the bootstrap round is index 0).
    pub fn new(demand_script: Vec<Vec<DemandDto>>) -> ScriptedRoundService {
        ScriptedRoundService {
            state: Mutex::new(ScriptedState { demand_script, ..ScriptedState::default() }),
        }
    }

    /// Makes `play_round` fail for the given day, to exercise the
    /// driver's teardown path.
    pub fn with_failure_on_day(self, day: u32) -> ScriptedRoundService {
        self.state.lock().unwrap().fail_on_day = Some(day);
        self
    }

    pub fn rounds_played(&self) -> Vec<RoundRequestDto> {
        self.state.lock().unwrap().rounds_played.clone()
    }

    pub fn sessions_started(&self) -> u32 {
        self.state.lock().unwrap().sessions_started
    }

    pub fn sessions_ended(&self) -> u32 {
        self.state.lock().unwrap().sessions_ended
    }
}

#[async_trait]
impl RoundService for ScriptedRoundService {
    async fn start_session(&self) -> Result<SessionId> {
        let mut state = self.state.lock().unwrap();
        state.sessions_started += 1;
        Ok(Uuid::new_v4().to_string())
    }

    async fn play_round(
        &self,
        _session: &SessionId,
        request: &RoundRequestDto,
    ) -> Result<RoundResponseDto> {
        let mut state = self.state.lock().unwrap();

        if state.fail_on_day == Some(request.day) {
            return Err(Error::ServiceStatusError {
                status: 503,
                body: format!("scripted failure on day {}", request.day),
            });
        }

        state.rounds_played.push(request.clone());

        let round_index = state.next_round;
        state.next_round += 1;
        let demand = state.demand_script.get(round_index).cloned().unwrap_or_default();

        Ok(RoundResponseDto { round: Some(request.day), demand, ..RoundResponseDto::default() })
    }

    async fn end_session(&self, _session: &SessionId) -> Result<()> {
        self.state.lock().unwrap().sessions_ended += 1;
        Ok(())
    }
}
