use std::str::FromStr;

use crate::api::round_dto::DemandDto;
use crate::domain::id::NodeId;

/// A customer's time-windowed request. Immutable once created: it is
/// either fully delivered in one movement or carried, unmodified, into
/// the next day's backlog. There is no partial fulfillment.
#[derive(Debug, Clone)]
pub struct DemandRequest {
    pub customer: NodeId,
    pub amount: f64,
    /// Day the round service reported the request.
    pub post_day: u32,
    /// Earliest acceptable arrival day.
    pub start_day: u32,
    /// Latest acceptable arrival day (inclusive).
    pub end_day: u32,
}

impl From<DemandDto> for DemandRequest {
    fn from(dto: DemandDto) -> DemandRequest {
        DemandRequest {
            customer: NodeId::new(dto.customer_id),
            amount: dto.amount,
            post_day: dto.post_day,
            start_day: dto.start_day,
            end_day: dto.end_day,
        }
    }
}

/// What happens to a request once its delivery window has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Keep it in the backlog forever (original behavior).
    #[default]
    Retain,
    /// Move it to the permanently-missed list and report it at run end.
    ReportMissed,
}

impl FromStr for ExpiryPolicy {
    type Err = String;

    fn from_str(label: &str) -> Result<ExpiryPolicy, String> {
        match label.to_ascii_lowercase().as_str() {
            "retain" => Ok(ExpiryPolicy::Retain),
            "report-missed" | "report_missed" => Ok(ExpiryPolicy::ReportMissed),
            other => Err(format!("Unknown expiry policy '{}', expected 'retain' or 'report-missed'.", other)),
        }
    }
}

/// Pending demand, carried across days. New requests are appended behind
/// whatever remained unfulfilled; `sort_by_deadline` then orders the
/// combined list earliest deadline first for urgency-first matching.
#[derive(Debug, Default)]
pub struct DemandBacklog {
    pending: Vec<DemandRequest>,
    missed: Vec<DemandRequest>,
}

impl DemandBacklog {
    pub fn new() -> DemandBacklog {
        DemandBacklog::default()
    }

    /// Appends newly revealed requests behind the carried ones.
    pub fn absorb(&mut self, new_requests: impl IntoIterator<Item = DemandRequest>) {
        self.pending.extend(new_requests);
    }

    /// Sorts pending requests ascending by `end_day`. The sort is stable,
    /// so requests with the same deadline keep their arrival order.
    pub fn sort_by_deadline(&mut self) {
        self.pending.sort_by_key(|request| request.end_day);
    }

    /// Applies the expiry policy for `current_day` and returns how many
    /// requests were declared missed. With `Retain` this is a no-op.
    pub fn expire(&mut self, current_day: u32, policy: ExpiryPolicy) -> usize {
        if policy == ExpiryPolicy::Retain {
            return 0;
        }

        let (expired, alive): (Vec<DemandRequest>, Vec<DemandRequest>) = self
            .pending
            .drain(..)
            .partition(|request| current_day > request.end_day);

        self.pending = alive;

        for request in &expired {
            log::warn!(
                "Demand of {} units for customer '{}' missed its window [{}, {}], current day {}.",
                request.amount,
                request.customer,
                request.start_day,
                request.end_day,
                current_day
            );
        }

        let count = expired.len();
        self.missed.extend(expired);
        count
    }

    /// Takes the pending requests for one allocation pass. The policy
    /// hands the unfulfilled ones back via `carry`.
    pub fn drain_pending(&mut self) -> Vec<DemandRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Restores the requests a pass could not fulfill, preserving order.
    pub fn carry(&mut self, unfulfilled: Vec<DemandRequest>) {
        debug_assert!(self.pending.is_empty(), "carry() must follow drain_pending()");
        self.pending = unfulfilled;
    }

    pub fn pending(&self) -> &[DemandRequest] {
        &self.pending
    }

    pub fn missed(&self) -> &[DemandRequest] {
        &self.missed
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn missed_len(&self) -> usize {
        self.missed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
