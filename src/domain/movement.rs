use crate::api::round_dto::MovementDto;
use crate::domain::id::ConnectionId;

/// A scheduled transfer: `amount` units on `connection`, issued on `day`.
/// The arrival day is implicit, issue day plus the connection's lead time.
#[derive(Debug, Clone)]
pub struct Movement {
    pub connection: ConnectionId,
    pub amount: f64,
    pub day: u32,
}

impl Movement {
    pub fn to_dto(&self) -> MovementDto {
        MovementDto { connection_id: self.connection.as_str().to_string(), amount: self.amount }
    }
}
