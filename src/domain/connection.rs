use crate::api::network_dto::ConnectionRecordDto;
use crate::domain::id::{ConnectionId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Pipeline,
    Truck,
}

impl TransportMode {
    /// Case-insensitive parse. Unknown labels are a data error in the
    /// connections table; the caller decides how loudly to complain.
    pub fn parse(label: &str) -> Option<TransportMode> {
        match label.to_ascii_lowercase().as_str() {
            "pipeline" => Some(TransportMode::Pipeline),
            "truck" => Some(TransportMode::Truck),
            _ => None,
        }
    }
}

/// A directed transport edge. Parallel connections between the same node
/// pair (e.g. a pipeline next to a truck route) are allowed and keep
/// distinct ids.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
    /// Whole-day transit duration. Arrival day = issue day + lead time.
    pub lead_time: u32,
    /// Maximum amount a single movement may carry.
    pub max_capacity: f64,
    pub mode: TransportMode,
    /// Efficiency score: capacity per unit distance-time. Zero when the
    /// lead time is zero; such edges are never picked for replenishment
    /// but stay usable for direct matching.
    pub ratio: f64,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        from: NodeId,
        to: NodeId,
        distance: f64,
        lead_time: u32,
        max_capacity: f64,
        mode: TransportMode,
    ) -> Connection {
        let ratio = if lead_time > 0 {
            max_capacity / (distance * f64::from(lead_time))
        } else {
            0.0
        };

        Connection { id, from, to, distance, lead_time, max_capacity, mode, ratio }
    }

    pub fn arrival_day(&self, issue_day: u32) -> u32 {
        issue_day + self.lead_time
    }
}

impl From<ConnectionRecordDto> for Connection {
    fn from(dto: ConnectionRecordDto) -> Connection {
        let mode = TransportMode::parse(&dto.connection_type).unwrap_or_else(|| {
            log::warn!(
                "Connection '{}' has unknown transport mode '{}', treating it as a truck route.",
                dto.id,
                dto.connection_type
            );
            TransportMode::Truck
        });

        Connection::new(
            ConnectionId::new(dto.id),
            NodeId::new(dto.from_id),
            NodeId::new(dto.to_id),
            dto.distance,
            dto.lead_time_days,
            dto.max_capacity,
            mode,
        )
    }
}
