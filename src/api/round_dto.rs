use serde::{Deserialize, Serialize};

/// Body of a `play/round` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRequestDto {
    pub day: u32,
    pub movements: Vec<MovementDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub connection_id: String,
    pub amount: f64,
}

/// Body of a `play/round` response. The service also reports penalty and
/// KPI blocks; those are carried opaquely so schema drift on their side
/// does not break the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponseDto {
    #[serde(default)]
    pub round: Option<u32>,

    #[serde(default)]
    pub demand: Vec<DemandDto>,

    #[serde(default)]
    pub penalties: Vec<serde_json::Value>,

    #[serde(default)]
    pub delta_kpis: Option<serde_json::Value>,

    #[serde(default)]
    pub total_kpis: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandDto {
    pub customer_id: String,
    pub amount: f64,
    pub post_day: u32,
    pub start_day: u32,
    pub end_day: u32,
}
