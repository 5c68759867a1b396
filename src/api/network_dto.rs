use serde::Deserialize;

/// Row of `refineries.csv` (production sources).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecordDto {
    pub id: String,
    pub name: String,
    pub capacity: f64,
    pub max_output: f64,
    pub production: f64,
    pub overflow_penalty: f64,
    pub underflow_penalty: f64,
    pub over_output_penalty: f64,
    pub production_cost: f64,
    pub production_co2: f64,
    pub initial_stock: f64,
    pub node_type: String,
}

/// Row of `tanks.csv` (intermediate storage).
#[derive(Debug, Clone, Deserialize)]
pub struct StorageRecordDto {
    pub id: String,
    pub name: String,
    pub capacity: f64,
    pub max_input: f64,
    pub max_output: f64,
    pub overflow_penalty: f64,
    pub underflow_penalty: f64,
    pub over_input_penalty: f64,
    pub over_output_penalty: f64,
    pub initial_stock: f64,
    pub node_type: String,
}

/// Row of `customers.csv` (consumption sinks).
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRecordDto {
    pub id: String,
    pub name: String,
    pub max_input: f64,
    pub over_input_penalty: f64,
    pub late_delivery_penalty: f64,
    pub early_delivery_penalty: f64,
    pub node_type: String,
}

/// Row of `connections.csv` (directed transport edges).
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRecordDto {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub distance: f64,
    pub lead_time_days: u32,
    pub max_capacity: f64,
    pub connection_type: String,
}

/// Row of the optional `teams.csv`. Parsed and counted, never consulted
/// by the scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecordDto {
    pub id: String,
    pub name: String,
}
