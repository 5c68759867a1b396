use std::path::PathBuf;
use std::time::Duration;

use crate::domain::demand::ExpiryPolicy;

/// Run parameters, owned by the driver. Collected from the CLI in `main`;
/// nothing in here is reachable through globals.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the round service, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,

    /// Static credential sent as the `API-KEY` header on every request.
    pub api_key: String,

    /// Directory holding the five semicolon-delimited config tables.
    pub data_dir: PathBuf,

    /// Last playable day. Arrivals past this day are never scheduled.
    pub horizon_end: u32,

    /// Minimum pause between rounds, cooperative pacing for the service's
    /// rate limit.
    pub round_delay: Duration,

    /// What happens to demand whose delivery window has passed.
    pub expiry_policy: ExpiryPolicy,

    /// Where the per-day run report is written after the run.
    pub report_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            base_url: "http://localhost:8080/api/v1".to_string(),
            api_key: String::new(),
            data_dir: PathBuf::from("data"),
            horizon_end: 42,
            round_delay: Duration::from_millis(1000),
            expiry_policy: ExpiryPolicy::Retain,
            report_path: PathBuf::from("run_report.csv"),
        }
    }
}
