use serde::de::DeserializeOwned;
use std::path::Path;

use crate::api::network_dto::{
    ConnectionRecordDto, CustomerRecordDto, SourceRecordDto, StorageRecordDto, TeamRecordDto,
};
use crate::error::Result;

/// Parses a semicolon-delimited, headered CSV table into a list of `T`.
///
/// All config tables share this dialect. Errors are automatically
/// converted into `crate::error::Error` variants:
/// - `Error::CsvError` if the file cannot be read or a row is malformed.
pub fn parse_csv_table<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_path(file_path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

/// The five immutable config tables, as loaded from disk.
#[derive(Debug)]
pub struct NetworkTables {
    pub sources: Vec<SourceRecordDto>,
    pub storages: Vec<StorageRecordDto>,
    pub customers: Vec<CustomerRecordDto>,
    pub connections: Vec<ConnectionRecordDto>,
    pub teams: Vec<TeamRecordDto>,
}

/// Loads every config table from `data_dir`.
///
/// `teams.csv` is optional; the scheduler never consults it, so a missing
/// file is logged and tolerated.
pub fn load_network_tables(data_dir: &Path) -> Result<NetworkTables> {
    let sources = parse_csv_table(&data_dir.join("refineries.csv"))?;
    let storages = parse_csv_table(&data_dir.join("tanks.csv"))?;
    let customers = parse_csv_table(&data_dir.join("customers.csv"))?;
    let connections = parse_csv_table(&data_dir.join("connections.csv"))?;

    let teams_path = data_dir.join("teams.csv");
    let teams = if teams_path.exists() {
        parse_csv_table(&teams_path)?
    } else {
        log::debug!("No teams table at '{}', continuing without it.", teams_path.display());
        Vec::new()
    };

    log::info!(
        "Loaded config tables from '{}': {} sources, {} storages, {} customers, {} connections, {} teams.",
        data_dir.display(),
        sources.len(),
        storages.len(),
        customers.len(),
        connections.len(),
        teams.len()
    );

    Ok(NetworkTables { sources, storages, customers, connections, teams })
}
