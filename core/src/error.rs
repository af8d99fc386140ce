use crate::types::ProcessId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Data access error: {0}")]
    DataAccess(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value '{value}' in {table}.{column}")]
    InvalidRecord {
        table: &'static str,
        column: &'static str,
        value: String,
    },

    #[error("Analytics for process {process_id} could not be computed: {reason}")]
    PartialComputation { process_id: ProcessId, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
