//! The module contains the error the engine can throw.
//!
//! Failed remote calls inside a balance aggregation carry the pair that
//! failed, see [`Remote`].
//!
//!  [`Remote`]: EngineError::Remote
use rest_client::ClientError;
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("balance call failed for period {period}, combination {combination}: {source}")]
    Remote {
        period: String,
        combination: String,
        source: ClientError,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Database(#[from] DbErr),
}
