use engine::EngineError;
use rest_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("missing required setting `{0}`")]
    MissingSetting(&'static str),
    #[error("{0}")]
    Engine(#[from] EngineError),
    #[error("api client error: {0}")]
    Client(#[from] ClientError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
