//! Error handling for the application

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, raised at startup before any network call
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is required!")]
    MissingVar(&'static str),

    #[error("Keypair file not found: {}", .0.display())]
    KeypairNotFound(PathBuf),

    #[error("Failed to read keypair file {}: {reason}", .path.display())]
    KeypairUnreadable { path: PathBuf, reason: String },

    #[error("Invalid keypair in {}: {reason}", .path.display())]
    InvalidKeypair { path: PathBuf, reason: String },

    #[error("Invalid public key {value}: {reason}")]
    InvalidPubkey { value: String, reason: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to assemble transaction: {0}")]
    Assembly(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction rejected: {0}")]
    RemoteRejection(String),

    #[error("Simulation failed: {0}")]
    Simulation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for AppError {
    fn from(err: bincode::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
