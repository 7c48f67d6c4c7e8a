//! Core error types for playtrack-core.
//!
//! This module defines the error hierarchy using thiserror. Every fallible
//! operation in the library reports through one of these enums; the CLI
//! collapses them to a single user-visible line.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for playtrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote stats backend errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Backend-as-a-service auth errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors from the remote stats backend and the BaaS datastore.
///
/// The backends are opaque JSON services; everything they do wrong collapses
/// to a status code, a transport failure, or a payload we cannot use.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Base URL could not be parsed or joined
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status
    #[error("API request failed: HTTP {status}")]
    Http { status: u16 },

    /// Transport-level failure (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response arrived but the envelope said `success: false`
    #[error("API rejected the request: {0}")]
    Rejected(String),

    /// Response body was not the JSON shape we expected
    #[error("Unexpected API response: {0}")]
    BadPayload(String),

    /// Failed to build the blocking runtime for the HTTP client
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Auth errors for the backend-as-a-service client.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No stored session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Backend rejected the credentials
    #[error("Credentials rejected: {0}")]
    CredentialsRejected(String),

    /// Keyring read/write failed
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// Login/signup response was missing the token or user id
    #[error("Malformed auth response: {0}")]
    BadResponse(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A wellness session is already running or in overtime
    #[error("A session is already active; stop it before starting a new one")]
    SessionActive,

    /// Session duration must be a positive number of minutes
    #[error("Invalid session duration: {0} minutes")]
    InvalidDuration(u64),

    /// Unknown game identifier
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// No saved player identifier for the game
    #[error("No saved player for {game}; pass an id or run `profile set`")]
    NoSavedPlayer { game: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
