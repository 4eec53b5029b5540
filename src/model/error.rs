//! Error types for the extractly core.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`], which the binary reports before exiting.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the command-line surface
//!   - [`InputError`] - Reading the JSON input from a file or stdin
//!   - [`ApiError`] - Service payloads that cannot be decoded or requests that are invalid
//!   - [`ExportError`] - Writing laid-out pages to disk
//!   - `ConfigError` / `LoggingError` - Startup failures
//! - [`PersistenceError`] - Reported by the external save/delete hooks
//!
//! # Recovery Strategy
//!
//! Derived views (filtering, pagination, layout) are total and never produce errors.
//! Persistence failures are **non-fatal**: the list view model reports them in the
//! outcome of the operation that triggered them and leaves its rows and derived views
//! intact. Input, config and export errors are fatal for the binary.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::RowId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned from the binary's main logic.
///
/// Every domain error converts into `AppError` via `From`, so `main` can use `?`
/// throughout and print a single message on failure.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the JSON input.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The input was not a valid service payload.
    #[error("Invalid service payload: {0}")]
    Api(#[from] ApiError),

    /// Writing the export failed.
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// The configuration file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

/// Errors encountered when reading the JSON input from a file or stdin.
///
/// # Recovery Patterns
///
/// - **FileNotFound**: Display the path and exit
/// - **NoInput**: Display usage - a file path or piped stdin is required
/// - **Io**: Display the OS error and exit
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified input file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use extractly::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// No file path was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O failure while reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in service payloads and requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The URL submitted for extraction is not an absolute http(s) URL.
    ///
    /// The service rejects these with `400 Bad Request`; validating before the
    /// request avoids the round trip.
    #[error("Invalid or missing URL '{url}'. Must start with http:// or https://")]
    InvalidUrl {
        /// The rejected URL as entered.
        url: String,
    },

    /// The payload is not valid JSON for the expected shape.
    ///
    /// **Why `message` is `String`**: the `serde_json` error carries position state
    /// the caller never needs; the rendered message includes line and column.
    #[error("Malformed JSON: {message}")]
    Json {
        /// Parser message including line and column.
        message: String,
    },

    /// The payload is the service's `{ "error": ... }` body.
    #[error("Service returned an error: {message}")]
    Service {
        /// Message from the error body.
        message: String,
    },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Json {
            message: err.to_string(),
        }
    }
}

/// Failure reported by an external save or delete hook.
///
/// The list view model never propagates these as `Err` across its API. They travel
/// inside `SaveOutcome`/`DeleteOutcome` so the caller can surface them (a toast in
/// the dashboard) while the view stays consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store answered with a non-success status.
    ///
    /// **Recovery**: Keep local state as it was before the request, show `message`.
    #[error("Store rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP-like status code returned by the store.
        status: u16,
        /// Message returned by the store, or a generic description.
        message: String,
    },

    /// The store could not be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store has no record with this id.
    #[error("Row {0} not found in store")]
    NotFound(RowId),
}

/// Errors raised while writing an exported document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Creating the output directory or writing the file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document has no file name to write to.
    #[error("Export file name is empty")]
    EmptyFileName,
}
