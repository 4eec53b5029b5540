//! JSON input sources.
//!
//! The binary reads one service payload, either from a file or from piped
//! stdin. Stdin attached to a terminal is refused rather than blocking on it.

use crate::model::error::InputError;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

/// Where the input payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// JSON piped to stdin.
    Stdin,
}

impl InputSource {
    /// Read the whole payload.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` for a missing file and
    /// `InputError::Io` for any other read failure.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                let contents = fs::read_to_string(path)?;
                debug!(path = %path.display(), bytes = contents.len(), "Read input file");
                Ok(contents)
            }
            InputSource::Stdin => read_all(std::io::stdin().lock()),
        }
    }
}

/// Read `reader` to the end as UTF-8.
pub fn read_all(mut reader: impl Read) -> Result<String, InputError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    debug!(bytes = contents.len(), "Read piped input");
    Ok(contents)
}

/// Detect the input source.
///
/// # Logic:
/// 1. If file path is provided: read that file
/// 2. If stdin is piped: read stdin
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist and
/// `InputError::NoInput` if no file is given and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) if path.exists() => Ok(InputSource::File(path)),
        Some(path) => Err(InputError::FileNotFound { path }),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
