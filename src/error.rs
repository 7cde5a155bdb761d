//! Error types shared by every command
//!
//! Each variant maps to one failure category the CLI reports before exiting
//! with status 1.

use thiserror::Error;

/// Errors that can occur while running a command
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment value is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command-line argument could not be interpreted
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    /// A JSON document did not match the expected shape
    #[error("Failed to parse JSON at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded document violates a structural rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An external tool could not be started
    #[error("Command '{program}' not found. Ensure it is installed and on your PATH")]
    ToolNotFound { program: String },

    /// An external tool exited with a non-zero status
    #[error("'{program}' exited with {status}:\n{stderr}")]
    Subprocess {
        program: String,
        status: String,
        stderr: String,
    },

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes JSON text into `T`, reporting the path of the first mismatch
pub fn from_json_str<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| Error::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })?;
    // reject anything after the top-level value
    deserializer.end().map_err(|source| Error::Json {
        path: String::new(),
        source,
    })?;
    Ok(value)
}
