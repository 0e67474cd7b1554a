//! Structured error types for vitae.
//!
//! Composition itself has exactly one fatal condition: a postal address
//! without a city. The remaining variants come from the collaborators the
//! composer drives (input parsing, photo loading, file output) and are
//! propagated unchanged.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, VitaeError>;

/// The unified error type returned by all public vitae API functions.
#[derive(Debug, Error)]
pub enum VitaeError {
    /// JSON input failed to parse as a valid résumé.
    #[error("Failed to parse résumé: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// The header has a street address but no city to go with it.
    #[error("Missing city for address '{address}'")]
    MissingCity { address: String },

    /// The photo could not be read or decoded.
    #[error("Image error: {0}")]
    Image(String),

    /// Writing the finished document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the JSON Resume schema. Check field names, types and dates (YYYY, YYYY-MM or YYYY-MM-DD).".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VitaeError::Parse { source: e, hint }
    }
}
