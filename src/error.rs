//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

use crate::types::VerseReference;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Corpus retrieval failed for one edition
    #[error("Failed to retrieve {edition} ({key}): {message}")]
    Retrieval {
        /// Edition that was being fetched.
        edition: String,
        /// Reference-range key passed to the source.
        key: String,
        /// Human-readable error description.
        message: String,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// The two editions of one pass cover different verses
    #[error(
        "Editions {original} and {translated} cover different verses: {} only in {original}, {} only in {translated}",
        .only_in_original.len(),
        .only_in_translated.len()
    )]
    ScopeMismatch {
        /// Original-language edition name.
        original: String,
        /// Translated edition name.
        translated: String,
        /// References present only in the original edition.
        only_in_original: Vec<VerseReference>,
        /// References present only in the translated edition.
        only_in_translated: Vec<VerseReference>,
    },

    /// A concordance marker whose suffix is not a valid number
    #[error("Malformed concordance marker {marker:?}: {reason}")]
    MalformedIdentifier {
        /// The raw marker text as it appeared in the verse.
        marker: String,
        /// Why it could not be normalized.
        reason: &'static str,
    },

    /// Text appeared before any verse header and orphans are rejected
    #[error("Line {line_number} precedes any verse header: {line:?}")]
    OrphanContinuation {
        /// 1-based physical line number in the retrieved text.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
    },

    /// Neither testament key was supplied
    #[error("No keys provided, pass --ot-key and/or --nt-key (run with -h to see help)")]
    NoInputKeys,

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// JSON serialization of aligned output failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a retrieval error without a hint
    pub fn retrieval(edition: impl Into<String>, key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Retrieval {
            edition: edition.into(),
            key: key.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Create a retrieval error from a failed spawn of the retrieval program
    pub fn retrieval_spawn(edition: impl Into<String>, key: impl Into<String>, source: &std::io::Error) -> Self {
        let hint = match source.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Install diatheke (libsword) or set INTERLINEAR_CORPUS_DIR to use pre-fetched text")
            }
            std::io::ErrorKind::PermissionDenied => Some("Check INTERLINEAR_DIATHEKE points at an executable"),
            _ => None,
        };
        Self::Retrieval {
            edition: edition.into(),
            key: key.into(),
            message: source.to_string(),
            hint,
        }
    }

    /// Create a retrieval error from a non-zero exit of the retrieval program
    pub fn retrieval_status(edition: impl Into<String>, key: impl Into<String>, code: Option<i32>, stderr: &str) -> Self {
        let message = match code {
            Some(code) => format!("exited with status {code}: {}", stderr.trim()),
            None => format!("terminated by signal: {}", stderr.trim()),
        };
        Self::Retrieval {
            edition: edition.into(),
            key: key.into(),
            message,
            hint: Some("Check that the SWORD module for this edition is installed and the key is valid"),
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a malformed-identifier error for a raw marker
    pub fn malformed(marker: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedIdentifier { marker: marker.into(), reason }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn retrieval_provides_hints() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = Error::retrieval_spawn("OSHB", "Gen 1", &source);
        match err {
            Error::Retrieval { hint: Some(h), .. } => {
                assert!(h.contains("diatheke"));
            }
            _ => panic!("Expected Retrieval error with hint"),
        }
    }

    #[test]
    fn scope_mismatch_message_counts_references() {
        let err = Error::ScopeMismatch {
            original: "OSHB".into(),
            translated: "SpaRV1909".into(),
            only_in_original: vec![VerseReference::new("Genesis 1:2")],
            only_in_translated: vec![],
        };
        let message = err.to_string();
        assert!(message.contains("1 only in OSHB"));
        assert!(message.contains("0 only in SpaRV1909"));
    }

    #[test]
    fn malformed_names_the_marker() {
        let err = Error::malformed("<H>", "missing number");
        assert!(err.to_string().contains("<H>"));
    }
}
