//! Error handling for congresswatch
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for disclosure-tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("catalog load failed: {0}")]
    LoadFailed(String),

    #[error("bookmark store error: {0}")]
    BookmarkError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracker operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = TrackerError::LoadFailed("no such file".to_string());
        assert_eq!(err.to_string(), "catalog load failed: no such file");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to load disclosures");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to load disclosures"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }
}
