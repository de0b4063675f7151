//! Store error types.

use std::path::PathBuf;

/// Errors from the query gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading seed data from disk failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Seed data could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Seed data violates a table constraint.
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::InvalidSeed("duplicate user 3".into());
        assert_eq!(err.to_string(), "invalid seed data: duplicate user 3");

        let err = StoreError::Io {
            path: PathBuf::from("seed.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("failed to read seed.json"));
    }
}
