//! Domain error types

use std::path::PathBuf;

/// Recoverable conditions reported by the table sizer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SizerError {
    /// The page has no container carrying the control-panel marker.
    #[error("No container marked '{marker}' found; control panel not inserted")]
    MissingContainer { marker: String },
}

/// A table whose rows do not line up with its header cells
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Table '{table_id}' row {row} has {found} cells, expected {expected}")]
pub struct ShapeDiagnostic {
    pub table_id: String,
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// Errors raised while loading a document from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported document type: {} (expected .json, .yaml, .yml or .csv)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SizerError::MissingContainer {
            marker: "controls".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No container marked 'controls' found; control panel not inserted"
        );

        let diag = ShapeDiagnostic {
            table_id: "phases".to_string(),
            row: 2,
            expected: 5,
            found: 4,
        };
        assert_eq!(diag.to_string(), "Table 'phases' row 2 has 4 cells, expected 5");
    }
}
