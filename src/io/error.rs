//! Error types for catalog lookups and rule storage

use crate::validation::issues::ValidationError;
use std::fmt;
use std::path::PathBuf;

/// Main error type for catalog and storage operations
///
/// Validation problems are not errors: they are reported through
/// [`crate::validation::validator::ValidationReport`]. They only surface here
/// when a caller asks for a validated write.
#[derive(Debug)]
pub enum RulesError {
    /// Name does not match any registered rule kind
    UnknownRuleKind {
        /// Name that was looked up
        kind: String,
    },

    /// No stored template with this name, or it cannot be read
    TemplateNotFound {
        /// Requested template name
        name: String,
    },

    /// Template or rule file name cannot be used as a file name
    InvalidName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// File system operation failed
    Storage {
        /// Path involved in the operation
        path: PathBuf,
        /// Operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Stored file is not a readable rule document
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Document failed validation where a valid one was required
    InvalidDocument {
        /// Validation errors of the rejected document
        errors: Vec<ValidationError>,
    },

    /// Some documents of a batch failed validation
    ValidationFailed {
        /// Number of invalid documents
        invalid: usize,
        /// Number of documents checked
        total: usize,
    },
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRuleKind { kind } => write!(f, "Unknown rule type: {kind}"),
            Self::TemplateNotFound { name } => write!(f, "Template '{name}' not found"),
            Self::InvalidName { name, reason } => write!(f, "Invalid name '{name}': {reason}"),
            Self::Storage {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "Storage error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::InvalidDocument { errors } => {
                write!(f, "Rule document is invalid")?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
            Self::ValidationFailed { invalid, total } => {
                write!(f, "{invalid} of {total} rule documents failed validation")
            }
        }
    }
}

impl std::error::Error for RulesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for catalog and storage results
pub type Result<T> = std::result::Result<T, RulesError>;

/// Attach a path and operation to I/O failures
pub trait StorageContext<T> {
    /// Wrap an I/O error as [`RulesError::Storage`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn storage_context(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, std::io::Error> {
    fn storage_context(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| RulesError::Storage {
            path: path.into(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for RulesError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an unknown rule kind error
pub fn unknown_rule_kind(kind: &impl ToString) -> RulesError {
    RulesError::UnknownRuleKind {
        kind: kind.to_string(),
    }
}

/// Create a template not found error
pub fn template_not_found(name: &impl ToString) -> RulesError {
    RulesError::TemplateNotFound {
        name: name.to_string(),
    }
}

/// Create an invalid name error
pub fn invalid_name(name: &impl ToString, reason: &'static str) -> RulesError {
    RulesError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
