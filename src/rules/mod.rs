//! Rule vocabulary shared by validation and storage
//!
//! This module contains:
//! - The closed set of rule kinds
//! - Typed content records for each kind
//! - The catalog of canonical templates
//! - The rule document model

/// Registry of kinds, templates and descriptions
pub mod catalog;
/// Typed content records and the tagged content union
pub mod content;
/// Rule document model
pub mod document;
/// Rule kind enumeration
pub mod kind;

pub use catalog::RuleTypeCatalog;
pub use content::RuleContent;
pub use document::RuleDocument;
pub use kind::RuleKind;
