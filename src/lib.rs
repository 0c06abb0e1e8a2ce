//! Placement rules for procedural tilemap generation
//!
//! A rule document attaches constraints of several kinds (connectivity,
//! neighbours, coverage, patterns, symmetry, frequency, grouping, spacing,
//! borders) to a tile category. This crate provides the catalog of rule
//! kinds, validation of documents against per-kind contracts with
//! cross-kind coherence warnings, and file-backed template and rule stores.

#![forbid(unsafe_code)]

/// Input/output: command line, configuration, errors and summaries
pub mod io;
/// Rule kinds, typed content, the catalog and the document model
pub mod rules;
/// Template and rule file persistence
pub mod storage;
/// Contract and coherence checking of rule documents
pub mod validation;

pub use io::error::{Result, RulesError};
pub use rules::catalog::RuleTypeCatalog;
pub use rules::document::RuleDocument;
pub use rules::kind::RuleKind;
pub use storage::templates::TemplateStore;
pub use validation::validator::{RuleValidator, ValidationReport};
