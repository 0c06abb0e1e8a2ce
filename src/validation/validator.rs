//! Structural, content and coherence validation of rule documents

use crate::io::configuration::DOCUMENT_TYPE;
use crate::rules::catalog::RuleTypeCatalog;
use crate::rules::content::RuleContent;
use crate::rules::document::RuleDocument;
use crate::rules::kind::RuleKind;
use crate::validation::coherence::check_coherence;
use crate::validation::contracts::check_content;
use crate::validation::issues::{CoherenceWarning, ValidationError};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use tracing::debug;

/// Top-level fields every document must carry, checked independently
const REQUIRED_FIELDS: [&[&str]; 3] = [&["type"], &["category"], &["rules"]];

/// Complete outcome of validating one document
///
/// Errors invalidate the document, warnings never do.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    /// No errors were found
    pub is_valid: bool,
    /// Every structural and content problem found
    pub errors: Vec<ValidationError>,
    /// Coherence notes, independent of validity
    pub warnings: Vec<CoherenceWarning>,
    /// Typed content of the kinds that passed their contract
    pub contents: Vec<RuleContent>,
}

impl ValidationReport {
    /// Error descriptions in the order they were found
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning descriptions in the order they were found
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Typed content for a kind, if it was present and valid
    pub fn content(&self, kind: RuleKind) -> Option<&RuleContent> {
        self.contents.iter().find(|content| content.kind() == kind)
    }

    fn push_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("isValid", &self.is_valid)?;
        state.serialize_field("errors", &self.error_messages())?;
        state.serialize_field("warnings", &self.warning_messages())?;
        state.end()
    }
}

/// Validates rule documents against the kinds registered in a catalog
#[derive(Clone, Debug, Default)]
pub struct RuleValidator {
    catalog: RuleTypeCatalog,
}

impl RuleValidator {
    /// Create a validator backed by `catalog`
    pub const fn new(catalog: RuleTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Catalog this validator recognizes kinds from
    pub const fn catalog(&self) -> &RuleTypeCatalog {
        &self.catalog
    }

    /// Validate an in-memory document
    pub fn validate(&self, document: &RuleDocument) -> ValidationReport {
        self.validate_value(&document.to_value())
    }

    /// Validate an arbitrary JSON value as a rule document
    ///
    /// Never fails: every problem is reported in the returned report.
    pub fn validate_value(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport {
            is_valid: true,
            ..ValidationReport::default()
        };

        let Some(root) = document.as_object() else {
            report.push_error(ValidationError::InvalidFieldType {
                kind: None,
                field: "document",
                expected: "a JSON object",
            });
            return report;
        };

        for fields in REQUIRED_FIELDS {
            if fields.iter().all(|field| !root.contains_key(*field)) {
                report.push_error(ValidationError::MissingRequiredField { kind: None, fields });
            }
        }

        if let Some(marker) = root.get("type")
            && marker.as_str() != Some(DOCUMENT_TYPE)
        {
            report.push_error(ValidationError::InvalidDocumentType {
                found: marker.to_string(),
            });
        }

        if let Some(category) = root.get("category")
            && !category.is_string()
        {
            report.push_error(ValidationError::InvalidFieldType {
                kind: None,
                field: "category",
                expected: "a string",
            });
        }

        match root.get("rules") {
            Some(Value::Object(rules)) => {
                for (key, content) in rules {
                    self.check_rule(key, content, &mut report);
                }
                report.warnings = check_coherence(rules);
            }
            Some(_) => report.push_error(ValidationError::InvalidFieldType {
                kind: None,
                field: "rules",
                expected: "an object",
            }),
            None => {}
        }

        debug!(
            valid = report.is_valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated rule document"
        );

        report
    }

    fn check_rule(&self, key: &str, content: &Value, report: &mut ValidationReport) {
        let Some(kind) = key
            .parse::<RuleKind>()
            .ok()
            .filter(|kind| self.catalog.definition(*kind).is_some())
        else {
            report.push_error(ValidationError::UnknownRuleKind {
                kind: key.to_string(),
            });
            return;
        };

        match check_content(kind, content) {
            Ok(typed) => report.contents.push(typed),
            Err(error) => report.push_error(error),
        }
    }
}
