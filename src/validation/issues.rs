//! Diagnostics produced while validating a rule document

use crate::rules::kind::RuleKind;
use std::fmt;

/// Problem that makes a document invalid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent
    ///
    /// With no `kind` this is a top-level document field; with a kind, at
    /// least one of `fields` must appear in that kind's content.
    MissingRequiredField {
        /// Rule kind whose content is incomplete, `None` for the document
        kind: Option<RuleKind>,
        /// Field names, any one of which would satisfy the requirement
        fields: &'static [&'static str],
    },

    /// The `type` marker is not `"rule"`
    InvalidDocumentType {
        /// Marker found in the document, rendered as JSON
        found: String,
    },

    /// `rules` contains a key that is not a registered kind
    UnknownRuleKind {
        /// Offending key
        kind: String,
    },

    /// A field holds the wrong JSON type
    InvalidFieldType {
        /// Kind whose content is wrong, `None` for the document
        kind: Option<RuleKind>,
        /// Field name
        field: &'static str,
        /// Expected type, e.g. "a boolean" or "a list"
        expected: &'static str,
    },

    /// A field value is outside its accepted range or set
    InvalidFieldRange {
        /// Kind whose content is wrong
        kind: RuleKind,
        /// Field name
        field: &'static str,
        /// Description of the offending value and the accepted range
        detail: String,
    },

    /// A lower bound exceeds its upper bound
    InconsistentBounds {
        /// Kind whose content is wrong
        kind: RuleKind,
        /// Lower bound field
        lower: &'static str,
        /// Upper bound field
        upper: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField { kind: None, fields } => {
                write!(f, "Missing required field: {}", fields.join(", "))
            }
            Self::MissingRequiredField {
                kind: Some(kind),
                fields,
            } => match fields {
                [field] => write!(f, "{} rule must specify '{field}'", kind.title()),
                [first, second] => write!(
                    f,
                    "{} rule must specify either '{first}' or '{second}'",
                    kind.title()
                ),
                _ => write!(
                    f,
                    "{} rule must specify at least one of: {}",
                    kind.title(),
                    quoted_list(fields)
                ),
            },
            Self::InvalidDocumentType { found } => {
                write!(f, "Invalid rule type {found} - must be 'rule'")
            }
            Self::UnknownRuleKind { kind } => write!(f, "Unknown rule type: {kind}"),
            Self::InvalidFieldType {
                kind,
                field,
                expected,
            } => match kind {
                Some(kind) => write!(f, "{kind}: '{field}' must be {expected}"),
                None => write!(f, "'{field}' must be {expected}"),
            },
            Self::InvalidFieldRange {
                kind,
                field,
                detail,
            } => write!(f, "{kind}: '{field}' {detail}"),
            Self::InconsistentBounds { kind, lower, upper } => {
                write!(f, "{kind}: '{lower}' cannot be greater than '{upper}'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Non-fatal note about rule kinds that may work against each other
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoherenceWarning {
    /// Tiles must connect but no neighbour is allowed
    ConnectedWithoutAllowedNeighbors,
    /// Percentage target and occurrence cap both constrain coverage
    PercentageVersusFrequency,
    /// Groups larger than one tile while tiles must keep apart
    GroupingVersusSpacing,
    /// Border-only tiles combined with pattern rules
    BorderWithPattern,
    /// Symmetry constrains the behaviour of another kind
    SymmetryAffects(RuleKind),
}

impl fmt::Display for CoherenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectedWithoutAllowedNeighbors => {
                f.write_str("Connected tiles should have allowed neighbors specified")
            }
            Self::PercentageVersusFrequency => {
                f.write_str("Percentage and frequency rules might conflict")
            }
            Self::GroupingVersusSpacing => f.write_str("Grouping and spacing rules might conflict"),
            Self::BorderWithPattern => {
                f.write_str("Border and pattern rules might need special consideration")
            }
            Self::SymmetryAffects(kind) => {
                write!(f, "Symmetry rule might affect {kind} rule behavior")
            }
        }
    }
}

fn quoted_list(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| format!("'{field}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
