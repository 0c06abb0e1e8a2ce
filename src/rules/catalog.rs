//! Registry of rule kinds, their canonical templates and descriptions

use crate::io::configuration::DOCUMENT_TYPE;
use crate::io::error::Result;
use crate::rules::content::RuleContent;
use crate::rules::document::{RuleDocument, RuleSet};
use crate::rules::kind::RuleKind;
use crate::validation::contracts::check_content;
use crate::validation::issues::ValidationError;
use serde_json::Value;

/// Catalog entry for a single rule kind
#[derive(Clone, Debug, PartialEq)]
pub struct RuleDefinition {
    /// Kind described by this entry
    pub kind: RuleKind,
    /// Canonical default content
    pub template: RuleContent,
    /// Human-readable purpose of the kind
    pub description: &'static str,
}

/// Immutable registry of every known rule kind
///
/// Built once and shared read-only; nothing in it changes after
/// construction.
#[derive(Clone, Debug)]
pub struct RuleTypeCatalog {
    definitions: Vec<RuleDefinition>,
}

impl Default for RuleTypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTypeCatalog {
    /// Build the registry with one definition per [`RuleKind`]
    pub fn new() -> Self {
        let definitions = RuleKind::ALL
            .into_iter()
            .map(|kind| RuleDefinition {
                kind,
                template: RuleContent::canonical(kind),
                description: describe(kind),
            })
            .collect();

        Self { definitions }
    }

    /// Registered kinds in declaration order
    pub fn list_rule_kinds(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.definitions.iter().map(|definition| definition.kind)
    }

    /// All catalog entries in declaration order
    pub fn definitions(&self) -> &[RuleDefinition] {
        &self.definitions
    }

    /// Catalog entry for a kind
    pub fn definition(&self, kind: RuleKind) -> Option<&RuleDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.kind == kind)
    }

    /// Fresh copy of the canonical content for a kind
    pub fn template_for(&self, kind: RuleKind) -> Value {
        self.definition(kind).map_or_else(
            || RuleContent::canonical(kind).to_value(),
            |definition| definition.template.to_value(),
        )
    }

    /// Canonical content for a kind given by its document key
    ///
    /// # Errors
    ///
    /// Returns [`crate::RulesError::UnknownRuleKind`] if `name` is not a
    /// registered kind
    pub fn template_for_name(&self, name: &str) -> Result<Value> {
        let kind: RuleKind = name.parse()?;
        Ok(self.template_for(kind))
    }

    /// Description of a kind
    pub fn description(&self, kind: RuleKind) -> &'static str {
        self.definition(kind)
            .map_or_else(|| describe(kind), |definition| definition.description)
    }

    /// Document for `category` pre-filled with every kind's template
    pub fn generate_blank_document(&self, category: &str) -> RuleDocument {
        let rules: RuleSet = self
            .definitions
            .iter()
            .map(|definition| {
                (
                    definition.kind.as_str().to_string(),
                    definition.template.to_value(),
                )
            })
            .collect();

        RuleDocument {
            document_type: Some(DOCUMENT_TYPE.to_string()),
            category: Some(category.to_string()),
            rules: Some(rules),
        }
    }

    /// Check that every template satisfies its own kind's contract
    ///
    /// # Errors
    ///
    /// Returns every contract violation found among the templates
    pub fn verify(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let problems: Vec<ValidationError> = self
            .definitions
            .iter()
            .filter_map(|definition| {
                check_content(definition.kind, &definition.template.to_value()).err()
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

const fn describe(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Connectivity => "Define how tiles should be connected",
        RuleKind::Neighbors => "Define which categories can be adjacent",
        RuleKind::Percentage => "Define percentage constraints for the category",
        RuleKind::Pattern => "Define specific tile patterns",
        RuleKind::Symmetry => "Define symmetry requirements",
        RuleKind::Frequency => "Define how often tiles should appear",
        RuleKind::Grouping => "Define how tiles should be grouped",
        RuleKind::Spacing => "Define spacing requirements between tiles",
        RuleKind::Border => "Define border-specific rules",
    }
}
