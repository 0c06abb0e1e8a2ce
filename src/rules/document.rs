//! In-memory and JSON shape of a rule document

use crate::io::configuration::DOCUMENT_TYPE;
use crate::rules::kind::RuleKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rule kind key to raw content, in document order
pub type RuleSet = Map<String, Value>;

/// A category's placement rules as persisted on disk
///
/// Fields are optional so that incomplete documents coming from an editor
/// can still be represented and reported on by the validator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Literal marker, `"rule"` for well-formed documents
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Tile category the rules apply to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Content keyed by rule kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleSet>,
}

impl RuleDocument {
    /// Empty, well-formed document for a category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            document_type: Some(DOCUMENT_TYPE.to_string()),
            category: Some(category.into()),
            rules: Some(RuleSet::new()),
        }
    }

    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns the parser error if the text is not JSON or a top-level field
    /// has the wrong JSON type
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Convert an already parsed JSON value
    ///
    /// # Errors
    ///
    /// Returns the conversion error if a top-level field has the wrong type
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// JSON value of the whole document
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        if let Some(document_type) = &self.document_type {
            root.insert("type".to_string(), Value::from(document_type.as_str()));
        }
        if let Some(category) = &self.category {
            root.insert("category".to_string(), Value::from(category.as_str()));
        }
        if let Some(rules) = &self.rules {
            root.insert("rules".to_string(), Value::Object(rules.clone()));
        }
        Value::Object(root)
    }

    /// Two-space indented JSON, the on-disk format
    ///
    /// # Errors
    ///
    /// Returns the serializer error, which only happens for non-finite numbers
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Structural check: marker, category and rules are all present
    pub fn is_well_formed(&self) -> bool {
        self.document_type.as_deref() == Some(DOCUMENT_TYPE)
            && self.category.is_some()
            && self.rules.is_some()
    }

    /// Raw content stored for a kind
    pub fn rule(&self, kind: RuleKind) -> Option<&Value> {
        self.rules.as_ref()?.get(kind.as_str())
    }

    /// Store content for a kind, replacing what was there
    pub fn set_rule(&mut self, kind: RuleKind, content: Value) -> Option<Value> {
        self.rules
            .get_or_insert_with(RuleSet::new)
            .insert(kind.as_str().to_string(), content)
    }

    /// Remove a kind's content, keeping the order of the remaining kinds
    pub fn remove_rule(&mut self, kind: RuleKind) -> Option<Value> {
        self.rules.as_mut()?.shift_remove(kind.as_str())
    }

    /// Kinds present in the document that the catalog knows about
    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules
            .iter()
            .flat_map(Map::keys)
            .filter_map(|key| key.parse().ok())
            .collect()
    }

    /// Overlay another document's rules onto this one
    ///
    /// Entries from `overlay` replace same-kind entries; kinds only present
    /// here are kept. Category and marker are untouched.
    pub fn merge_rules(&mut self, overlay: &Self) {
        let Some(incoming) = &overlay.rules else {
            return;
        };

        let rules = self.rules.get_or_insert_with(RuleSet::new);
        for (key, content) in incoming {
            rules.insert(key.clone(), content.clone());
        }
    }
}
