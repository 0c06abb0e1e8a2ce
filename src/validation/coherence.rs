//! Cross-kind heuristics that flag rule combinations likely to conflict
//!
//! Only the pairs below are checked. They run over raw content, so they
//! still produce warnings for documents whose contracts failed.

use crate::rules::document::RuleSet;
use crate::rules::kind::RuleKind;
use crate::validation::issues::CoherenceWarning;
use serde_json::Value;

/// Kinds whose behaviour a symmetry rule changes
const SYMMETRY_SENSITIVE: [RuleKind; 3] =
    [RuleKind::Pattern, RuleKind::Grouping, RuleKind::Spacing];

/// Evaluate every coherence heuristic over a rule set
pub fn check_coherence(rules: &RuleSet) -> Vec<CoherenceWarning> {
    let mut warnings = Vec::new();

    if field(rules, RuleKind::Connectivity, "mustBeConnected") == Some(&Value::Bool(true))
        && !field(rules, RuleKind::Neighbors, "allowedNeighbors").is_some_and(is_truthy)
    {
        warnings.push(CoherenceWarning::ConnectedWithoutAllowedNeighbors);
    }

    if field(rules, RuleKind::Percentage, "target").is_some()
        && field(rules, RuleKind::Frequency, "maxOccurrences").is_some()
    {
        warnings.push(CoherenceWarning::PercentageVersusFrequency);
    }

    let min_group = numeric_or(rules, RuleKind::Grouping, "minGroupSize", 1.0);
    let min_spacing = numeric_or(rules, RuleKind::Spacing, "minSpacing", 0.0);
    if present(rules, RuleKind::Grouping)
        && present(rules, RuleKind::Spacing)
        && min_group > 1.0
        && min_spacing > 0.0
    {
        warnings.push(CoherenceWarning::GroupingVersusSpacing);
    }

    if field(rules, RuleKind::Border, "mustBeBorder") == Some(&Value::Bool(true))
        && present(rules, RuleKind::Pattern)
    {
        warnings.push(CoherenceWarning::BorderWithPattern);
    }

    if present(rules, RuleKind::Symmetry) {
        warnings.extend(
            SYMMETRY_SENSITIVE
                .into_iter()
                .filter(|kind| present(rules, *kind))
                .map(CoherenceWarning::SymmetryAffects),
        );
    }

    warnings
}

fn present(rules: &RuleSet, kind: RuleKind) -> bool {
    rules.contains_key(kind.as_str())
}

fn field<'a>(rules: &'a RuleSet, kind: RuleKind, name: &str) -> Option<&'a Value> {
    rules.get(kind.as_str())?.get(name)
}

fn numeric_or(rules: &RuleSet, kind: RuleKind, name: &str, default: f64) -> f64 {
    field(rules, kind, name)
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

/// Loose emptiness test: `null`, `false`, zero and empty containers are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
