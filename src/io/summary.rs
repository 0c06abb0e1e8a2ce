//! Plain-text summaries of rule content for display next to an editor

use crate::rules::document::RuleDocument;
use crate::rules::kind::RuleKind;
use serde_json::Value;

/// Describe one rule's content as a titled bullet list
///
/// Missing fields are shown with the defaults a generator would assume.
pub fn summarize(kind: RuleKind, content: &Value) -> String {
    let lines: Vec<String> = match kind {
        RuleKind::Connectivity => vec![
            bullet("Must be connected", &scalar(content, "mustBeConnected", "false")),
            bullet("Connection type", &scalar(content, "connectionType", "orthogonal")),
        ],
        RuleKind::Neighbors => vec![
            bullet("Allowed neighbors", &joined(content, "allowedNeighbors", "None")),
            bullet("Forbidden neighbors", &joined(content, "forbiddenNeighbors", "None")),
            bullet("Positions", &joined(content, "positions", "all")),
        ],
        RuleKind::Percentage => vec![
            bullet("Minimum", &format!("{}%", scalar(content, "min", "0"))),
            bullet("Maximum", &format!("{}%", scalar(content, "max", "100"))),
            bullet("Target", &format!("{}%", scalar(content, "target", "-"))),
        ],
        RuleKind::Pattern => vec![
            bullet("Required patterns", &count(content, "requiredPatterns").to_string()),
            bullet("Forbidden patterns", &count(content, "forbiddenPatterns").to_string()),
            bullet("Pattern size", &pattern_size(content)),
        ],
        RuleKind::Symmetry => vec![
            bullet("Type", &scalar(content, "type", "none")),
            bullet("Strictness", &scalar(content, "strictness", "1.0")),
        ],
        RuleKind::Frequency => vec![
            bullet("Minimum occurrences", &scalar(content, "minOccurrences", "none")),
            bullet("Maximum occurrences", &scalar(content, "maxOccurrences", "unlimited")),
            bullet(
                "Spacing",
                &content
                    .get("spacing")
                    .map_or_else(|| "none".to_string(), |spacing| range(spacing, "min", "max")),
            ),
        ],
        RuleKind::Grouping => vec![
            bullet("Group size", &range(content, "minGroupSize", "maxGroupSize")),
            bullet("Shape", &scalar(content, "groupShape", "any")),
        ],
        RuleKind::Spacing => vec![
            bullet("Spacing", &range(content, "minSpacing", "maxSpacing")),
            bullet("Relative to", &joined(content, "relativeTo", "all categories")),
        ],
        RuleKind::Border => vec![
            bullet("Must be border", &scalar(content, "mustBeBorder", "false")),
            bullet("Border sides", &joined(content, "borderSides", "all")),
            bullet("Width", &scalar(content, "borderWidth", "1")),
        ],
    };

    format!("{} Rule\n{}", kind.title(), lines.join("\n"))
}

/// Summaries of every known kind in a document, in catalog order
pub fn summarize_document(document: &RuleDocument) -> String {
    let sections: Vec<String> = RuleKind::ALL
        .into_iter()
        .filter_map(|kind| document.rule(kind).map(|content| summarize(kind, content)))
        .collect();

    if sections.is_empty() {
        "No rules defined".to_string()
    } else {
        sections.join("\n\n")
    }
}

fn bullet(label: &str, value: &str) -> String {
    format!("• {label}: {value}")
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn scalar(content: &Value, field: &str, default: &str) -> String {
    match content.get(field) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => render(value),
    }
}

fn joined(content: &Value, field: &str, empty: &str) -> String {
    match content.get(field) {
        Some(Value::Array(items)) if !items.is_empty() => {
            items.iter().map(render).collect::<Vec<_>>().join(", ")
        }
        Some(Value::Array(_)) | None | Some(Value::Null) => empty.to_string(),
        Some(other) => render(other),
    }
}

fn count(content: &Value, field: &str) -> usize {
    content
        .get(field)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn range(content: &Value, min_field: &str, max_field: &str) -> String {
    format!(
        "{} to {}",
        scalar(content, min_field, "0"),
        scalar(content, max_field, "unlimited")
    )
}

fn pattern_size(content: &Value) -> String {
    content.get("patternSize").map_or_else(
        || "unspecified".to_string(),
        |size| {
            format!(
                "{}x{}",
                scalar(size, "width", "?"),
                scalar(size, "height", "?")
            )
        },
    )
}
