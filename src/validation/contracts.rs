//! Per-kind content contracts
//!
//! Each contract checks field presence, JSON type and value range for one
//! rule kind and, on success, returns the typed record. Checking stops at the
//! first problem within a kind.

use crate::rules::content::{
    BorderRule, BorderSide, ConnectionType, ConnectivityRule, Direction, FrequencyRule,
    FrequencySpacing, GroupShape, GroupingRule, NeighborsRule, PatternRule, PatternSize,
    PercentageRule, RuleContent, SpacingRule, SymmetryRule, SymmetryType,
};
use crate::rules::kind::RuleKind;
use crate::validation::issues::ValidationError;
use serde_json::{Map, Number, Value};

/// Outcome of a single contract check
pub type Check<T> = std::result::Result<T, ValidationError>;

/// Validate raw content against the contract of `kind`
///
/// # Errors
///
/// Returns the first contract violation found in the content
pub fn check_content(kind: RuleKind, content: &Value) -> Check<RuleContent> {
    let Some(map) = content.as_object() else {
        return Err(ValidationError::InvalidFieldType {
            kind: None,
            field: kind.as_str(),
            expected: "an object",
        });
    };
    let fields = Fields { kind, map };

    match kind {
        RuleKind::Connectivity => connectivity(&fields).map(RuleContent::Connectivity),
        RuleKind::Neighbors => neighbors(&fields).map(RuleContent::Neighbors),
        RuleKind::Percentage => percentage(&fields).map(RuleContent::Percentage),
        RuleKind::Pattern => pattern(&fields).map(RuleContent::Pattern),
        RuleKind::Symmetry => symmetry(&fields).map(RuleContent::Symmetry),
        RuleKind::Frequency => frequency(&fields).map(RuleContent::Frequency),
        RuleKind::Grouping => grouping(&fields).map(RuleContent::Grouping),
        RuleKind::Spacing => spacing(&fields).map(RuleContent::Spacing),
        RuleKind::Border => border(&fields).map(RuleContent::Border),
    }
}

fn connectivity(fields: &Fields<'_>) -> Check<ConnectivityRule> {
    let must_be_connected =
        fields.boolean("mustBeConnected", fields.required(&["mustBeConnected"])?)?;
    let connection_type = fields.keyword(
        "connectionType",
        ConnectionType::NAMES,
        ConnectionType::parse,
    )?;

    Ok(ConnectivityRule {
        must_be_connected,
        connection_type,
    })
}

fn neighbors(fields: &Fields<'_>) -> Check<NeighborsRule> {
    fields.required(&["allowedNeighbors", "forbiddenNeighbors"])?;
    let allowed_neighbors = fields.list("allowedNeighbors")?.cloned();
    let forbidden_neighbors = fields.list("forbiddenNeighbors")?.cloned();
    let positions = fields.keyword_list("positions", Direction::NAMES, Direction::parse)?;

    Ok(NeighborsRule {
        allowed_neighbors,
        forbidden_neighbors,
        positions,
    })
}

fn percentage(fields: &Fields<'_>) -> Check<PercentageRule> {
    fields.required(&["min", "max", "target"])?;
    let min = fields.number_within("min", 0.0, 100.0)?;
    let max = fields.number_within("max", 0.0, 100.0)?;
    let target = fields.number_within("target", 0.0, 100.0)?;

    if let (Some(low), Some(high)) = (&min, &max)
        && as_float(low) > as_float(high)
    {
        return Err(fields.inconsistent("min", "max"));
    }

    Ok(PercentageRule {
        min,
        max,
        target,
        priority: fields.get("priority").cloned(),
    })
}

fn pattern(fields: &Fields<'_>) -> Check<PatternRule> {
    fields.required(&["requiredPatterns", "forbiddenPatterns"])?;

    let pattern_size = match fields.object("patternSize")? {
        Some(size) => match (size.get("width"), size.get("height")) {
            (Some(width), Some(height)) => Some(PatternSize {
                width: width.clone(),
                height: height.clone(),
            }),
            _ => {
                return Err(fields.wrong_type(
                    "patternSize",
                    "an object with 'width' and 'height'",
                ));
            }
        },
        None => None,
    };

    let required_patterns = fields.list("requiredPatterns")?.cloned();
    let forbidden_patterns = fields.list("forbiddenPatterns")?.cloned();

    Ok(PatternRule {
        required_patterns,
        forbidden_patterns,
        pattern_size,
    })
}

fn symmetry(fields: &Fields<'_>) -> Check<SymmetryRule> {
    let symmetry_type = fields.keyword_value(
        "type",
        fields.required(&["type"])?,
        SymmetryType::NAMES,
        SymmetryType::parse,
    )?;
    let strictness = fields
        .number_within("strictness", 0.0, 1.0)?
        .map(|value| as_float(&value));

    Ok(SymmetryRule {
        symmetry_type,
        strictness,
    })
}

fn frequency(fields: &Fields<'_>) -> Check<FrequencyRule> {
    fields.required(&["minOccurrences", "maxOccurrences"])?;
    let min_occurrences = fields.nullable_count("minOccurrences", 0)?;
    let max_occurrences = fields.nullable_count("maxOccurrences", 0)?;

    let spacing = match fields.object("spacing")? {
        Some(block) => match block.get("min") {
            Some(min) => Some(FrequencySpacing {
                min: min.clone(),
                max: block.get("max").cloned(),
            }),
            None => return Err(fields.wrong_type("spacing", "an object with 'min'")),
        },
        None => None,
    };

    Ok(FrequencyRule {
        min_occurrences,
        max_occurrences,
        spacing,
    })
}

fn grouping(fields: &Fields<'_>) -> Check<GroupingRule> {
    let min_group_size = fields.count("minGroupSize", fields.required(&["minGroupSize"])?, 1)?;
    let max_group_size = fields.nullable_upper("maxGroupSize", "minGroupSize", min_group_size)?;
    let group_shape = fields.keyword("groupShape", GroupShape::NAMES, GroupShape::parse)?;

    Ok(GroupingRule {
        min_group_size,
        max_group_size,
        group_shape,
    })
}

fn spacing(fields: &Fields<'_>) -> Check<SpacingRule> {
    let min_spacing = fields.count("minSpacing", fields.required(&["minSpacing"])?, 0)?;
    let max_spacing = fields.nullable_upper("maxSpacing", "minSpacing", min_spacing)?;
    let relative_to = fields.list("relativeTo")?.cloned();

    Ok(SpacingRule {
        min_spacing,
        max_spacing,
        relative_to,
    })
}

fn border(fields: &Fields<'_>) -> Check<BorderRule> {
    let must_be_border = fields.boolean("mustBeBorder", fields.required(&["mustBeBorder"])?)?;
    let border_sides = fields.keyword_list("borderSides", BorderSide::NAMES, BorderSide::parse)?;
    let border_width = match fields.get("borderWidth") {
        Some(value) => Some(fields.count("borderWidth", value, 1)?),
        None => None,
    };

    Ok(BorderRule {
        must_be_border,
        border_sides,
        border_width,
    })
}

/// Content object of one rule kind with typed accessors
struct Fields<'a> {
    kind: RuleKind,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field)
    }

    /// First present value among `fields`, any one of which is required
    fn required(&self, fields: &'static [&'static str]) -> Check<&'a Value> {
        fields
            .iter()
            .find_map(|field| self.map.get(*field))
            .ok_or_else(|| self.missing(fields))
    }

    fn boolean(&self, field: &'static str, value: &Value) -> Check<bool> {
        value
            .as_bool()
            .ok_or_else(|| self.wrong_type(field, "a boolean"))
    }

    fn list(&self, field: &'static str) -> Check<Option<&'a Vec<Value>>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_array()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "a list")),
        }
    }

    fn object(&self, field: &'static str) -> Check<Option<&'a Map<String, Value>>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_object()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "an object")),
        }
    }

    fn keyword<T>(
        &self,
        field: &'static str,
        names: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> Check<Option<T>> {
        self.get(field)
            .map(|value| self.keyword_value(field, value, names, parse))
            .transpose()
    }

    fn keyword_value<T>(
        &self,
        field: &'static str,
        value: &Value,
        names: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> Check<T> {
        value
            .as_str()
            .and_then(parse)
            .ok_or_else(|| self.not_one_of(field, value, names))
    }

    fn keyword_list<T>(
        &self,
        field: &'static str,
        names: &[&str],
        parse: fn(&str) -> Option<T>,
    ) -> Check<Option<Vec<T>>> {
        let Some(entries) = self.list(field)? else {
            return Ok(None);
        };

        entries
            .iter()
            .map(|entry| self.keyword_value(field, entry, names, parse))
            .collect::<Check<Vec<T>>>()
            .map(Some)
    }

    fn number_within(&self, field: &'static str, low: f64, high: f64) -> Check<Option<Number>> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };
        let Value::Number(number) = value else {
            return Err(self.wrong_type(field, "a number"));
        };

        let numeric = as_float(number);
        if (low..=high).contains(&numeric) {
            Ok(Some(number.clone()))
        } else {
            let detail = format!("must be between {low} and {high}, got {number}");
            Err(self.out_of_range(field, detail))
        }
    }

    /// Integer with a lower bound
    fn count(&self, field: &'static str, value: &Value, minimum: u64) -> Check<u64> {
        let expected = if minimum == 0 {
            "a non-negative integer"
        } else {
            "a positive integer"
        };
        let integer = as_integer(value).ok_or_else(|| self.wrong_type(field, expected))?;

        let detail = format!("must be at least {minimum}, got {integer}");
        u64::try_from(integer)
            .ok()
            .filter(|count| *count >= minimum)
            .ok_or_else(|| self.out_of_range(field, detail))
    }

    /// Optional integer-or-null with a lower bound
    fn nullable_count(&self, field: &'static str, minimum: u64) -> Check<Option<u64>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let integer =
                    as_integer(value).ok_or_else(|| self.wrong_type(field, "an integer or null"))?;
                let detail = format!("must be non-negative, got {integer}");
                u64::try_from(integer)
                    .ok()
                    .filter(|count| *count >= minimum)
                    .map(Some)
                    .ok_or_else(|| self.out_of_range(field, detail))
            }
        }
    }

    /// Optional integer-or-null upper bound that must not undercut `lower`
    fn nullable_upper(
        &self,
        field: &'static str,
        lower_field: &'static str,
        lower: u64,
    ) -> Check<Option<u64>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => {
                let integer =
                    as_integer(value).ok_or_else(|| self.wrong_type(field, "an integer or null"))?;
                u64::try_from(integer)
                    .ok()
                    .filter(|upper| *upper >= lower)
                    .map(Some)
                    .ok_or_else(|| self.inconsistent(lower_field, field))
            }
        }
    }

    const fn missing(&self, fields: &'static [&'static str]) -> ValidationError {
        ValidationError::MissingRequiredField {
            kind: Some(self.kind),
            fields,
        }
    }

    const fn wrong_type(&self, field: &'static str, expected: &'static str) -> ValidationError {
        ValidationError::InvalidFieldType {
            kind: Some(self.kind),
            field,
            expected,
        }
    }

    const fn out_of_range(&self, field: &'static str, detail: String) -> ValidationError {
        ValidationError::InvalidFieldRange {
            kind: self.kind,
            field,
            detail,
        }
    }

    const fn inconsistent(&self, lower: &'static str, upper: &'static str) -> ValidationError {
        ValidationError::InconsistentBounds {
            kind: self.kind,
            lower,
            upper,
        }
    }

    fn not_one_of(&self, field: &'static str, found: &Value, names: &[&str]) -> ValidationError {
        self.out_of_range(
            field,
            format!("has invalid value {found}, must be one of: {}", names.join(", ")),
        )
    }
}

fn as_float(number: &Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}
