//! Strongly-typed rule content, one record per rule kind
//!
//! Documents carry raw JSON because callers hand in whatever a user typed.
//! The contracts in [`crate::validation::contracts`] turn that JSON into the
//! records below; the catalog builds its canonical templates from them.

use crate::rules::kind::RuleKind;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Declares a closed keyword set that serializes as lowercase strings
macro_rules! keyword_set {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Accepted spellings in declaration order
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            /// Keyword as written in documents
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// Parse a keyword, `None` when it is not part of the set
            pub fn parse(text: &str) -> Option<Self> {
                match text {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keyword_set! {
    /// Adjacency used when deciding whether two tiles touch
    ConnectionType {
        /// Edge-sharing neighbours only
        Orthogonal => "orthogonal",
        /// Corner-sharing neighbours only
        Diagonal => "diagonal",
        /// Edge- and corner-sharing neighbours
        Both => "both",
    }
}

keyword_set! {
    /// Compass position relative to a tile
    Direction {
        /// Above
        North => "north",
        /// Below
        South => "south",
        /// Right
        East => "east",
        /// Left
        West => "west",
        /// Above right
        Northeast => "northeast",
        /// Above left
        Northwest => "northwest",
        /// Below right
        Southeast => "southeast",
        /// Below left
        Southwest => "southwest",
    }
}

keyword_set! {
    /// Symmetry a generated region must respect
    SymmetryType {
        /// Mirrored across the vertical axis
        Horizontal => "horizontal",
        /// Mirrored across the horizontal axis
        Vertical => "vertical",
        /// Mirrored across both axes
        Both => "both",
        /// Invariant under rotation
        Rotational => "rotational",
    }
}

keyword_set! {
    /// Shape connected groups are expected to take
    GroupShape {
        /// No shape constraint
        Any => "any",
        /// Axis-aligned rectangles
        Rectangular => "rectangular",
        /// Roughly round blobs
        Circular => "circular",
        /// Single-tile-wide lines
        Linear => "linear",
    }
}

keyword_set! {
    /// Edge of the map
    BorderSide {
        /// First row
        Top => "top",
        /// Last row
        Bottom => "bottom",
        /// First column
        Left => "left",
        /// Last column
        Right => "right",
    }
}

/// `connectivity` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityRule {
    /// Tiles must form connected regions
    pub must_be_connected: bool,
    /// Adjacency used for connectivity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
}

/// `neighbors` content
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborsRule {
    /// Categories allowed next to this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_neighbors: Option<Vec<Value>>,
    /// Categories that must never be adjacent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_neighbors: Option<Vec<Value>>,
    /// Positions the neighbour lists apply to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Direction>>,
}

/// `percentage` content, all values in percent of the map
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageRule {
    /// Lower coverage bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    /// Upper coverage bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Preferred coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Number>,
    /// Weight against other percentage rules, not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
}

/// Width and height of a pattern window, only presence is enforced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternSize {
    /// Window width
    pub width: Value,
    /// Window height
    pub height: Value,
}

/// `pattern` content
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRule {
    /// Patterns that must appear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_patterns: Option<Vec<Value>>,
    /// Patterns that must not appear
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_patterns: Option<Vec<Value>>,
    /// Window the patterns are matched in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_size: Option<PatternSize>,
}

/// `symmetry` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetryRule {
    /// Required symmetry
    #[serde(rename = "type")]
    pub symmetry_type: SymmetryType,
    /// How strictly symmetry is enforced, 0 to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictness: Option<f64>,
}

/// Spacing block nested in `frequency` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencySpacing {
    /// Minimum distance between occurrences
    pub min: Value,
    /// Maximum distance between occurrences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
}

/// `frequency` content; `None` counts mean unbounded and serialize as `null`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyRule {
    /// Minimum number of occurrences
    #[serde(default)]
    pub min_occurrences: Option<u64>,
    /// Maximum number of occurrences
    #[serde(default)]
    pub max_occurrences: Option<u64>,
    /// Distance between occurrences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<FrequencySpacing>,
}

/// `grouping` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRule {
    /// Smallest allowed group, at least 1
    pub min_group_size: u64,
    /// Largest allowed group, `null` when unbounded
    #[serde(default)]
    pub max_group_size: Option<u64>,
    /// Expected group shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_shape: Option<GroupShape>,
}

/// `spacing` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingRule {
    /// Minimum distance between tiles
    pub min_spacing: u64,
    /// Maximum distance between tiles, `null` when unbounded
    #[serde(default)]
    pub max_spacing: Option<u64>,
    /// Categories the spacing is measured against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_to: Option<Vec<Value>>,
}

/// `border` content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRule {
    /// Tiles may only be placed on the border
    pub must_be_border: bool,
    /// Sides that count as border
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_sides: Option<Vec<BorderSide>>,
    /// Border thickness in tiles, at least 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u64>,
}

/// Validated content of one rule, tagged by kind
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleContent {
    /// See [`ConnectivityRule`]
    Connectivity(ConnectivityRule),
    /// See [`NeighborsRule`]
    Neighbors(NeighborsRule),
    /// See [`PercentageRule`]
    Percentage(PercentageRule),
    /// See [`PatternRule`]
    Pattern(PatternRule),
    /// See [`SymmetryRule`]
    Symmetry(SymmetryRule),
    /// See [`FrequencyRule`]
    Frequency(FrequencyRule),
    /// See [`GroupingRule`]
    Grouping(GroupingRule),
    /// See [`SpacingRule`]
    Spacing(SpacingRule),
    /// See [`BorderRule`]
    Border(BorderRule),
}

impl RuleContent {
    /// Kind this content belongs to
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Connectivity(_) => RuleKind::Connectivity,
            Self::Neighbors(_) => RuleKind::Neighbors,
            Self::Percentage(_) => RuleKind::Percentage,
            Self::Pattern(_) => RuleKind::Pattern,
            Self::Symmetry(_) => RuleKind::Symmetry,
            Self::Frequency(_) => RuleKind::Frequency,
            Self::Grouping(_) => RuleKind::Grouping,
            Self::Spacing(_) => RuleKind::Spacing,
            Self::Border(_) => RuleKind::Border,
        }
    }

    /// Canonical default content for a kind
    pub fn canonical(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Connectivity => Self::Connectivity(ConnectivityRule {
                must_be_connected: true,
                connection_type: Some(ConnectionType::Orthogonal),
            }),
            RuleKind::Neighbors => Self::Neighbors(NeighborsRule {
                allowed_neighbors: Some(Vec::new()),
                forbidden_neighbors: Some(Vec::new()),
                positions: Some(vec![
                    Direction::North,
                    Direction::South,
                    Direction::East,
                    Direction::West,
                ]),
            }),
            RuleKind::Percentage => Self::Percentage(PercentageRule {
                min: Some(Number::from(0)),
                max: Some(Number::from(100)),
                target: Some(Number::from(50)),
                priority: Some(Value::from(1)),
            }),
            RuleKind::Pattern => Self::Pattern(PatternRule {
                required_patterns: Some(Vec::new()),
                forbidden_patterns: Some(Vec::new()),
                pattern_size: Some(PatternSize {
                    width: Value::from(2),
                    height: Value::from(2),
                }),
            }),
            RuleKind::Symmetry => Self::Symmetry(SymmetryRule {
                symmetry_type: SymmetryType::Horizontal,
                strictness: Some(1.0),
            }),
            RuleKind::Frequency => Self::Frequency(FrequencyRule {
                min_occurrences: Some(0),
                max_occurrences: None,
                spacing: Some(FrequencySpacing {
                    min: Value::from(1),
                    max: Some(Value::Null),
                }),
            }),
            RuleKind::Grouping => Self::Grouping(GroupingRule {
                min_group_size: 1,
                max_group_size: None,
                group_shape: Some(GroupShape::Any),
            }),
            RuleKind::Spacing => Self::Spacing(SpacingRule {
                min_spacing: 0,
                max_spacing: None,
                relative_to: Some(Vec::new()),
            }),
            RuleKind::Border => Self::Border(BorderRule {
                must_be_border: false,
                border_sides: Some(vec![
                    BorderSide::Top,
                    BorderSide::Bottom,
                    BorderSide::Left,
                    BorderSide::Right,
                ]),
                border_width: Some(1),
            }),
        }
    }

    /// JSON form of the content as stored in a document
    ///
    /// The records only hold string keys and finite numbers, so serialization
    /// cannot fail in practice; a failure yields `null`, which no contract
    /// accepts.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
