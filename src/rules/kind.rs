//! The closed set of placement rule kinds

use crate::io::error::{RulesError, unknown_rule_kind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Constraint category a placement rule belongs to
///
/// Declaration order is the canonical order used by the catalog, blank
/// documents and summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Whether tiles of the category must form connected regions
    Connectivity,
    /// Which categories may or may not sit next to the category
    Neighbors,
    /// Share of the map the category should cover
    Percentage,
    /// Tile patterns that must or must not appear
    Pattern,
    /// Mirror or rotational symmetry requirements
    Symmetry,
    /// Occurrence counts of the category
    Frequency,
    /// Size and shape of connected groups
    Grouping,
    /// Distance kept between tiles
    Spacing,
    /// Placement along the map border
    Border,
}

impl RuleKind {
    /// Every kind in declaration order
    pub const ALL: [Self; 9] = [
        Self::Connectivity,
        Self::Neighbors,
        Self::Percentage,
        Self::Pattern,
        Self::Symmetry,
        Self::Frequency,
        Self::Grouping,
        Self::Spacing,
        Self::Border,
    ];

    /// Key used for this kind inside a document's `rules` object
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connectivity => "connectivity",
            Self::Neighbors => "neighbors",
            Self::Percentage => "percentage",
            Self::Pattern => "pattern",
            Self::Symmetry => "symmetry",
            Self::Frequency => "frequency",
            Self::Grouping => "grouping",
            Self::Spacing => "spacing",
            Self::Border => "border",
        }
    }

    /// Capitalized name used in diagnostics ("Connectivity rule must ...")
    pub const fn title(self) -> &'static str {
        match self {
            Self::Connectivity => "Connectivity",
            Self::Neighbors => "Neighbors",
            Self::Percentage => "Percentage",
            Self::Pattern => "Pattern",
            Self::Symmetry => "Symmetry",
            Self::Frequency => "Frequency",
            Self::Grouping => "Grouping",
            Self::Spacing => "Spacing",
            Self::Border => "Border",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| unknown_rule_kind(&s))
    }
}
