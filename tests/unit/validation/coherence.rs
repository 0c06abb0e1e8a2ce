//! Tests for cross-kind coherence heuristics

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tilerules::RuleKind;
    use tilerules::rules::document::RuleSet;
    use tilerules::validation::coherence::check_coherence;
    use tilerules::validation::issues::CoherenceWarning;

    fn rules(value: Value) -> RuleSet {
        match value {
            Value::Object(map) => map,
            other => unreachable!("Test rules must be an object, got {other}"),
        }
    }

    // Tests connected tiles without neighbours are flagged even with no neighbours kind
    // Verified by requiring the neighbors kind to be present
    #[test]
    fn test_connected_without_allowed_neighbors() {
        let lonely = rules(json!({"connectivity": {"mustBeConnected": true}}));
        assert_eq!(
            check_coherence(&lonely),
            vec![CoherenceWarning::ConnectedWithoutAllowedNeighbors]
        );

        let empty_list = rules(json!({
            "connectivity": {"mustBeConnected": true},
            "neighbors": {"allowedNeighbors": []}
        }));
        assert_eq!(check_coherence(&empty_list).len(), 1);

        let satisfied = rules(json!({
            "connectivity": {"mustBeConnected": true},
            "neighbors": {"allowedNeighbors": ["grass"]}
        }));
        assert!(check_coherence(&satisfied).is_empty());

        let loose = rules(json!({"connectivity": {"mustBeConnected": false}}));
        assert!(check_coherence(&loose).is_empty());
    }

    // Tests target and occurrence cap are flagged by presence alone
    // Verified by ignoring null maxOccurrences
    #[test]
    fn test_percentage_versus_frequency() {
        let both = rules(json!({
            "percentage": {"target": 30},
            "frequency": {"maxOccurrences": null}
        }));
        assert_eq!(
            check_coherence(&both),
            vec![CoherenceWarning::PercentageVersusFrequency]
        );

        let no_target = rules(json!({
            "percentage": {"min": 10},
            "frequency": {"maxOccurrences": 5}
        }));
        assert!(check_coherence(&no_target).is_empty());
    }

    // Tests grouping conflicts only with positive spacing and groups over one tile
    // Verified by using >= instead of > for the group size
    #[test]
    fn test_grouping_versus_spacing() {
        let conflict = rules(json!({
            "grouping": {"minGroupSize": 2},
            "spacing": {"minSpacing": 1}
        }));
        assert_eq!(
            check_coherence(&conflict),
            vec![CoherenceWarning::GroupingVersusSpacing]
        );

        let singles = rules(json!({
            "grouping": {"minGroupSize": 1},
            "spacing": {"minSpacing": 3}
        }));
        assert!(check_coherence(&singles).is_empty());

        let touching = rules(json!({
            "grouping": {"minGroupSize": 4},
            "spacing": {"minSpacing": 0}
        }));
        assert!(check_coherence(&touching).is_empty());
    }

    // Tests border-only tiles combined with patterns
    // Verified by dropping the mustBeBorder condition
    #[test]
    fn test_border_with_pattern() {
        let flagged = rules(json!({
            "border": {"mustBeBorder": true},
            "pattern": {"requiredPatterns": []}
        }));
        assert_eq!(
            check_coherence(&flagged),
            vec![CoherenceWarning::BorderWithPattern]
        );

        let anywhere = rules(json!({
            "border": {"mustBeBorder": false},
            "pattern": {"requiredPatterns": []}
        }));
        assert!(check_coherence(&anywhere).is_empty());
    }

    // Tests symmetry warns once per affected kind in fixed order
    // Verified by iterating the document keys instead of the fixed list
    #[test]
    fn test_symmetry_affects() {
        let set = rules(json!({
            "spacing": {"minSpacing": 0},
            "symmetry": {"type": "both"},
            "pattern": {"forbiddenPatterns": []}
        }));
        assert_eq!(
            check_coherence(&set),
            vec![
                CoherenceWarning::SymmetryAffects(RuleKind::Pattern),
                CoherenceWarning::SymmetryAffects(RuleKind::Spacing),
            ]
        );
        assert_eq!(
            CoherenceWarning::SymmetryAffects(RuleKind::Spacing).to_string(),
            "Symmetry rule might affect spacing rule behavior"
        );
    }

    // Tests heuristics read malformed content without failing
    // Verified by indexing content as an object unconditionally
    #[test]
    fn test_malformed_content_is_tolerated() {
        let set = rules(json!({
            "connectivity": "yes",
            "grouping": {"minGroupSize": "many"},
            "spacing": [1]
        }));
        assert!(check_coherence(&set).is_empty());
    }
}
