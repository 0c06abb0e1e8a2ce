//! Tests for per-kind content contracts

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tilerules::RuleKind;
    use tilerules::rules::content::{ConnectionType, GroupShape, RuleContent, SymmetryType};
    use tilerules::validation::contracts::check_content;
    use tilerules::validation::issues::ValidationError;

    // Tests non-object content is rejected before any field check
    // Verified by treating arrays as empty objects
    #[test]
    fn test_content_must_be_object() {
        let err = check_content(RuleKind::Border, &json!([true])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFieldType { kind: None, field: "border", .. }
        ));
    }

    // Tests connectivity requires a boolean flag and a known connection type
    // Verified by accepting any string as connectionType
    #[test]
    fn test_connectivity_contract() {
        let content = check_content(
            RuleKind::Connectivity,
            &json!({"mustBeConnected": false, "connectionType": "diagonal"}),
        )
        .expect("Valid connectivity content");
        match content {
            RuleContent::Connectivity(rule) => {
                assert!(!rule.must_be_connected);
                assert_eq!(rule.connection_type, Some(ConnectionType::Diagonal));
            }
            other => unreachable!("Expected connectivity content, got {other:?}"),
        }

        let missing = check_content(RuleKind::Connectivity, &json!({})).unwrap_err();
        assert_eq!(
            missing.to_string(),
            "Connectivity rule must specify 'mustBeConnected'"
        );

        let wrong_type =
            check_content(RuleKind::Connectivity, &json!({"mustBeConnected": "yes"})).unwrap_err();
        assert!(matches!(
            wrong_type,
            ValidationError::InvalidFieldType { field: "mustBeConnected", .. }
        ));

        let bad_keyword = check_content(
            RuleKind::Connectivity,
            &json!({"mustBeConnected": true, "connectionType": "radial"}),
        )
        .unwrap_err();
        assert!(bad_keyword.to_string().contains("orthogonal, diagonal, both"));
    }

    // Tests neighbours need either list and positions must be compass points
    // Verified by requiring both neighbour lists
    #[test]
    fn test_neighbors_contract() {
        assert!(
            check_content(RuleKind::Neighbors, &json!({"forbiddenNeighbors": ["lava"]})).is_ok()
        );

        let missing =
            check_content(RuleKind::Neighbors, &json!({"positions": ["north"]})).unwrap_err();
        assert_eq!(
            missing.to_string(),
            "Neighbors rule must specify either 'allowedNeighbors' or 'forbiddenNeighbors'"
        );

        let not_list =
            check_content(RuleKind::Neighbors, &json!({"allowedNeighbors": "grass"})).unwrap_err();
        assert!(matches!(
            not_list,
            ValidationError::InvalidFieldType { field: "allowedNeighbors", .. }
        ));

        let bad_position = check_content(
            RuleKind::Neighbors,
            &json!({"allowedNeighbors": [], "positions": ["up"]}),
        )
        .unwrap_err();
        assert!(matches!(
            bad_position,
            ValidationError::InvalidFieldRange { field: "positions", .. }
        ));
    }

    // Tests percentage bounds, range and ordering
    // Verified by comparing min and max as strings
    #[test]
    fn test_percentage_contract() {
        let inverted =
            check_content(RuleKind::Percentage, &json!({"min": 60, "max": 40})).unwrap_err();
        assert_eq!(
            inverted,
            ValidationError::InconsistentBounds {
                kind: RuleKind::Percentage,
                lower: "min",
                upper: "max",
            }
        );
        assert_eq!(
            inverted.to_string(),
            "percentage: 'min' cannot be greater than 'max'"
        );

        assert!(check_content(
            RuleKind::Percentage,
            &json!({"min": 40, "max": 60, "target": 50})
        )
        .is_ok());
        assert!(check_content(RuleKind::Percentage, &json!({"target": 12.5})).is_ok());

        let over = check_content(RuleKind::Percentage, &json!({"max": 101})).unwrap_err();
        assert!(matches!(over, ValidationError::InvalidFieldRange { field: "max", .. }));

        let missing = check_content(RuleKind::Percentage, &json!({"priority": 2})).unwrap_err();
        assert_eq!(
            missing.to_string(),
            "Percentage rule must specify at least one of: 'min', 'max', 'target'"
        );

        let text = check_content(RuleKind::Percentage, &json!({"min": "10"})).unwrap_err();
        assert!(matches!(text, ValidationError::InvalidFieldType { field: "min", .. }));
    }

    // Tests pattern size must carry both dimensions
    // Verified by accepting a patternSize without height
    #[test]
    fn test_pattern_contract() {
        assert!(check_content(
            RuleKind::Pattern,
            &json!({"requiredPatterns": [], "patternSize": {"width": 3, "height": 3}})
        )
        .is_ok());

        let half_size = check_content(
            RuleKind::Pattern,
            &json!({"forbiddenPatterns": [], "patternSize": {"width": 3}}),
        )
        .unwrap_err();
        assert!(matches!(
            half_size,
            ValidationError::InvalidFieldType { field: "patternSize", .. }
        ));

        assert!(check_content(
            RuleKind::Pattern,
            &json!({"patternSize": {"width": 1, "height": 1}})
        )
        .is_err());
    }

    // Tests symmetry type keywords and strictness range
    // Verified by widening strictness to 0..=100
    #[test]
    fn test_symmetry_contract() {
        let content = check_content(
            RuleKind::Symmetry,
            &json!({"type": "rotational", "strictness": 0.5}),
        )
        .expect("Valid symmetry content");
        match content {
            RuleContent::Symmetry(rule) => {
                assert_eq!(rule.symmetry_type, SymmetryType::Rotational);
                assert_eq!(rule.strictness, Some(0.5));
            }
            other => unreachable!("Expected symmetry content, got {other:?}"),
        }

        assert!(check_content(RuleKind::Symmetry, &json!({"type": "spiral"})).is_err());
        assert!(
            check_content(RuleKind::Symmetry, &json!({"type": "both", "strictness": 1.5})).is_err()
        );
        assert!(check_content(RuleKind::Symmetry, &json!({"strictness": 1})).is_err());
    }

    // Tests frequency accepts null caps and requires spacing.min
    // Verified by rejecting null maxOccurrences
    #[test]
    fn test_frequency_contract() {
        assert!(check_content(
            RuleKind::Frequency,
            &json!({"minOccurrences": 2, "maxOccurrences": null, "spacing": {"min": 1}})
        )
        .is_ok());

        let negative =
            check_content(RuleKind::Frequency, &json!({"minOccurrences": -1})).unwrap_err();
        assert!(matches!(
            negative,
            ValidationError::InvalidFieldRange { field: "minOccurrences", .. }
        ));

        let no_min = check_content(
            RuleKind::Frequency,
            &json!({"maxOccurrences": 4, "spacing": {"max": 2}}),
        )
        .unwrap_err();
        assert!(matches!(no_min, ValidationError::InvalidFieldType { field: "spacing", .. }));
    }

    // Tests grouping size bounds
    // Verified by allowing a zero minGroupSize
    #[test]
    fn test_grouping_contract() {
        let inverted = check_content(
            RuleKind::Grouping,
            &json!({"minGroupSize": 3, "maxGroupSize": 2}),
        )
        .unwrap_err();
        assert_eq!(
            inverted,
            ValidationError::InconsistentBounds {
                kind: RuleKind::Grouping,
                lower: "minGroupSize",
                upper: "maxGroupSize",
            }
        );

        let content = check_content(
            RuleKind::Grouping,
            &json!({"minGroupSize": 3, "maxGroupSize": 5, "groupShape": "rectangular"}),
        )
        .expect("Valid grouping content");
        match content {
            RuleContent::Grouping(rule) => {
                assert_eq!(rule.min_group_size, 3);
                assert_eq!(rule.max_group_size, Some(5));
                assert_eq!(rule.group_shape, Some(GroupShape::Rectangular));
            }
            other => unreachable!("Expected grouping content, got {other:?}"),
        }

        let zero = check_content(RuleKind::Grouping, &json!({"minGroupSize": 0})).unwrap_err();
        assert!(matches!(zero, ValidationError::InvalidFieldRange { field: "minGroupSize", .. }));

        let fractional =
            check_content(RuleKind::Grouping, &json!({"minGroupSize": 1.5})).unwrap_err();
        assert!(matches!(
            fractional,
            ValidationError::InvalidFieldType { field: "minGroupSize", .. }
        ));
    }

    // Tests spacing bounds and the relativeTo list
    // Verified by skipping the maxSpacing ordering check
    #[test]
    fn test_spacing_contract() {
        assert!(check_content(
            RuleKind::Spacing,
            &json!({"minSpacing": 0, "maxSpacing": null, "relativeTo": ["water"]})
        )
        .is_ok());
        assert!(
            check_content(RuleKind::Spacing, &json!({"minSpacing": 4, "maxSpacing": 1})).is_err()
        );
        assert!(check_content(
            RuleKind::Spacing,
            &json!({"minSpacing": 1, "relativeTo": "water"})
        )
        .is_err());
        assert!(check_content(RuleKind::Spacing, &json!({"maxSpacing": 3})).is_err());
    }

    // Tests border sides and width
    // Verified by accepting a zero borderWidth
    #[test]
    fn test_border_contract() {
        assert!(check_content(
            RuleKind::Border,
            &json!({"mustBeBorder": true, "borderSides": ["top", "left"], "borderWidth": 2})
        )
        .is_ok());
        assert!(check_content(
            RuleKind::Border,
            &json!({"mustBeBorder": true, "borderWidth": 0})
        )
        .is_err());
        assert!(check_content(
            RuleKind::Border,
            &json!({"mustBeBorder": true, "borderSides": ["center"]})
        )
        .is_err());
        assert!(check_content(RuleKind::Border, &json!({"borderWidth": 1})).is_err());
    }
}
