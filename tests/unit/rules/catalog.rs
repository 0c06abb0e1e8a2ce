//! Tests for the rule kind catalog and blank document generation

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tilerules::{RuleKind, RuleTypeCatalog, RulesError};

    // Tests every kind is registered exactly once in declaration order
    // Verified by registering Border twice
    #[test]
    fn test_list_rule_kinds() {
        let catalog = RuleTypeCatalog::new();
        let kinds: Vec<RuleKind> = catalog.list_rule_kinds().collect();
        assert_eq!(kinds, RuleKind::ALL.to_vec());
        assert_eq!(catalog.definitions().len(), 9);
    }

    // Tests each returned template is an independent copy
    // Verified by handing out a shared value
    #[test]
    fn test_template_for_returns_fresh_copy() {
        let catalog = RuleTypeCatalog::new();
        let mut first = catalog.template_for(RuleKind::Percentage);
        first["min"] = json!(99);

        let second = catalog.template_for(RuleKind::Percentage);
        assert_eq!(second["min"], json!(0));
    }

    // Tests lookup by document key and rejection of unknown keys
    // Verified by returning an empty object for unknown names
    #[test]
    fn test_template_for_name() {
        let catalog = RuleTypeCatalog::new();
        let grouping = catalog.template_for_name("grouping").unwrap();
        assert_eq!(grouping["minGroupSize"], json!(1));
        assert_eq!(grouping["groupShape"], json!("any"));

        let err = catalog.template_for_name("teleport").unwrap_err();
        assert!(matches!(err, RulesError::UnknownRuleKind { kind } if kind == "teleport"));
    }

    // Tests descriptions are present for every kind
    // Verified by leaving the border description empty
    #[test]
    fn test_descriptions() {
        let catalog = RuleTypeCatalog::new();
        for kind in RuleKind::ALL {
            assert!(catalog.description(kind).starts_with("Define"));
        }
        assert_eq!(
            catalog.description(RuleKind::Border),
            "Define border-specific rules"
        );
    }

    // Tests the blank document carries marker, category and all templates
    // Verified by omitting the symmetry template from generation
    #[test]
    fn test_generate_blank_document() {
        let catalog = RuleTypeCatalog::new();
        let document = catalog.generate_blank_document("water");

        assert_eq!(document.document_type.as_deref(), Some("rule"));
        assert_eq!(document.category.as_deref(), Some("water"));
        assert!(document.is_well_formed());

        let rules = document.rules.as_ref().expect("Blank document has rules");
        assert_eq!(rules.len(), 9);
        for kind in RuleKind::ALL {
            assert_eq!(rules.get(kind.as_str()), Some(&catalog.template_for(kind)));
        }
    }

    // Tests the blank document keeps catalog order in its JSON text
    // Verified by disabling preserve_order on serde_json
    #[test]
    fn test_blank_document_key_order() {
        let document = RuleTypeCatalog::new().generate_blank_document("sand");
        let keys: Vec<&str> = document
            .rules
            .as_ref()
            .expect("Blank document has rules")
            .keys()
            .map(String::as_str)
            .collect();
        let expected: Vec<&str> = RuleKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(keys, expected);
    }

    // Tests every canonical template satisfies its own contract
    // Verified by setting the percentage default target to 150
    #[test]
    fn test_verify_templates() {
        assert_eq!(RuleTypeCatalog::new().verify(), Ok(()));
    }
}
