//! Tests for error display, sources and constructors

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tilerules::RulesError;
    use tilerules::io::error::{StorageContext, invalid_name, template_not_found, unknown_rule_kind};
    use tilerules::validation::issues::ValidationError;

    // Tests constructor helpers fill in their variants
    // Verified by swapping the template and kind constructors
    #[test]
    fn test_constructors() {
        assert_eq!(
            unknown_rule_kind(&"warp").to_string(),
            "Unknown rule type: warp"
        );
        assert_eq!(
            template_not_found(&"meadow").to_string(),
            "Template 'meadow' not found"
        );
        assert_eq!(
            invalid_name(&"a/b", "name contains a path separator").to_string(),
            "Invalid name 'a/b': name contains a path separator"
        );
    }

    // Tests storage context keeps the path, operation and source
    // Verified by discarding the I/O error in storage_context
    #[test]
    fn test_storage_context() {
        let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = failed
            .storage_context("rules/grass.json", "read")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Storage error during read on 'rules/grass.json': gone"
        );
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            RulesError::Storage { ref path, operation: "read", .. }
                if *path == PathBuf::from("rules/grass.json")
        ));
    }

    // Tests plain I/O errors convert without context
    // Verified by mapping them to TemplateNotFound
    #[test]
    fn test_from_io_error() {
        let err = RulesError::from(io::Error::other("disk"));
        assert!(matches!(err, RulesError::Storage { operation: "unknown", .. }));
    }

    // Tests invalid document errors list every validation error
    // Verified by printing only the first error
    #[test]
    fn test_invalid_document_display() {
        let err = RulesError::InvalidDocument {
            errors: vec![
                ValidationError::MissingRequiredField {
                    kind: None,
                    fields: &["type"],
                },
                ValidationError::UnknownRuleKind {
                    kind: "gravity".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            concat!(
                "Rule document is invalid\n",
                "  - Missing required field: type\n",
                "  - Unknown rule type: gravity"
            )
        );
        assert!(err.source().is_none());
    }

    // Tests batch failure counts appear in the message
    // Verified by swapping invalid and total
    #[test]
    fn test_validation_failed_display() {
        let err = RulesError::ValidationFailed {
            invalid: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 rule documents failed validation");
    }

    // Tests parse errors expose the JSON error as their source
    // Verified by returning None from source for Parse
    #[test]
    fn test_parse_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RulesError::Parse {
            path: PathBuf::from("broken.json"),
            source,
        };
        assert!(err.to_string().starts_with("Failed to parse 'broken.json': "));
        assert!(err.source().is_some());
    }
}
