//! Storage layout constants and runtime defaults

/// Marker every rule document carries in its `type` field
pub const DOCUMENT_TYPE: &str = "rule";

// On-disk layout
/// Directory templates are stored in when none is given
pub const DEFAULT_TEMPLATES_DIR: &str = "rule_templates";
/// Directory category rule files are stored in when none is given
pub const DEFAULT_RULES_DIR: &str = "rules";
/// Extension of every stored document
pub const DOCUMENT_EXTENSION: &str = "json";
/// Stem inserted between category and counter in rule file names
pub const RULE_FILE_STEM: &str = "rule";

// Prevents the free-name search from scanning forever in a crowded directory
/// Highest counter tried when naming a new rule file
pub const MAX_RULE_FILE_INDEX: usize = 10_000;

// Progress bar display settings
/// Threshold for switching to a single batch progress bar
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";
