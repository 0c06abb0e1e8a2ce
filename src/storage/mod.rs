/// Shared file helpers: names, listing, atomic writes
pub mod persist;
/// Per-category rule files
pub mod rule_files;
/// Named rule templates
pub mod templates;
