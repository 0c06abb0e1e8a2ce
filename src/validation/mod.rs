/// Cross-kind coherence heuristics
pub mod coherence;
/// Per-kind content contracts
pub mod contracts;
/// Validation errors and coherence warnings
pub mod issues;
/// Document validator and report
pub mod validator;
