//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Notes".into()
    }

    pub fn url() -> String {
        "example.com".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }

    pub fn description() -> String {
        "Digital notes and knowledge base".into()
    }
}

// ============================================================================
// [index] Section Defaults
// ============================================================================

pub mod index {
    pub fn max_entries() -> usize {
        1000
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }
}
