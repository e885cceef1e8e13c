//! Errors raised while producing a single artifact.

use thiserror::Error;

/// Failure of one unit of work (one AMP page or one index artifact).
///
/// Never fatal for the whole build: the driver records it and moves on.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to render amp page for `{slug}`")]
    Render {
        slug: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize `{artifact}`")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io::Error;

    #[test]
    fn test_render_error_display_and_source() {
        let err = EmitError::Render {
            slug: "notes/rust".into(),
            source: Error::other("buffer closed"),
        };
        assert!(err.to_string().contains("notes/rust"));
        assert!(err.source().unwrap().to_string().contains("buffer closed"));
    }

    #[test]
    fn test_serialize_error_names_artifact() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EmitError::Serialize {
            artifact: "site-index",
            source,
        };
        assert_eq!(err.to_string(), "failed to serialize `site-index`");
    }
}
