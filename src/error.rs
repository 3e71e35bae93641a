//! Structured error types for tlview.
//!
//! Only construction-time work can fail: parsing the dataset, validating
//! options and bootstrapping the DOM. Everything driven by scroll, touch and
//! click events degrades to a no-op instead of returning an error.

/// All errors that can occur while building a timeline.
#[derive(Debug, thiserror::Error)]
pub enum TlviewError {
    /// Dataset or options JSON could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two dataset records share the same `id`.
    #[error("Duplicate release id: {0}")]
    DuplicateId(String),

    /// A record is missing a field the sync engine reads.
    #[error("Release #{index} has an empty `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Options failed validation.
    #[error("Invalid config: {0}")]
    Config(String),

    /// A required DOM object (window, document, body, track element) is unavailable.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TlviewError>;

#[cfg(target_arch = "wasm32")]
impl From<TlviewError> for wasm_bindgen::JsValue {
    fn from(e: TlviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_record() {
        let err = TlviewError::MissingField {
            index: 3,
            field: "maker",
        };
        assert_eq!(err.to_string(), "Release #3 has an empty `maker`");
        assert_eq!(
            TlviewError::DuplicateId("gpt-5".into()).to_string(),
            "Duplicate release id: gpt-5"
        );
    }

    #[test]
    fn json_errors_convert_with_question_mark() {
        fn parse(text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(text)?)
        }
        assert!(matches!(parse("[").unwrap_err(), TlviewError::Json(_)));
    }
}
