use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the text-generation service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScriptResult {
    Success { text: String },
    Failure { message: String },
}

impl ScriptResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }

    /// What a reader should see: the script, or the failure message in its place.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Success { text } => text,
            Self::Failure { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_split_success_and_failure() {
        let ok = ScriptResult::success("HELLO");
        assert!(ok.is_success());
        assert_eq!(ok.text(), Some("HELLO"));
        assert_eq!(ok.error_message(), None);

        let bad = ScriptResult::failure("quota exceeded");
        assert!(!bad.is_success());
        assert_eq!(bad.text(), None);
        assert_eq!(bad.display_text(), "quota exceeded");
    }

    #[test]
    fn serializes_with_status_tag() {
        let s = serde_json::to_string(&ScriptResult::failure("boom")).unwrap();
        assert_eq!(s, r#"{"status":"failure","message":"boom"}"#);
    }
}
