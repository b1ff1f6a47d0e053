use crate::error::RequestError;
use crate::types::{ContentKind, Tone};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION: &str = "medium";
pub const DEFAULT_AUDIENCE: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub content_kind: ContentKind,
    pub topic: String,
    pub tone: Tone,
    pub duration_hint: String,
    pub audience: String,
}

impl ScriptRequest {
    pub fn new(content_kind: ContentKind, topic: impl Into<String>) -> Self {
        Self {
            content_kind,
            topic: topic.into(),
            tone: Tone::default(),
            duration_hint: DEFAULT_DURATION.into(),
            audience: DEFAULT_AUDIENCE.into(),
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_duration(mut self, duration_hint: impl Into<String>) -> Self {
        self.duration_hint = duration_hint.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Builds a request from loosely typed input, e.g. form fields or CLI args.
    pub fn parse(
        content_kind: &str,
        topic: &str,
        tone: &str,
        duration_hint: &str,
        audience: &str,
    ) -> Result<Self, RequestError> {
        let req = Self {
            content_kind: content_kind.parse()?,
            topic: topic.to_string(),
            tone: tone.parse()?,
            duration_hint: duration_hint.to_string(),
            audience: audience.to_string(),
        };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.topic.trim().is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        Ok(())
    }
}
