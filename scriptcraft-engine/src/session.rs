use crate::client::GenerationClient;
use scriptcraft_core::error::RequestError;
use scriptcraft_core::generation::ScriptResult;
use scriptcraft_core::history::{HistoryEntry, SessionHistory};
use scriptcraft_core::prompt::render_prompt;
use scriptcraft_core::request::{DEFAULT_AUDIENCE, DEFAULT_DURATION, ScriptRequest};
use scriptcraft_core::types::{ContentKind, Tone};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const STAGE_PROMPTING: &str = "prompting";
pub const STAGE_GENERATING: &str = "generating";
pub const STAGE_DONE: &str = "done";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
    #[error("no content kind selected")]
    NoContentKind,
    #[error("nothing to regenerate yet")]
    NothingToRegenerate,
    #[error("no history entry at index {0}")]
    NoSuchEntry(usize),
}

/// Form-like selections that persist between generations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSettings {
    pub content_kind: Option<ContentKind>,
    pub tone: Tone,
    pub duration_hint: String,
    pub audience: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            content_kind: None,
            tone: Tone::default(),
            duration_hint: DEFAULT_DURATION.into(),
            audience: DEFAULT_AUDIENCE.into(),
        }
    }
}

impl ScriptSettings {
    /// Selecting a kind resets the duration to that kind's first option unless
    /// the current one is already valid for it.
    pub fn select_kind(&mut self, kind: ContentKind) {
        self.content_kind = Some(kind);
        let options = kind.duration_options();
        if !options.contains(&self.duration_hint.as_str()) {
            self.duration_hint = options[0].to_string();
        }
    }

    pub fn request_for(&self, topic: impl Into<String>) -> Result<ScriptRequest, SessionError> {
        let kind = self.content_kind.ok_or(SessionError::NoContentKind)?;
        let req = ScriptRequest::new(kind, topic)
            .with_tone(self.tone)
            .with_duration(self.duration_hint.clone())
            .with_audience(self.audience.clone());
        req.validate()?;
        Ok(req)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub result: ScriptResult,
    pub history_index: Option<usize>,
    pub generation_ms: u64,
}

/// Per-user state: current settings, the last request and its script, and the
/// append-only history. Methods that mutate take `&mut self`, so one session has
/// exactly one writer.
#[derive(Debug, Clone)]
pub struct ScriptSession {
    pub settings: ScriptSettings,
    history: SessionHistory,
    history_enabled: bool,
    last_request: Option<ScriptRequest>,
    current: Option<ScriptResult>,
}

impl Default for ScriptSession {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScriptSession {
    pub fn new(history_enabled: bool) -> Self {
        Self {
            settings: ScriptSettings::default(),
            history: SessionHistory::new(),
            history_enabled,
            last_request: None,
            current: None,
        }
    }

    pub async fn create_script(
        &mut self,
        client: &GenerationClient,
        request: ScriptRequest,
    ) -> Result<ScriptOutcome, SessionError> {
        self.create_script_with_hook(client, request, |_stage| async {})
            .await
    }

    /// Same as `create_script`, but reports each stage as it is reached.
    ///
    /// The hook is meant for UI progress and must be fast.
    pub async fn create_script_with_hook<F, Fut>(
        &mut self,
        client: &GenerationClient,
        request: ScriptRequest,
        on_stage: F,
    ) -> Result<ScriptOutcome, SessionError>
    where
        F: Fn(&'static str) -> Fut,
        Fut: Future<Output = ()>,
    {
        on_stage(STAGE_PROMPTING).await;
        let prompt = render_prompt(&request)?;

        on_stage(STAGE_GENERATING).await;
        let t0 = Instant::now();
        let result = client.generate(&prompt).await;
        let generation_ms = ms(t0.elapsed());

        let history_index = self.history_enabled.then(|| {
            self.history.push(HistoryEntry::from_result(
                now_unix_ms(),
                request.content_kind,
                request.topic.clone(),
                &result,
            ))
        });

        self.last_request = Some(request);
        self.current = Some(result.clone());
        on_stage(STAGE_DONE).await;

        Ok(ScriptOutcome {
            result,
            history_index,
            generation_ms,
        })
    }

    /// Runs the previous request again; the new version is a new history entry.
    pub async fn regenerate(
        &mut self,
        client: &GenerationClient,
    ) -> Result<ScriptOutcome, SessionError> {
        let request = self
            .last_request
            .clone()
            .ok_or(SessionError::NothingToRegenerate)?;
        self.create_script(client, request).await
    }

    pub fn current_script(&self) -> Option<&ScriptResult> {
        self.current.as_ref()
    }

    pub fn last_request(&self) -> Option<&ScriptRequest> {
        self.last_request.as_ref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn load_from_history(&self, index: usize) -> Result<&HistoryEntry, SessionError> {
        self.history.get(index).ok_or(SessionError::NoSuchEntry(index))
    }
}

fn ms(d: Duration) -> u64 {
    d.as_millis().try_into().unwrap_or(u64::MAX)
}

fn now_unix_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().try_into().unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TextGenerator;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use scriptcraft_core::generation::SamplingConfig;
    use scriptcraft_core::history::EntryOutcome;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingGenerator {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate_text(
            &self,
            prompt: &str,
            _sampling: &SamplingConfig,
        ) -> anyhow::Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(anyhow!("quota exceeded"));
            }
            Ok(format!("script #{n} ({} chars of prompt)", prompt.len()))
        }
    }

    #[tokio::test]
    async fn create_script_records_history_and_current() {
        let generator = CountingGenerator::new(false);
        let client = GenerationClient::new(generator.clone());
        let mut session = ScriptSession::default();

        let req = ScriptRequest::new(ContentKind::LongFormVideo, "Home espresso");
        let out = session.create_script(&client, req).await.unwrap();

        assert!(out.result.is_success());
        assert_eq!(out.history_index, Some(0));
        assert_eq!(generator.calls(), 1);
        assert_eq!(session.current_script(), Some(&out.result));

        let entry = session.load_from_history(0).unwrap();
        assert_eq!(entry.topic, "Home espresso");
        assert_eq!(entry.content_kind, ContentKind::LongFormVideo);
        assert_eq!(entry.outcome, EntryOutcome::Generated);
    }

    #[tokio::test]
    async fn invalid_request_makes_no_remote_call() {
        let generator = CountingGenerator::new(false);
        let client = GenerationClient::new(generator.clone());
        let mut session = ScriptSession::default();

        let req = ScriptRequest::new(ContentKind::SocialShort, "   ");
        let err = session.create_script(&client, req).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::InvalidRequest(RequestError::EmptyTopic)
        ));
        assert_eq!(generator.calls(), 0);
        assert!(session.history().is_empty());
        assert!(session.current_script().is_none());
    }

    #[tokio::test]
    async fn failures_are_recorded_as_failed_entries() {
        let client = GenerationClient::new(CountingGenerator::new(true));
        let mut session = ScriptSession::default();

        let req = ScriptRequest::new(ContentKind::PodcastQa, "Founders");
        let out = session.create_script(&client, req).await.unwrap();

        assert!(!out.result.is_success());
        let entry = session.load_from_history(0).unwrap();
        assert!(entry.is_failure());
        assert!(entry.script_text.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn regenerate_repeats_last_request_as_new_entry() {
        let generator = CountingGenerator::new(false);
        let client = GenerationClient::new(generator.clone());
        let mut session = ScriptSession::default();

        assert!(matches!(
            session.regenerate(&client).await,
            Err(SessionError::NothingToRegenerate)
        ));

        let req = ScriptRequest::new(ContentKind::SocialShort, "Desk setup");
        session.create_script(&client, req).await.unwrap();
        let again = session.regenerate(&client).await.unwrap();

        assert_eq!(again.history_index, Some(1));
        assert_eq!(generator.calls(), 2);
        assert_eq!(session.history().get(1).unwrap().topic, "Desk setup");
        assert!(again.result.text().unwrap().starts_with("script #2"));
    }

    #[tokio::test]
    async fn disabled_history_keeps_current_only() {
        let client = GenerationClient::new(CountingGenerator::new(false));
        let mut session = ScriptSession::new(false);

        let req = ScriptRequest::new(ContentKind::SocialShort, "Stretching");
        let out = session.create_script(&client, req).await.unwrap();

        assert_eq!(out.history_index, None);
        assert!(session.history().is_empty());
        assert!(session.current_script().is_some());
    }

    #[tokio::test]
    async fn hook_sees_stages_in_order() {
        let client = GenerationClient::new(CountingGenerator::new(false));
        let mut session = ScriptSession::default();
        let stages = std::sync::Mutex::new(Vec::new());

        let req = ScriptRequest::new(ContentKind::PodcastQa, "Open source");
        session
            .create_script_with_hook(&client, req, |stage| {
                stages.lock().unwrap().push(stage);
                async {}
            })
            .await
            .unwrap();

        assert_eq!(
            *stages.lock().unwrap(),
            vec![STAGE_PROMPTING, STAGE_GENERATING, STAGE_DONE]
        );
    }

    #[test]
    fn selecting_kind_picks_a_valid_duration() {
        let mut settings = ScriptSettings::default();
        settings.select_kind(ContentKind::SocialShort);
        assert_eq!(settings.duration_hint, "15 seconds");

        settings.duration_hint = "60 seconds".into();
        settings.select_kind(ContentKind::SocialShort);
        assert_eq!(settings.duration_hint, "60 seconds");

        settings.select_kind(ContentKind::PodcastQa);
        assert_eq!(settings.duration_hint, "20-30 minutes");
    }

    #[test]
    fn request_for_requires_a_kind() {
        let settings = ScriptSettings::default();
        assert!(matches!(
            settings.request_for("Topic"),
            Err(SessionError::NoContentKind)
        ));
    }
}
