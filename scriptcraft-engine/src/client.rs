use crate::traits::TextGenerator;
use scriptcraft_core::generation::{SamplingConfig, ScriptResult};
use std::sync::Arc;

/// Sampling policy for every content kind. Callers cannot change it.
pub const SCRIPT_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.7,
    top_k: 40,
    top_p: 0.95,
    max_output_tokens: 1024,
};

const FAILURE_PREFIX: &str = "Error generating script";

/// Sends built prompts to a [`TextGenerator`] and folds every outcome into a
/// [`ScriptResult`].
#[derive(Clone)]
pub struct GenerationClient {
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("sampling", &SCRIPT_SAMPLING)
            .finish_non_exhaustive()
    }
}

impl GenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One attempt, no retries. Errors never escape: they come back as
    /// `ScriptResult::Failure` with a readable message.
    pub async fn generate(&self, prompt: &str) -> ScriptResult {
        match self.generator.generate_text(prompt, &SCRIPT_SAMPLING).await {
            Ok(text) => ScriptResult::success(text),
            Err(e) => {
                log::warn!("script generation failed: {e:#}");
                ScriptResult::failure(failure_message(&e))
            }
        }
    }
}

fn failure_message(e: &anyhow::Error) -> String {
    let detail = format!("{e:#}");
    if detail.trim().is_empty() {
        format!("{FAILURE_PREFIX}: unknown error")
    } else {
        format!("{FAILURE_PREFIX}: {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use scriptcraft_core::error::RequestError;
    use scriptcraft_core::prompt::build_prompt;
    use std::sync::Mutex;

    struct StubGenerator {
        reply: Result<String, String>,
        seen: Mutex<Vec<(String, SamplingConfig)>>,
    }

    impl StubGenerator {
        fn replying(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(String::from).map_err(String::from),
                seen: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate_text(
            &self,
            prompt: &str,
            sampling: &SamplingConfig,
        ) -> anyhow::Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), *sampling));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(anyhow!(msg.clone()).context("http request failed")),
            }
        }
    }

    #[tokio::test]
    async fn success_text_is_returned_unmodified() {
        let stub = StubGenerator::replying(Ok("HELLO"));
        let client = GenerationClient::new(stub.clone());
        assert_eq!(client.generate("p").await, ScriptResult::success("HELLO"));

        let stub = StubGenerator::replying(Ok("  **Hook:** _wait_ \n\n"));
        let client = GenerationClient::new(stub);
        assert_eq!(
            client.generate("p").await.text(),
            Some("  **Hook:** _wait_ \n\n")
        );
    }

    #[tokio::test]
    async fn transport_error_becomes_failure_result() {
        let stub = StubGenerator::replying(Err("connection refused"));
        let client = GenerationClient::new(stub);
        let res = client.generate("p").await;

        let msg = res.error_message().unwrap();
        assert!(!msg.is_empty());
        assert!(msg.starts_with("Error generating script"));
        assert!(msg.contains("connection refused"));
    }

    #[tokio::test]
    async fn forwards_prompt_with_fixed_sampling() {
        let stub = StubGenerator::replying(Ok("x"));
        let client = GenerationClient::new(stub.clone());
        client.generate("the prompt").await;

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "the prompt");
        assert_eq!(seen[0].1.temperature, 0.7);
        assert_eq!(seen[0].1.top_k, 40);
        assert_eq!(seen[0].1.top_p, 0.95);
        assert_eq!(seen[0].1.max_output_tokens, 1024);
    }

    #[tokio::test]
    async fn unknown_kind_never_reaches_the_generator() {
        let stub = StubGenerator::replying(Ok("x"));
        let client = GenerationClient::new(stub.clone());

        let res = async {
            let prompt = build_prompt("newsletter", "Topic", "casual", "medium", "general")?;
            Ok::<_, RequestError>(client.generate(&prompt).await)
        }
        .await;

        assert!(matches!(res, Err(RequestError::UnknownContentKind(_))));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_error_still_gets_a_message() {
        let msg = failure_message(&anyhow!(""));
        assert_eq!(msg, "Error generating script: unknown error");
    }
}
