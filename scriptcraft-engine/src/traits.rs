use async_trait::async_trait;
use scriptcraft_core::generation::SamplingConfig;

/// The remote text-generation service, seen as one request/response call.
///
/// Implementations hold no per-call state and may be shared across tasks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> anyhow::Result<String>;
}
