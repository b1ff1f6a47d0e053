use scriptcraft_core::generation::SamplingConfig;
use scriptcraft_engine::traits::TextGenerator;
use scriptcraft_providers::gemini::{GeminiConfig, build_generate_content_request};
use scriptcraft_providers::parse::{parse_api_error, parse_generate_content};
use scriptcraft_providers::runtime::{HttpTimeouts, execute_with_timeouts};

const MAX_ERROR_BODY_CHARS: usize = 300;

// Debug output never shows the key: `GeminiConfig` redacts it.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    cfg: GeminiConfig,
    timeouts: HttpTimeouts,
}

impl GeminiTextGenerator {
    pub fn new(cfg: GeminiConfig, timeouts: HttpTimeouts) -> Self {
        Self { cfg, timeouts }
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate_text(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> anyhow::Result<String> {
        let req = build_generate_content_request(&self.cfg, prompt, sampling);
        log::debug!("generateContent request: {req:?}");
        let resp = execute_with_timeouts(&req, self.timeouts).await?;

        if !resp.is_success() {
            let detail = parse_api_error(&resp.body).unwrap_or_else(|| {
                String::from_utf8_lossy(&resp.body)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect()
            });
            return Err(anyhow::anyhow!(
                "Gemini request failed: status={} {}",
                resp.status,
                detail
            ));
        }

        parse_generate_content(&resp.body)
    }
}
