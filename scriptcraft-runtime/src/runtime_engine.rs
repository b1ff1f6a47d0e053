use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use scriptcraft_core::config::AppConfig;
use scriptcraft_engine::client::GenerationClient;
use scriptcraft_providers::gemini::GeminiConfig;
use scriptcraft_providers::runtime::HttpTimeouts;

use crate::llm::GeminiTextGenerator;
use crate::secrets::SecretKey;

/// Build a generation client from config plus the API key.
///
/// The key is passed in once here and owned by the generator afterwards.
pub fn build_generation_client(
    cfg: &AppConfig,
    api_key: Option<String>,
) -> anyhow::Result<GenerationClient> {
    let api_key = api_key.ok_or_else(|| {
        anyhow!(
            "missing Gemini API key: set {} in the environment or a .env file",
            SecretKey::GeminiApiKey.env_var()
        )
    })?;

    let timeouts = HttpTimeouts {
        connect: Duration::from_secs(cfg.connect_timeout_secs.max(1)),
        total: Duration::from_secs(cfg.request_timeout_secs.max(1)),
    };

    let generator = GeminiTextGenerator::new(
        GeminiConfig {
            base_url: cfg.gemini_base_url.clone(),
            api_key,
            model: cfg.gemini_model.clone(),
        },
        timeouts,
    );
    log::debug!("generation client ready: {generator:?}");

    Ok(GenerationClient::new(Arc::new(generator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_the_variable() {
        let err = build_generation_client(&AppConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn builds_with_key() {
        assert!(build_generation_client(&AppConfig::default(), Some("k".into())).is_ok());
    }
}
