use crate::request::{Body, HttpRequest};
use scriptcraft_core::generation::SamplingConfig;
use serde_json::json;

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Single-turn `generateContent` call carrying one user prompt.
pub fn build_generate_content_request(
    cfg: &GeminiConfig,
    prompt: &str,
    sampling: &SamplingConfig,
) -> HttpRequest {
    let url = join_url(
        &cfg.base_url,
        &format!("/models/{}:generateContent", cfg.model),
    );

    let payload = json!({
        "contents": [
            { "role": "user", "parts": [ { "text": prompt } ] }
        ],
        "generationConfig": {
            "temperature": sampling.temperature,
            "topK": sampling.top_k,
            "topP": sampling.top_p,
            "maxOutputTokens": sampling.max_output_tokens,
        },
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("x-goog-api-key".into(), cfg.api_key.clone()),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
