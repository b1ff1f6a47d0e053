use anyhow::{Context, anyhow};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Text of the first candidate, with its text parts joined in order.
pub fn parse_generate_content(body: &[u8]) -> anyhow::Result<String> {
    let resp: GenerateContentResponse =
        serde_json::from_slice(body).context("decode generateContent JSON")?;

    let Some(candidate) = resp.candidates.into_iter().next() else {
        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(anyhow!("prompt was blocked by the model: {reason}"));
        }
        return Err(anyhow!("no candidates in generateContent response"));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(anyhow!(
            "generateContent returned no text (finish reason: {reason})"
        ));
    }
    Ok(text)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

/// Extracts a readable message from a Google API error body, if it is one.
pub fn parse_api_error(body: &[u8]) -> Option<String> {
    let env: ApiErrorEnvelope = serde_json::from_slice(body).ok()?;
    let message = env.error.message.filter(|m| !m.trim().is_empty())?;
    Some(match (env.error.status, env.error.code) {
        (Some(status), _) => format!("{status}: {message}"),
        (None, Some(code)) => format!("{code}: {message}"),
        (None, None) => message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_candidate_text() {
        let body = br#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hook: wake up"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse_generate_content(body).unwrap(), "Hook: wake up");
    }

    #[test]
    fn joins_multiple_text_parts_unmodified() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"**Intro**\n"},{"text":"[B-roll]"}]}}]}"#;
        assert_eq!(parse_generate_content(body).unwrap(), "**Intro**\n[B-roll]");
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let body = br#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let err = parse_generate_content(body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn empty_candidate_is_an_error() {
        let body = br#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#;
        let err = parse_generate_content(body).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_generate_content(b"<html>502</html>").is_err());
    }

    #[test]
    fn parses_google_error_envelope() {
        let body = br#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            parse_api_error(body).as_deref(),
            Some("INVALID_ARGUMENT: API key not valid.")
        );
        assert_eq!(parse_api_error(b"not json"), None);
    }
}
