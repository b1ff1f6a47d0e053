use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    GeminiApiKey,
}

impl SecretKey {
    pub fn env_var(self) -> &'static str {
        match self {
            SecretKey::GeminiApiKey => "GEMINI_API_KEY",
        }
    }
}

/// Loads a `.env` file from the working directory (or a parent) into the
/// process environment. Existing variables win. A missing file is not an error.
pub fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            log::debug!("loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)).context("load .env file"),
    }
}

pub fn get_secret(key: SecretKey) -> Option<String> {
    get_secret_with(key, |name| std::env::var(name).ok())
}

/// Blank values count as missing.
pub fn get_secret_with<F>(key: SecretKey, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key.env_var())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
