// src/config/mod.rs
// Process configuration, read from the environment (and .env) once at startup

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

use crate::llm::SamplingParams;

#[derive(Debug, Clone)]
pub struct ShaimindConfig {
    // ── Provider
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub request_timeout: u64,

    // ── Replies
    pub word_cap: usize,

    // ── Personalities
    pub identities_dir: String,
    pub default_persona: String,

    // ── Logging
    pub log_level: String,
}

// Values may carry trailing comments and whitespace in .env files.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

// Secrets and URLs may legitimately contain '#', so only whitespace is trimmed.
fn env_var_raw(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) => val.trim().to_string(),
        Err(_) => default.to_string(),
    }
}

impl ShaimindConfig {
    pub fn from_env() -> Self {
        // A missing .env is fine; the environment alone is enough.
        let _ = dotenvy::dotenv();

        Self {
            openai_api_key: env_var_raw("OPENAI_API_KEY", ""),
            openai_base_url: env_var_raw("OPENAI_BASE_URL", "https://api.openai.com"),
            model: env_var_or("SHAIMIND_MODEL", "gpt-4".to_string()),
            temperature: env_var_or("SHAIMIND_TEMPERATURE", 0.75),
            max_tokens: env_var_or("SHAIMIND_MAX_TOKENS", 150),
            top_p: env_var_or("SHAIMIND_TOP_P", 0.9),
            frequency_penalty: env_var_or("SHAIMIND_FREQUENCY_PENALTY", 0.3),
            presence_penalty: env_var_or("SHAIMIND_PRESENCE_PENALTY", 0.5),
            request_timeout: env_var_or("SHAIMIND_TIMEOUT", 30),
            word_cap: env_var_or("SHAIMIND_WORD_CAP", 75),
            identities_dir: env_var_or("SHAIMIND_IDENTITIES_DIR", "identities".to_string()),
            default_persona: env_var_or("SHAIMIND_DEFAULT_PERSONA", String::new()),
            log_level: env_var_or("SHAIMIND_LOG_LEVEL", "warn".to_string()),
        }
    }

    pub fn sampling_params(&self) -> SamplingParams {
        SamplingParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.openai_base_url.trim_end_matches('/'))
    }

    /// The provider credential; its absence is a startup failure.
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!("OPENAI_API_KEY must be set (environment or .env file)");
        }
        Ok(&self.openai_api_key)
    }

    pub fn default_persona(&self) -> Option<&str> {
        Some(self.default_persona.as_str()).filter(|s| !s.is_empty())
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<ShaimindConfig> = Lazy::new(ShaimindConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_params_follow_config() {
        let mut config = ShaimindConfig::from_env();
        config.model = "gpt-4o".to_string();
        config.temperature = 0.5;
        let params = config.sampling_params();
        assert_eq!(params.model, "gpt-4o");
        assert_eq!(params.temperature, 0.5);
        assert_eq!(params.max_tokens, config.max_tokens);
    }

    #[test]
    fn test_convenience_methods() {
        let mut config = ShaimindConfig::from_env();
        config.openai_base_url = "http://localhost:8080/".to_string();
        assert_eq!(config.chat_completions_url(), "http://localhost:8080/v1/chat/completions");

        config.request_timeout = 12;
        assert_eq!(config.request_timeout(), Duration::from_secs(12));

        config.default_persona = String::new();
        assert_eq!(config.default_persona(), None);
        config.default_persona = "tesla".to_string();
        assert_eq!(config.default_persona(), Some("tesla"));
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let mut config = ShaimindConfig::from_env();
        config.openai_api_key = String::new();
        assert!(config.require_api_key().is_err());
        config.openai_api_key = "sk-test".to_string();
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_env_var_or_strips_comments() {
        // Key is unique to this test so parallel tests don't race on it.
        unsafe { std::env::set_var("SHAIMIND_TEST_WORD_CAP", " 40  # shorter replies") };
        assert_eq!(env_var_or("SHAIMIND_TEST_WORD_CAP", 75usize), 40);
        unsafe { std::env::set_var("SHAIMIND_TEST_WORD_CAP", "lots") };
        assert_eq!(env_var_or("SHAIMIND_TEST_WORD_CAP", 75usize), 75);
        unsafe { std::env::remove_var("SHAIMIND_TEST_WORD_CAP") };
    }

    #[test]
    fn test_env_var_raw_keeps_hash() {
        unsafe { std::env::set_var("SHAIMIND_TEST_SECRET", " sk-abc#123 ") };
        assert_eq!(env_var_raw("SHAIMIND_TEST_SECRET", ""), "sk-abc#123");
        unsafe { std::env::remove_var("SHAIMIND_TEST_SECRET") };
        assert_eq!(env_var_raw("SHAIMIND_TEST_SECRET", "fallback"), "fallback");
    }
}
