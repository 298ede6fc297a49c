//! Runtime configuration for the client.

const DEFAULT_API_URL: &str = "http://localhost:3000";
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SESSION_FILE: &str = "cofounder-session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    pub session_file: std::path::PathBuf,
}

impl AppConfig {
    /// On web, talk to the same origin the page was served from.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let api_url = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        AppConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// On native, read `.env` and the process environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_file = lookup("SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());

        AppConfig {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            session_file: session_file.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.session_file, std::path::PathBuf::from("cofounder-session.json"));
    }

    #[test]
    fn test_env_overrides_and_trailing_slash_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_URL", "https://api.cofounders.example/"),
            ("SESSION_FILE", "/tmp/session.json"),
        ]));
        assert_eq!(config.api_url, "https://api.cofounders.example");
        assert_eq!(config.session_file, std::path::PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("API_URL", "  ")]));
        assert_eq!(config.api_url, "http://localhost:3000");
    }
}
