use std::env;
use std::path::PathBuf;

/// Default upstream for the chat assistant.
pub const DEFAULT_CHAT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_SITE_BASE_URL: &str = "https://ai-ecosystem-directory.com";

pub struct Config {
    pub host: String,
    pub port: u16,
    /// Bundled catalog loaded once at startup.
    pub catalog_path: PathBuf,
    /// File served verbatim by `GET /api/tools`. Read on every request.
    pub updated_tools_path: PathBuf,
    /// Absolute origin used when building sitemap URLs.
    pub site_base_url: String,
    /// Credential for the generative-language API. Chat falls back to canned
    /// replies when this is unset.
    pub chat_api_key: Option<String>,
    pub chat_api_base: String,
    pub chat_model: String,
    /// Optional request timeout for the upstream chat call. None keeps the
    /// HTTP client's default (no timeout).
    pub chat_timeout_secs: Option<u64>,
    pub shutdown_timeout_secs: u64,
    /// Maximum accepted request body, applied to the chat endpoint.
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `GEMINI_API_KEY` is preferred; `NEXT_PUBLIC_GEMINI_API_KEY` is read as a
    /// fallback so existing deployment environments keep working.
    pub fn from_env() -> anyhow::Result<Self> {
        let chat_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("NEXT_PUBLIC_GEMINI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let chat_timeout_secs = match env::var("CHAT_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse()?),
            _ => None,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            catalog_path: PathBuf::from(
                env::var("CATALOG_PATH").unwrap_or_else(|_| "./data/tools.json".to_string()),
            ),
            updated_tools_path: PathBuf::from(
                env::var("UPDATED_TOOLS_PATH")
                    .unwrap_or_else(|_| "./data/aiToolsData_updated.json".to_string()),
            ),
            site_base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SITE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            chat_api_key,
            chat_api_base: env::var("CHAT_API_BASE")
                .unwrap_or_else(|_| DEFAULT_CHAT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            chat_timeout_secs,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "65536".to_string())
                .parse()?,
        })
    }

    /// Whether the chat endpoint can reach the upstream API at all.
    pub fn chat_enabled(&self) -> bool {
        self.chat_api_key.is_some()
    }
}
