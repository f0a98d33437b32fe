//! Client configuration loaded from the environment.

use std::time::Duration;

/// Default blob path prefix for uploaded logos.
pub const DEFAULT_LOGO_PREFIX: &str = "logos";

/// Default URL base handed out by the in-memory blob store.
pub const DEFAULT_BLOB_BASE_URL: &str = "memory://rolegate-blobs";

/// Shortest password the in-memory credential store accepts.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Blob path prefix; logos land at `<prefix>/<file name>`
    pub logo_prefix: String,
    /// Upper bound on each backend call. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// URL base for the in-memory blob store
    pub blob_base_url: String,
    /// Weak-password threshold for the in-memory credential store
    pub min_password_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            logo_prefix: DEFAULT_LOGO_PREFIX.to_string(),
            request_timeout: None,
            blob_base_url: DEFAULT_BLOB_BASE_URL.to_string(),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, using defaults for missing or
    /// unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let logo_prefix = lookup("ROLEGATE_LOGO_PREFIX")
            .map(|v| v.trim().trim_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.logo_prefix);

        let request_timeout = lookup_parsed::<u64>(&lookup, "ROLEGATE_REQUEST_TIMEOUT_MS")
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        let blob_base_url = lookup("ROLEGATE_BLOB_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.blob_base_url);

        let min_password_len = lookup_parsed(&lookup, "ROLEGATE_MIN_PASSWORD_LEN")
            .unwrap_or(defaults.min_password_len);

        Self {
            logo_prefix,
            request_timeout,
            blob_base_url,
            min_password_len,
        }
    }
}

fn lookup_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable config value");
            None
        }
    }
}

/// Load `.env.local` then `.env` from the workspace root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
