use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Job API base URL (no trailing slash).
    pub api_base_url: String,
    /// Auth provider base URL.
    pub auth_url: String,
    /// Auth provider project key, sent as the `apikey` header.
    pub auth_anon_key: String,
    /// Connection string for the quiz store.
    pub database_url: String,
    /// Status poll cadence.
    pub poll_interval: Duration,
}

/// Default job API deployment.
const DEFAULT_API_BASE_URL: &str = "https://api.quizmaker.opennote.org";

/// Default poll cadence in milliseconds.
const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Required | Default                              |
    /// |--------------------|----------|--------------------------------------|
    /// | `API_BASE_URL`     | no       | `https://api.quizmaker.opennote.org` |
    /// | `AUTH_URL`         | **yes**  | --                                   |
    /// | `AUTH_ANON_KEY`    | **yes**  | --                                   |
    /// | `DATABASE_URL`     | **yes**  | --                                   |
    /// | `POLL_INTERVAL_MS` | no       | `2000`                               |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing; there is no useful
    /// degraded mode without the store or the auth provider.
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());

        let auth_url = std::env::var("AUTH_URL").expect("AUTH_URL must be set");
        let auth_anon_key = std::env::var("AUTH_ANON_KEY").expect("AUTH_ANON_KEY must be set");
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
            .parse()
            .expect("POLL_INTERVAL_MS must be a valid u64");

        Self {
            api_base_url,
            auth_url,
            auth_anon_key,
            database_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}
