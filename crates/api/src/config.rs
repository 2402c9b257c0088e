use crate::auth::jwt::JwtConfig;

/// Which plant-identification backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    /// Static lookup table with artificial latency.
    Mock,
    /// Real HTTP service at `AI_SERVICE_URL`.
    Http,
}

/// Configuration for the AI collaborators.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProviderKind,
    /// Base URL of the real service; required when `provider` is Http.
    pub service_url: Option<String>,
    /// Per-call deadline in seconds.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Load AI configuration from environment variables.
    ///
    /// | Env Var           | Default |
    /// |-------------------|---------|
    /// | `AI_PROVIDER`     | `mock`  |
    /// | `AI_SERVICE_URL`  | --      |
    /// | `AI_TIMEOUT_SECS` | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `AI_PROVIDER` is unrecognized, or is `http` without
    /// `AI_SERVICE_URL` -- misconfiguration should fail fast.
    pub fn from_env() -> Self {
        let provider = match std::env::var("AI_PROVIDER")
            .unwrap_or_else(|_| "mock".into())
            .as_str()
        {
            "mock" => AiProviderKind::Mock,
            "http" => AiProviderKind::Http,
            other => panic!("AI_PROVIDER must be 'mock' or 'http', got '{other}'"),
        };

        let service_url = std::env::var("AI_SERVICE_URL").ok();
        if provider == AiProviderKind::Http && service_url.is_none() {
            panic!("AI_SERVICE_URL must be set when AI_PROVIDER=http");
        }

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        Self {
            provider,
            service_url,
            timeout_secs,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// AI collaborator configuration.
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            ai: AiConfig::from_env(),
        }
    }
}
