use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub db_max_connections: u32,
    pub request_timeout_secs: u64,
    /// Allowed CORS origins. Empty means any origin.
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_parse("APP_PORT", 3000);
        let frontend_origins = env::var("FRONTEND_ORIGIN")
            .map(|value| parse_origins(&value))
            .unwrap_or_default();

        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            jwt_ttl_hours: env_parse("JWT_TTL_HOURS", 24),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", 25),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            frontend_origins,
        })
    }
}

/// Falls back to `default` when the variable is unset or does not parse.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
