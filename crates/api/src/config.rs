use crate::auth::jwt::JwtConfig;
use crate::auth::password::hash_password;

/// Deployment environment, read from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// The single staff account accepted by `POST /api/admin/auth/login`.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2id PHC string of the configured password.
    pub password_hash: String,
    /// Officer record the admin identity maps to.
    pub officer_id: String,
}

impl AdminCredentials {
    /// Hash `password` and build the credentials.
    ///
    /// # Panics
    ///
    /// Panics if hashing fails, which only happens on a broken RNG.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password_hash: hash_password(password).expect("Failed to hash ADMIN_PASSWORD"),
            officer_id: DEFAULT_ADMIN_OFFICER_ID.to_string(),
        }
    }
}

/// OTP issuance settings.
#[derive(Debug, Clone)]
pub struct OtpConfig {
    pub ttl_secs: i64,
    /// Accept any six-digit code. Never enabled in production.
    pub dev_bypass: bool,
    /// Include the issued code in the `send-otp` response.
    pub expose_code: bool,
}

/// Fixed-window request ceiling per client address.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u64,
    pub window_secs: u64,
}

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin@123";
const DEFAULT_ADMIN_OFFICER_ID: &str = "OFF-001";
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u64 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 900;
const DEFAULT_UTILITY_FEED_INTERVAL_SECS: u64 = 30;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres URL. `None` runs the service against the Mock Store only.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub admin: AdminCredentials,
    pub otp: OtpConfig,
    pub rate_limit: RateLimitConfig,
    /// Seconds between utility-status broadcasts (default: `30`).
    pub utility_feed_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                       |
    /// |------------------------------|-----------------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                                     |
    /// | `PORT`                       | `5000`                                        |
    /// | `APP_ENV`                    | `development`                                 |
    /// | `CORS_ORIGINS`               | `http://localhost:5173,http://localhost:5174` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                                          |
    /// | `DATABASE_URL`               | unset (mock-only)                             |
    /// | `ADMIN_USERNAME`             | `admin`                                       |
    /// | `ADMIN_PASSWORD`             | `admin@123`                                   |
    /// | `OTP_TTL_SECS`               | `300`                                         |
    /// | `OTP_DEV_BYPASS`             | `true` outside production                     |
    /// | `RATE_LIMIT_MAX_REQUESTS`    | `100`                                         |
    /// | `RATE_LIMIT_WINDOW_SECS`     | `900`                                         |
    /// | `UTILITY_FEED_INTERVAL_SECS` | `30`                                          |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", 5000);
        let environment = Environment::from_env();

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:5174".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", 30);

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let admin = AdminCredentials::new(
            &std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.into()),
            &std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into()),
        );

        let requested_bypass: bool = parse_var("OTP_DEV_BYPASS", !environment.is_production());
        if requested_bypass && environment.is_production() {
            tracing::warn!("OTP_DEV_BYPASS is ignored in production");
        }
        let otp = OtpConfig {
            ttl_secs: parse_var("OTP_TTL_SECS", suvidha_core::otp::DEFAULT_OTP_TTL_SECS),
            dev_bypass: requested_bypass && !environment.is_production(),
            expose_code: !environment.is_production(),
        };

        let rate_limit = RateLimitConfig {
            max_requests: parse_var("RATE_LIMIT_MAX_REQUESTS", DEFAULT_RATE_LIMIT_MAX_REQUESTS),
            window_secs: parse_var("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS),
        };

        let utility_feed_interval_secs: u64 =
            parse_var("UTILITY_FEED_INTERVAL_SECS", DEFAULT_UTILITY_FEED_INTERVAL_SECS);

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt: JwtConfig::from_env(),
            admin,
            otp,
            rate_limit,
            utility_feed_interval_secs,
        }
    }
}

/// Parse an env var, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse.
fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
