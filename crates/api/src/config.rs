use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use footlights_core::invitation::DEFAULT_INVITATION_EXPIRY_HOURS;
use footlights_core::media::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Variables the server refuses to start without.
pub const REQUIRED_VARS: &[&str] = &["DATABASE_URL", "JWT_SECRET", "SITE_URL"];

/// Startup configuration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Every required variable that is unset or blank, in declaration order.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Local media storage settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory uploaded files are written under.
    pub root: PathBuf,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

/// SMTP settings for invitation mail. Absent when `SMTP_HOST` is unset.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Where front-end cache invalidation notices are posted.
#[derive(Debug, Clone)]
pub struct RevalidateConfig {
    pub url: String,
    /// Sent as the `x-revalidate-secret` header when set.
    pub secret: Option<String>,
}

/// First admin account, created at startup when the user table is empty.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub database_url: String,
    /// Public site origin, used to build links in outgoing mail.
    pub site_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    pub media: MediaConfig,
    pub smtp: Option<SmtpConfig>,
    pub revalidate: Option<RevalidateConfig>,
    /// Lifetime of a new invitation in hours (default: `72`).
    pub invitation_expiry_hours: i64,
    pub log_format: LogFormat,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;
/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;
/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@footlights.local";

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Required | Default                    |
    /// |----------------------------|----------|----------------------------|
    /// | `DATABASE_URL`             | **yes**  | --                         |
    /// | `JWT_SECRET`               | **yes**  | --                         |
    /// | `SITE_URL`                 | **yes**  | --                         |
    /// | `HOST`                     | no       | `0.0.0.0`                  |
    /// | `PORT`                     | no       | `3000`                     |
    /// | `CORS_ORIGINS`             | no       | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | no       | `30`                       |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`                       |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`                        |
    /// | `MEDIA_ROOT`               | no       | `./media`                  |
    /// | `MEDIA_MAX_UPLOAD_BYTES`   | no       | `20971520`                 |
    /// | `SMTP_HOST`                | no       | mail disabled              |
    /// | `SMTP_PORT`                | no       | `587`                      |
    /// | `SMTP_FROM`                | no       | `noreply@footlights.local` |
    /// | `SMTP_USER`                | no       | --                         |
    /// | `SMTP_PASSWORD`            | no       | --                         |
    /// | `REVALIDATE_URL`           | no       | notices only logged        |
    /// | `REVALIDATE_SECRET`        | no       | --                         |
    /// | `INVITATION_EXPIRY_HOURS`  | no       | `72`                       |
    /// | `LOG_FORMAT`               | no       | `pretty`                   |
    /// | `BOOTSTRAP_ADMIN_EMAIL`    | no       | --                         |
    /// | `BOOTSTRAP_ADMIN_PASSWORD` | no       | --                         |
    /// | `BOOTSTRAP_ADMIN_USERNAME` | no       | `admin`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| get(var).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let required = |var: &'static str| get(var).unwrap_or_default();

        let cors_origins: Vec<String> = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt = JwtConfig {
            secret: required("JWT_SECRET"),
            access_token_expiry_mins: parse_or(&get, "JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?,
            refresh_token_expiry_days: parse_or(&get, "JWT_REFRESH_EXPIRY_DAYS", DEFAULT_REFRESH_EXPIRY_DAYS)?,
        };
        if jwt.access_token_expiry_mins < 1 {
            return Err(invalid("JWT_ACCESS_EXPIRY_MINS", "must be at least 1"));
        }
        if jwt.refresh_token_expiry_days < 1 {
            return Err(invalid("JWT_REFRESH_EXPIRY_DAYS", "must be at least 1"));
        }

        let site_url = required("SITE_URL").trim_end_matches('/').to_string();
        if !site_url.starts_with("http://") && !site_url.starts_with("https://") {
            return Err(invalid("SITE_URL", "must start with http:// or https://"));
        }

        let media = MediaConfig {
            root: PathBuf::from(get("MEDIA_ROOT").unwrap_or_else(|| "./media".into())),
            max_upload_bytes: parse_or(&get, "MEDIA_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        let smtp = match get("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: parse_or(&get, "SMTP_PORT", DEFAULT_SMTP_PORT)?,
                from_address: get("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.into()),
                user: get("SMTP_USER"),
                password: get("SMTP_PASSWORD"),
            }),
            None => None,
        };

        let revalidate = get("REVALIDATE_URL").map(|url| RevalidateConfig {
            url,
            secret: get("REVALIDATE_SECRET"),
        });

        let invitation_expiry_hours =
            parse_or(&get, "INVITATION_EXPIRY_HOURS", DEFAULT_INVITATION_EXPIRY_HOURS)?;
        if invitation_expiry_hours < 1 {
            return Err(invalid("INVITATION_EXPIRY_HOURS", "must be at least 1"));
        }

        let bootstrap_admin = match (get("BOOTSTRAP_ADMIN_EMAIL"), get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin {
                username: get("BOOTSTRAP_ADMIN_USERNAME").unwrap_or_else(|| "admin".into()),
                email,
                password,
            }),
            (None, None) => None,
            _ => {
                return Err(invalid(
                    "BOOTSTRAP_ADMIN_EMAIL",
                    "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together",
                ))
            }
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 3000u16)?,
            database_url: required("DATABASE_URL"),
            site_url,
            cors_origins,
            request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", 30u64)?,
            jwt,
            media,
            smtp,
            revalidate,
            invitation_expiry_hours,
            log_format: parse_or(&get, "LOG_FORMAT", LogFormat::default())?,
            bootstrap_admin,
        })
    }
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn invalid(var: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        reason: reason.to_string(),
    }
}
