use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_DB_NAMESPACE: &str = "talent";
const DEFAULT_DB_NAME: &str = "directory";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 60;
const MIN_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Parser, Debug)]
#[command(name = "talentd", version, about = "Talent directory daemon.")]
struct CliArgs {
    #[arg(long, env = "TALENT_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "TALENT_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(
        long,
        env = "TALENT_MAX_BODY_BYTES",
        default_value_t = DEFAULT_MAX_BODY_BYTES
    )]
    max_body_bytes: usize,

    #[arg(long, env = "TALENT_DB_NAMESPACE", default_value = DEFAULT_DB_NAMESPACE)]
    db_namespace: String,

    #[arg(long, env = "TALENT_DB_NAME", default_value = DEFAULT_DB_NAME)]
    db_name: String,

    #[arg(
        long,
        env = "TALENT_DB_IN_MEMORY",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    db_in_memory: bool,

    #[arg(long, env = "TALENT_DB_URI")]
    db_uri: Option<String>,

    #[arg(long, env = "TALENT_DB_USERNAME")]
    db_username: Option<String>,

    #[arg(long, env = "TALENT_DB_PASSWORD")]
    db_password: Option<String>,

    #[arg(long, env = "TALENT_TOKEN_SECRET", hide_env_values = true)]
    token_secret: Option<String>,

    #[arg(
        long,
        env = "TALENT_TOKEN_TTL_SECS",
        default_value_t = DEFAULT_TOKEN_TTL_SECS
    )]
    token_ttl_secs: u64,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct TalentConfig {
    pub http_addr: SocketAddr,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub db_namespace: String,
    pub db_name: String,
    pub db_in_memory: bool,
    pub db_uri: Option<String>,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub token_secret: String,
    pub token_ttl: Duration,
}

impl fmt::Debug for TalentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TalentConfig")
            .field("http_addr", &self.http_addr)
            .field("request_timeout", &self.request_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("db_namespace", &self.db_namespace)
            .field("db_name", &self.db_name)
            .field("db_in_memory", &self.db_in_memory)
            .field("db_uri", &self.db_uri)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl TalentConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Endpoint passed to the `SurrealDB` `any` engine.
    pub fn db_endpoint(&self) -> &str {
        if self.db_in_memory {
            "mem://"
        } else {
            self.db_uri.as_deref().unwrap_or("mem://")
        }
    }
}

impl TryFrom<CliArgs> for TalentConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let db_uri = args.db_uri.filter(|value| !value.trim().is_empty());
        let db_username = args.db_username.filter(|value| !value.trim().is_empty());
        let db_password = args.db_password.filter(|value| !value.trim().is_empty());

        let db_in_memory = args.db_in_memory || db_uri.is_none();

        if !db_in_memory {
            if db_username.is_none() {
                return Err(ConfigError::MissingSetting("TALENT_DB_USERNAME"));
            }
            if db_password.is_none() {
                return Err(ConfigError::MissingSetting("TALENT_DB_PASSWORD"));
            }
        }

        if args.db_namespace.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "TALENT_DB_NAMESPACE",
                value: args.db_namespace,
            });
        }
        if args.db_name.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "TALENT_DB_NAME",
                value: args.db_name,
            });
        }

        let token_secret = args
            .token_secret
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("TALENT_TOKEN_SECRET"))?;
        if token_secret.len() < MIN_TOKEN_SECRET_BYTES {
            return Err(ConfigError::InvalidSetting {
                name: "TALENT_TOKEN_SECRET",
                value: format!(
                    "{} bytes (need at least {MIN_TOKEN_SECRET_BYTES})",
                    token_secret.len()
                ),
            });
        }
        if args.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "TALENT_TOKEN_TTL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            http_addr: args.http_addr,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            max_body_bytes: args.max_body_bytes,
            db_namespace: args.db_namespace,
            db_name: args.db_name,
            db_in_memory,
            db_uri,
            db_username,
            db_password,
            token_secret,
            token_ttl: Duration::from_secs(args.token_ttl_secs),
        })
    }
}
