//! Process configuration assembled from CLI flags and environment variables.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::{
    cli::ServeArgs,
    error::{BuzzerError, Result},
    API_KEY_ENV_VAR, BASE_URL_ENV_VAR, BCRYPT_COST_ENV_VAR, CACHE_TTL_ENV_VAR, JWT_SECRET_ENV_VAR,
    REQUEST_TIMEOUT_ENV_VAR, TEAMS_CACHE_TTL_ENV_VAR, TOKEN_TTL_ENV_VAR,
};

/// Base URL of the balldontlie statistics API.
pub const DEFAULT_NBA_BASE_URL: &str = "https://api.balldontlie.io";

/// Settings for the upstream statistics client.
#[derive(Debug, Clone)]
pub struct NbaConfig {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    /// TTL of the team list, which rarely changes.
    pub teams_ttl: Duration,
    /// TTL of every other endpoint.
    pub default_ttl: Duration,
}

impl NbaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_NBA_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            teams_ttl: Duration::from_secs(60 * 60),
            default_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Settings for token issuance and password hashing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    pub log_level: String,
    pub nba: NbaConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Build the configuration from CLI arguments and the process environment.
    pub fn from_env(args: ServeArgs) -> Result<Self> {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    /// Build the configuration using `lookup` to resolve environment variables.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(args: ServeArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| BuzzerError::MissingEnv {
                env_var: key.to_string(),
            })
        };
        let seconds = |key: &str| -> Result<Option<Duration>> {
            get(key)
                .map(|raw| raw.trim().parse::<u64>().map(Duration::from_secs))
                .transpose()
                .map_err(BuzzerError::from)
        };

        let mut nba = NbaConfig::new(require(API_KEY_ENV_VAR)?);
        if let Some(base_url) = get(BASE_URL_ENV_VAR) {
            nba.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = seconds(REQUEST_TIMEOUT_ENV_VAR)? {
            nba.request_timeout = timeout;
        }
        if let Some(ttl) = seconds(TEAMS_CACHE_TTL_ENV_VAR)? {
            nba.teams_ttl = ttl;
        }
        if let Some(ttl) = seconds(CACHE_TTL_ENV_VAR)? {
            nba.default_ttl = ttl;
        }

        let mut auth = AuthConfig::new(require(JWT_SECRET_ENV_VAR)?);
        if let Some(ttl) = seconds(TOKEN_TTL_ENV_VAR)? {
            auth.token_ttl = ttl;
        }
        if let Some(cost) = get(BCRYPT_COST_ENV_VAR) {
            let cost: u32 = cost.trim().parse()?;
            if !(4..=31).contains(&cost) {
                return Err(BuzzerError::Config {
                    message: format!("{BCRYPT_COST_ENV_VAR} must be between 4 and 31, got {cost}"),
                });
            }
            auth.bcrypt_cost = cost;
        }

        Ok(Self {
            bind: args.bind,
            database_path: args.database,
            upload_dir: args.upload_dir,
            log_level: args.log_level,
            nba,
            auth,
        })
    }
}
