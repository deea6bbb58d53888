use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Process-wide configuration, resolved once from defaults and `SITEDASH_*` env vars.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::load().unwrap_or_else(|e| panic!("invalid sitedash configuration: {e}"))
});

/// Upper bound on `session_ttl_hours`: ten years.
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 365 * 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub db_max_connections: u32,
    /// Lifetime of a login session. Sessions are never extended.
    pub session_ttl_hours: u32,
    /// Interval of the expired-session sweep; `0` disables it.
    pub session_sweep_secs: u64,
    pub argon2_memory_kib: u32,
    pub argon2_iterations: u32,
    pub argon2_parallelism: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://sitedash.db".to_string(),
            listen_addr: "0.0.0.0:8080".to_string(),
            loglevel: "info".to_string(),
            db_max_connections: 5,
            session_ttl_hours: 24,
            session_sweep_secs: 3600,
            argon2_memory_kib: argon2::Params::DEFAULT_M_COST,
            argon2_iterations: argon2::Params::DEFAULT_T_COST,
            argon2_parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("SITEDASH_"))
            .extract()?;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&cfg.session_ttl_hours) {
            return Err(figment::Error::from(format!(
                "session_ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}, got {}",
                cfg.session_ttl_hours
            )));
        }
        Ok(cfg)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.session_ttl_hours))
    }
}
