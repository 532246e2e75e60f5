//! Server configuration
//!
//! Read once from the environment at startup (after `.env` is loaded).

use std::net::SocketAddr;

use account::AccountConfig;
use anyhow::Context;
use ledger::LedgerConfig;
use platform::config;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Everything the composition root needs
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Postgres is used when set, the in-memory backend otherwise
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub account: AccountConfig,
    pub ledger: LedgerConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 31113)),
            database_url: None,
            frontend_origins: config::split_list(DEFAULT_FRONTEND_ORIGINS),
            account: AccountConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load from `BIND_ADDR`, `DATABASE_URL`, `FRONTEND_ORIGINS` and `PASSWORD_PEPPER`
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = config::or_default("BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("BIND_ADDR is not a socket address: {bind_addr}"))?;

        let frontend_origins =
            config::split_list(&config::or_default("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)?);

        let account = AccountConfig {
            password_pepper: config::optional_secret("PASSWORD_PEPPER")?,
            ..AccountConfig::default()
        };

        Ok(Self {
            bind_addr,
            database_url: config::optional("DATABASE_URL")?,
            frontend_origins,
            account,
            ledger: LedgerConfig::default(),
        })
    }
}
