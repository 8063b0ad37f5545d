use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use dotenv::dotenv;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_KEYGEN_PROGRAM: &str = "ssh-keygen";
pub const DEFAULT_KEYGEN_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub address: IpAddr,
    pub port: u16,
    pub keygen_program: PathBuf,
    pub scratch_dir: PathBuf,
    pub keygen_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            keygen_program: PathBuf::from(DEFAULT_KEYGEN_PROGRAM),
            scratch_dir: env::temp_dir(),
            keygen_timeout: Duration::from_secs(DEFAULT_KEYGEN_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs: u64 = parse_var(&lookup, "KEYGEN_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_KEYGEN_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("KEYGEN_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            address: parse_var(&lookup, "ADDRESS")?.unwrap_or(defaults.address),
            port: parse_var(&lookup, "PORT")?.unwrap_or(defaults.port),
            keygen_program: lookup("SSH_KEYGEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.keygen_program),
            scratch_dir: lookup("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.scratch_dir),
            keygen_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid {name} `{raw}`"))
        })
        .transpose()
}
