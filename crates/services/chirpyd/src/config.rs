//! Server configuration read from the environment.

use std::fmt::{self, Display};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::prelude::*;

pub const ADDR_ENV: &str = "CHIRPY_ADDR";
pub const FILEPATH_ROOT_ENV: &str = "FILEPATH_ROOT";
pub const PLATFORM_ENV: &str = "PLATFORM";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FILEPATH_ROOT: &str = ".";

/// Deployment platform. Only `dev` allows destructive admin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Dev,
    #[default]
    Other,
}

impl Platform {
    pub fn parse(value: &str) -> Self {
        if value == "dev" {
            Platform::Dev
        } else {
            Platform::Other
        }
    }

    pub fn is_dev(&self) -> bool {
        *self == Platform::Dev
    }
}

/// Everything `chirpyd` needs besides the database and the signing secret.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Directory served under `/app/`.
    pub filepath_root: PathBuf,
    pub platform: Platform,
}

impl ServerConfig {
    /// Reads `CHIRPY_ADDR`, `FILEPATH_ROOT` and `PLATFORM`, all optional.
    pub fn from_env() -> Result<Self> {
        let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| String::from(DEFAULT_ADDR));
        let filepath_root =
            std::env::var(FILEPATH_ROOT_ENV).unwrap_or_else(|_| String::from(DEFAULT_FILEPATH_ROOT));
        let platform = std::env::var(PLATFORM_ENV).unwrap_or_default();

        Ok(Self {
            addr: parse_addr(&addr)?,
            filepath_root: PathBuf::from(filepath_root),
            platform: Platform::parse(&platform),
        })
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .map_err(|err| Error::InvalidAddress(String::from(addr), err))
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr={} filepath_root={} platform={:?}",
            self.addr,
            self.filepath_root.display(),
            self.platform
        )
    }
}
