use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "dist/public";
pub const DEFAULT_DEV_SERVER_URL: &str = "http://127.0.0.1:5173";

/// Asset-serving mode, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub mode: Mode,
    pub static_dir: PathBuf,
    pub dev_server_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Never fails: absent or unparsable values fall back to documented
    /// defaults with a warning.
    pub fn from_env() -> Self {
        Self::from_parts(
            env::var("HOST").ok(),
            env::var("PORT").ok(),
            env::var("APP_ENV").ok(),
            env::var("STATIC_DIR").ok(),
            env::var("DEV_SERVER_URL").ok(),
        )
    }

    fn from_parts(
        host: Option<String>,
        port: Option<String>,
        app_env: Option<String>,
        static_dir: Option<String>,
        dev_server_url: Option<String>,
    ) -> Self {
        let host = match host {
            Some(raw) => raw.parse::<IpAddr>().unwrap_or_else(|_| {
                warn!(host = %raw, "invalid HOST, binding all interfaces");
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            }),
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match port {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(port = %raw, fallback = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let mode = match app_env {
            Some(raw) if raw.eq_ignore_ascii_case("production") => Mode::Production,
            _ => Mode::Development,
        };

        Self {
            host,
            port,
            mode,
            static_dir: static_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            dev_server_url: dev_server_url.unwrap_or_else(|| DEFAULT_DEV_SERVER_URL.to_string()),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
