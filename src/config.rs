use std::{env, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Development fallback, never for production.
const DEFAULT_ADMIN_TOKEN: &str = "admin_secret_token";

pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    pub admin_token: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "1111"),
            database_path: try_load("DATABASE_PATH", "feedback.db"),
            admin_token: load_admin_token(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Admin token resolution order: swarm secret file, then environment
/// variable, then the development default.
fn load_admin_token() -> String {
    let path = "/run/secrets/ADMIN_TOKEN";

    if let Ok(secret) = read_to_string(path) {
        return secret.trim().to_string();
    }

    match env::var("ADMIN_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            warn!("ADMIN_TOKEN not set, using the development default");
            DEFAULT_ADMIN_TOKEN.to_string()
        }
    }
}
