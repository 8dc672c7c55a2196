use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://lawatch.vercel.app,https://lawatch-git-main-aishi2303.vercel.app,https://lawatch-*.vercel.app";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub admin_passkey: String,
    pub user_passkey: String,
    pub data_dir: PathBuf,
    pub auth_rps: u32,
    pub app_env: String,
    pub allowed_origins: Vec<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            db_max_connections: get_env_parse_or("DB_MAX_CONNECTIONS", 10)?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_ttl_minutes: get_env_parse_or("JWT_TTL_MINUTES", 60)?,
            admin_passkey: get_env("ADMIN_PASSKEY")?,
            user_passkey: get_env("USER_PASSKEY")?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            auth_rps: get_env_parse_or("AUTH_RPS", 10)?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// Origins the CORS layer accepts, including the local dev server when
    /// running in development.
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = self.allowed_origins.clone();
        if self.is_development() {
            origins.push("http://localhost:3000".to_string());
        }
        origins
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
