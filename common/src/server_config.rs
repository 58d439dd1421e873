use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DbConfig>,
    pub auth: Option<AuthConfig>,
    pub mail: Option<MailConfig>,
    pub frontend_url: Option<String>,
}

static APP_ENV: &str = "APP_ENV";
static APP_PREFIX: &str = "HMS";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();

    let env = env::var(APP_ENV).unwrap_or_else(|_| "dev".into());

    // application.dev.json, application.prod.json, ...
    let config_path = format!("application.{}.json", env);

    let settings = Config::builder()
        .add_source(File::with_name(&config_path).required(true))
        // HMS_DATABASE_URL=... overrides the file
        .add_source(Environment::with_prefix(APP_PREFIX).prefix_separator("_"))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    Ok(app_config)
}
