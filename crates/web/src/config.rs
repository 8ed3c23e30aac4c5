use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root for the flat-file backend: `<data_dir>/profiles.json` plus a
    /// `<data_dir>/pictures/` blob directory.
    pub data_dir: PathBuf,
    /// When set, the relational backend is used instead of the flat file.
    pub database_url: Option<String>,
    /// Production deployments redact error detail from response bodies.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            database_url: std::env::var("DATABASE_URL").ok(),
            production: std::env::var("APP_ENV")
                .map(|env| env == "production")
                .unwrap_or(false),
        })
    }
}
