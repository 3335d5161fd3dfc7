//! # Process Configuration
//!
//! Environment-provided settings: the database connection string and the
//! HTTP listener address.

use std::env;

use crate::http_server::HttpServerConfig;

/// Process configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// MongoDB connection string (`MONGODB_URI`, required)
    pub database_url: String,
    /// HTTP listener settings (`HOST`, `PORT`)
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file
    /// first if one exists
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("MONGODB_URI")?,
            http: HttpServerConfig::from_env(),
        })
    }
}
