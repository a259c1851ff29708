use crate::error::ConfigError;

const DEFAULT_DATABASE: &str = "ExpenseSplitter";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub mongodb_uri: String,
    pub database: String,
    pub bind_address: String,
    pub port: u16,
    /// When unset, any origin may call the API.
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mongodb_uri = lookup("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        Ok(Config {
            mongodb_uri,
            database: lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            allowed_origin: lookup("ALLOWED_ORIGIN").filter(|origin| !origin.is_empty()),
        })
    }
}
