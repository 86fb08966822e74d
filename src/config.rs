use eyre::{eyre, Result, WrapErr};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| eyre!("DATABASE_URL is not set"))?;
        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .wrap_err_with(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", value))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Config {
            database_url,
            bind_address,
            max_connections,
        })
    }
}
