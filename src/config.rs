//! Environment configuration and connection pool setup.

use std::env;

use diesel::mysql::MysqlConnection;
use diesel::r2d2::{self, ConnectionManager};

use crate::error::Error;

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;

const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
}

impl Config {
    /// Reads `DATABASE_URL` (required) and `DATABASE_POOL_SIZE` from the
    /// environment, after loading `.env` if one is present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_vars(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_POOL_SIZE").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, pool_size: Option<String>) -> Result<Self, Error> {
        let database_url =
            database_url.ok_or_else(|| Error::Config("DATABASE_URL is not set".to_string()))?;
        let pool_size = match pool_size {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(Error::Config(format!(
                        "DATABASE_POOL_SIZE must be a positive integer, got {:?}",
                        raw
                    )))
                }
            },
            None => DEFAULT_POOL_SIZE,
        };
        Ok(Self {
            database_url,
            pool_size,
        })
    }

    pub fn build_pool(&self) -> Result<DbPool, Error> {
        let manager = ConnectionManager::<MysqlConnection>::new(self.database_url.as_str());
        let pool = r2d2::Pool::builder()
            .max_size(self.pool_size)
            .build(manager)?;
        log::debug!("database pool ready (max_size {})", self.pool_size);
        Ok(pool)
    }
}
