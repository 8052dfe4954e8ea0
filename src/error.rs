use thiserror::Error;

/// Errors raised by the restaurant/pizza data layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A field was given a value outside its allowed range. The write is rejected.
    #[error("invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: i32 },

    /// A referenced row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// The database handed back an id that does not fit the `INTEGER` id columns.
    #[error("generated id out of range: {0}")]
    IdOutOfRange(u64),

    #[error("pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("configuration error: {0}")]
    Config(String),
}
