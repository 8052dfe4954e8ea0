//! Restaurants, pizzas and the priced offers between them, stored in MySQL
//! through diesel and serialized to JSON mappings for API responses.

#[macro_use]
extern crate diesel;

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod schema;
pub mod serializer;
pub mod validation;

pub use error::Error;
