//! Write-time checks on association fields.

use crate::error::Error;

pub const MIN_PRICE: i32 = 1;
pub const MAX_PRICE: i32 = 30;

/// Accepts a price in `MIN_PRICE..=MAX_PRICE` and returns it unchanged.
///
/// Callers run this inside the transaction that performs the write, so a
/// rejected price never reaches the table.
pub fn validate_price(price: i32) -> Result<i32, Error> {
    if (MIN_PRICE..=MAX_PRICE).contains(&price) {
        Ok(price)
    } else {
        log::warn!("rejected price {} (allowed {}..={})", price, MIN_PRICE, MAX_PRICE);
        Err(Error::InvalidValue {
            field: "price",
            value: price,
        })
    }
}
