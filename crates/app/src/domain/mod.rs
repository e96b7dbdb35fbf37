//! Storefront domain concerns.

pub mod catalog;
pub mod lives;
pub mod orders;
pub mod payments;
pub mod users;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a batch of gateway rows into typed models.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_value(Value::Array(rows))
}
