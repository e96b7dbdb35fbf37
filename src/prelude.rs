//! Alahas prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    prices::format_php,
    snapshot::ProductSnapshot,
    store::{CartStore, CartStoreError, JsonFileStore, StoredCart},
};
