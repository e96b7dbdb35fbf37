//! Alahas
//!
//! Alahas is the session-local shopping cart engine for a direct-to-consumer
//! jewelry storefront. It keeps an ordered record of what a shopper intends to
//! buy, independent of backend connectivity, and persists it across reloads
//! through a pluggable [`store::CartStore`].

pub mod cart;
pub mod prelude;
pub mod prices;
pub mod snapshot;
pub mod store;
