//! Cart persistence
//!
//! The cart survives page reloads through a single durable-storage key
//! holding the serialized line list. Storage is private to one browsing
//! session; there is no concurrent writer.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use uuid::Uuid;

use crate::{cart::Cart, snapshot::ProductSnapshot};

/// Errors raised by a [`CartStore`] backend.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The storage medium could not be read or written.
    #[error("cart storage unavailable")]
    Io(#[from] std::io::Error),

    /// The stored payload could not be encoded or decoded.
    #[error("cart payload is malformed")]
    Serde(#[from] serde_json::Error),
}

/// Durable storage for one session's cart.
pub trait CartStore {
    /// Reads the previously saved cart, or `None` when nothing has been
    /// saved yet.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the medium is unreadable or the
    /// payload is malformed.
    fn load(&self) -> Result<Option<Cart>, CartStoreError>;

    /// Overwrites the saved cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the medium cannot be written.
    fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;
}

/// File-backed [`CartStore`] holding the cart as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Option<Cart>, CartStoreError> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&payload)?))
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let payload = serde_json::to_vec(cart)?;

        fs::write(&self.path, payload)?;

        Ok(())
    }
}

/// A [`Cart`] paired with its durable store.
///
/// Every mutation is persisted as a side effect. A failed save is non-fatal:
/// the in-memory cart stays authoritative for the rest of the session and the
/// wrapper records that it is no longer durably saved.
#[derive(Debug)]
pub struct StoredCart<S: CartStore> {
    cart: Cart,
    store: S,
    durable: bool,
}

impl<S: CartStore> StoredCart<S> {
    /// Rehydrates the cart from `store`, starting empty when nothing was
    /// saved yet or when the store cannot be read.
    pub fn open(store: S) -> Self {
        let (cart, durable) = match store.load() {
            Ok(Some(cart)) => (cart, true),
            Ok(None) => (Cart::new(), true),
            Err(_) => (Cart::new(), false),
        };

        Self {
            cart,
            store,
            durable,
        }
    }

    /// Read access to the in-memory cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether the last mutation reached durable storage.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Adds one unit of `product` and persists.
    pub fn add(&mut self, product: ProductSnapshot) {
        self.cart.add(product);
        self.persist();
    }

    /// Sets a line's quantity (zero or below removes it) and persists.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
        self.persist();
    }

    /// Removes a line and persists.
    pub fn remove(&mut self, product_id: Uuid) {
        self.cart.remove(product_id);
        self.persist();
    }

    /// Empties the cart and persists.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&mut self) {
        self.durable = self.store.save(&self.cart).is_ok();
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn snapshot(price: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: Uuid::new_v4(),
            name: "Gold ring".to_owned(),
            price: Decimal::from(price),
            image_url: None,
            stock: 5,
        }
    }

    #[test]
    fn round_trips_a_non_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");

        let mut stored = StoredCart::open(JsonFileStore::new(&path));
        let product = snapshot(1000);
        let id = product.id;

        stored.add(product);
        stored.add(snapshot(500));
        stored.update_quantity(id, 2);

        assert!(stored.is_durable());

        let reopened = StoredCart::open(JsonFileStore::new(&path));

        assert_eq!(reopened.cart(), stored.cart());

        Ok(())
    }

    #[test]
    fn missing_file_starts_empty() -> TestResult {
        let dir = tempfile::tempdir()?;

        let stored = StoredCart::open(JsonFileStore::new(dir.path().join("cart.json")));

        assert!(stored.cart().is_empty());
        assert!(stored.is_durable());

        Ok(())
    }

    #[test]
    fn corrupt_file_starts_empty_and_not_durable() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");

        fs::write(&path, b"{not json")?;

        let stored = StoredCart::open(JsonFileStore::new(&path));

        assert!(stored.cart().is_empty());
        assert!(!stored.is_durable());

        Ok(())
    }

    struct DenyStore;

    impl CartStore for DenyStore {
        fn load(&self) -> Result<Option<Cart>, CartStoreError> {
            Ok(None)
        }

        fn save(&self, _cart: &Cart) -> Result<(), CartStoreError> {
            Err(CartStoreError::Io(io::Error::from(
                ErrorKind::PermissionDenied,
            )))
        }
    }

    #[test]
    fn failed_save_is_non_fatal() {
        let mut stored = StoredCart::open(DenyStore);

        stored.add(snapshot(1000));

        assert_eq!(stored.cart().total_items(), 1, "in-memory cart must stay correct");
        assert!(!stored.is_durable());
    }

    #[test]
    fn clear_persists_an_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");

        let mut stored = StoredCart::open(JsonFileStore::new(&path));

        stored.add(snapshot(1000));
        stored.clear();

        let reopened = StoredCart::open(JsonFileStore::new(&path));

        assert!(reopened.cart().is_empty());

        Ok(())
    }
}
