//! Cart persistence across the two storage scopes.

use std::sync::Arc;

use thali::{cart::CartStore, entries::CartEntry};

use super::{KeyValueStore, StorageError};

/// Durable-scope key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Durable-scope key holding the derived item count for the badge.
pub const CART_COUNT_KEY: &str = "cartCount";

/// Tab-scope key holding the checkout hand-off copy of the cart.
pub const CHECKOUT_CART_KEY: &str = "checkoutCart";

/// Durable-scope keys caching the signed-in profile; cleared on sign-out.
const PROFILE_KEYS: [&str; 4] = ["userEmail", "userId", "userName", "userType"];

/// Mirrors the cart store into the durable and tab scopes and restores it
/// on load.
///
/// The serialized cart and the derived count are always written together,
/// so the badge cannot drift from the cart contents.
#[derive(Clone)]
pub struct CartStorage {
    durable: Arc<dyn KeyValueStore>,
    tab: Arc<dyn KeyValueStore>,
}

impl CartStorage {
    #[must_use]
    pub fn new(durable: Arc<dyn KeyValueStore>, tab: Arc<dyn KeyValueStore>) -> Self {
        CartStorage { durable, tab }
    }

    /// Persists the cart: durable cart + count, and the tab-scope checkout
    /// copy.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or a backend write fails.
    pub fn save(&self, cart: &CartStore) -> Result<(), StorageError> {
        let payload = serde_json::to_string(cart.entries()).map_err(StorageError::Encode)?;

        self.durable.set(CART_KEY, &payload)?;
        self.durable
            .set(CART_COUNT_KEY, &cart.item_count().to_string())?;
        self.tab.set(CHECKOUT_CART_KEY, &payload)?;

        Ok(())
    }

    /// Restores the cart: the tab scope wins when present, otherwise the
    /// durable copy is used and backfilled into the tab scope.
    ///
    /// A corrupt or incompatible payload restores as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error only when a backend read or write fails.
    pub fn load(&self) -> Result<CartStore, StorageError> {
        let payload = match self.tab.get(CHECKOUT_CART_KEY)? {
            Some(payload) => Some(payload),
            None => {
                let payload = self.durable.get(CART_KEY)?;

                if let Some(payload) = &payload {
                    self.tab.set(CHECKOUT_CART_KEY, payload)?;
                }

                payload
            }
        };

        let Some(payload) = payload else {
            return Ok(CartStore::new());
        };

        match serde_json::from_str::<Vec<CartEntry>>(&payload) {
            Ok(entries) => Ok(CartStore::from_entries(entries)),
            Err(_) => Ok(CartStore::new()),
        }
    }

    /// Removes the cart from both scopes along with the count key; used
    /// after a committed order or an explicit cancel.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend delete fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.durable.remove(CART_KEY)?;
        self.durable.remove(CART_COUNT_KEY)?;
        self.tab.remove(CHECKOUT_CART_KEY)?;

        Ok(())
    }

    /// Reads the stored badge count; an absent or unreadable value is zero.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend read fails.
    pub fn badge_count(&self) -> Result<u64, StorageError> {
        Ok(self
            .durable
            .get(CART_COUNT_KEY)?
            .and_then(|count| count.parse().ok())
            .unwrap_or(0))
    }

    /// Removes the cached profile keys from the durable scope; the cart
    /// keys are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend delete fails.
    pub fn clear_profile(&self) -> Result<(), StorageError> {
        for key in PROFILE_KEYS {
            self.durable.remove(key)?;
        }

        Ok(())
    }
}
