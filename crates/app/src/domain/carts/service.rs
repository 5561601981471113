//! Cart session service.

use std::sync::Arc;

use thali::{
    cart::CartStore,
    entries::{CartEntry, DishName, NewEntry, SellerId},
};
use tracing::debug;

use crate::{
    identity::IdentityProvider,
    storage::CartStorage,
};

use super::errors::CartSessionError;

/// The UI-facing cart surface for one page view.
///
/// Owns the in-memory cart store and keeps both storage scopes (and the
/// derived badge count) in sync on every mutation. Adding an item requires
/// a signed-in identity; quantity changes and removals do not.
pub struct CartSession {
    store: CartStore,
    storage: CartStorage,
    identity: Arc<dyn IdentityProvider>,
}

impl CartSession {
    #[must_use]
    pub fn new(storage: CartStorage, identity: Arc<dyn IdentityProvider>) -> Self {
        CartSession {
            store: CartStore::new(),
            storage,
            identity,
        }
    }

    /// Restores the cart from storage, replacing the in-memory state.
    ///
    /// # Errors
    ///
    /// Returns an error when a storage backend read fails.
    pub fn restore(&mut self) -> Result<(), CartSessionError> {
        self.store = self.storage.load()?;

        Ok(())
    }

    /// Adds a dish under the given seller and persists the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartSessionError::NotSignedIn`] when nobody is signed in;
    /// the cart is left untouched in that case.
    pub async fn add_item(
        &mut self,
        dish: NewEntry,
        seller: SellerId,
    ) -> Result<(), CartSessionError> {
        if self.identity.current_user().await?.is_none() {
            return Err(CartSessionError::NotSignedIn);
        }

        debug!(dish = %dish.name, seller = %seller, "adding dish to cart");

        self.store.add(dish, seller);
        self.persist()
    }

    /// Sets the quantity of the named entry (zero removes it) and persists.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails.
    pub fn set_quantity(&mut self, name: &DishName, quantity: u32) -> Result<(), CartSessionError> {
        self.store.set_quantity(name, quantity);
        self.persist()
    }

    /// Removes the named entry and persists.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails.
    pub fn remove_item(&mut self, name: &DishName) -> Result<(), CartSessionError> {
        self.store.remove(name);
        self.persist()
    }

    /// An ordered copy of the entries, for rendering or checkout hand-off.
    pub fn snapshot(&self) -> Vec<CartEntry> {
        self.store.snapshot()
    }

    /// The badge number: the sum of entry quantities.
    pub fn badge_count(&self) -> u64 {
        self.store.item_count()
    }

    /// Whether the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Empties the cart and removes it from both storage scopes.
    ///
    /// # Errors
    ///
    /// Returns an error when a storage backend delete fails.
    pub fn clear(&mut self) -> Result<(), CartSessionError> {
        self.store.clear();
        self.storage.clear()?;

        Ok(())
    }

    /// Signs the user out and drops the cached profile keys; the stored
    /// cart is kept for the next session.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider or storage fails.
    pub async fn sign_out(&self) -> Result<(), CartSessionError> {
        self.identity.sign_out().await?;
        self.storage.clear_profile()?;

        Ok(())
    }

    fn persist(&self) -> Result<(), CartSessionError> {
        self.storage.save(&self.store)?;

        Ok(())
    }
}
