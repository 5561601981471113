//! Cart store

use crate::entries::{CartEntry, DishName, NewEntry, SellerId};

/// The canonical, ordered list of cart entries.
///
/// Entry identity is the dish name (exact match); quantities are always at
/// least one, and an entry whose quantity would drop below one is removed
/// instead of stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartStore {
    entries: Vec<CartEntry>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Rebuilds a cart from restored entries.
    ///
    /// Entries with a zero quantity are dropped rather than kept, so a
    /// stale payload cannot reintroduce an invalid entry.
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        CartStore {
            entries: entries
                .into_iter()
                .filter(|entry| entry.quantity >= 1)
                .collect(),
        }
    }

    /// Adds a dish to the cart under the given seller.
    ///
    /// An entry with the same name has its quantity incremented and its
    /// seller association overwritten (last writer wins); otherwise a new
    /// entry with quantity one is appended.
    pub fn add(&mut self, dish: NewEntry, seller: SellerId) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.name == dish.name)
        {
            existing.quantity += 1;
            existing.seller_id = Some(seller);
            return;
        }

        self.entries.push(CartEntry {
            name: dish.name,
            price: dish.price,
            quantity: 1,
            image_url: dish.image_url,
            seller_id: Some(seller),
        });
    }

    /// Sets the quantity of the named entry; zero removes it.
    ///
    /// No-op when no entry matches.
    pub fn set_quantity(&mut self, name: &DishName, quantity: u32) {
        if quantity < 1 {
            self.entries.retain(|entry| entry.name != *name);
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.name == *name) {
            entry.quantity = quantity;
        }
    }

    /// Removes the named entry; equivalent to setting its quantity to zero.
    pub fn remove(&mut self, name: &DishName) {
        self.set_quantity(name, 0);
    }

    /// Returns an ordered copy of the entries, for rendering and checkout.
    pub fn snapshot(&self) -> Vec<CartEntry> {
        self.entries.clone()
    }

    /// Returns the entries as a slice.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of all entry quantities; the cart badge number.
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
