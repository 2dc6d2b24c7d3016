/// The ordered set of products picked for comparison
///
/// Membership is persisted as a JSON array of product ids after every
/// change, and rebuilt against the catalog at startup. None of the
/// operations fail: duplicate adds, unknown removals and adds past
/// capacity all come back as an unchanged selection.

use std::collections::HashSet;

use super::catalog::Catalog;
use super::data::Product;
use super::store::{KeyValueStore, StoreResult};

/// Store key holding the selected product ids
pub const SELECTION_KEY: &str = "comparison-selected-products";

/// Default number of products that can be compared at once
pub const DEFAULT_CAPACITY: usize = 3;

/// Why a selection request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Already holding `capacity` products
    Full,
}

/// Outcome of a selection operation. Callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Cleared,
    Rejected(Rejection),
    Unchanged,
}

impl SelectionChange {
    /// Whether membership actually changed
    pub fn is_change(self) -> bool {
        matches!(
            self,
            SelectionChange::Added | SelectionChange::Removed | SelectionChange::Cleared
        )
    }
}

#[derive(Debug, Clone)]
pub struct SelectionStore {
    products: Vec<Product>,
    capacity: usize,
}

impl SelectionStore {
    /// Empty selection holding at most `capacity` products
    pub fn new(capacity: usize) -> Self {
        Self {
            products: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild the selection from the ids persisted in `store`.
    ///
    /// Ids that no longer resolve against `catalog` are dropped, as are
    /// repeats and anything past `capacity`. Persisted order is kept.
    /// Read failures and malformed values fall back to an empty selection.
    pub fn rehydrate(catalog: &Catalog, store: &dyn KeyValueStore, capacity: usize) -> Self {
        let mut selection = Self::new(capacity);

        let ids = match load_ids(store) {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!("⚠️  Could not restore selection, starting empty: {}", e);
                return selection;
            }
        };

        let mut seen = HashSet::new();
        for id in &ids {
            if selection.products.len() >= selection.capacity {
                break;
            }
            if !seen.insert(id.as_str()) {
                continue;
            }
            match catalog.get(id) {
                Some(product) => selection.products.push(product.clone()),
                None => log::debug!("Dropping stale product id '{}'", id),
            }
        }

        log::info!(
            "🔁 Restored {} of {} saved products",
            selection.products.len(),
            ids.len()
        );

        selection
    }

    /// Remove `product` if selected, otherwise append it if there is room
    pub fn toggle(&mut self, product: &Product, store: &mut dyn KeyValueStore) -> SelectionChange {
        let change = if let Some(index) = self.position(&product.id) {
            self.products.remove(index);
            SelectionChange::Removed
        } else if self.is_full() {
            SelectionChange::Rejected(Rejection::Full)
        } else {
            self.products.push(product.clone());
            SelectionChange::Added
        };

        self.persist_if_changed(change, store);
        change
    }

    /// Remove the product with `id`, if present
    pub fn remove(&mut self, id: &str, store: &mut dyn KeyValueStore) -> SelectionChange {
        let change = match self.position(id) {
            Some(index) => {
                self.products.remove(index);
                SelectionChange::Removed
            }
            None => SelectionChange::Unchanged,
        };

        self.persist_if_changed(change, store);
        change
    }

    /// Empty the selection
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) -> SelectionChange {
        let change = if self.products.is_empty() {
            SelectionChange::Unchanged
        } else {
            self.products.clear();
            SelectionChange::Cleared
        };

        self.persist_if_changed(change, store);
        change
    }

    /// Selected products in selection order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ids(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.products.len() >= self.capacity
    }

    /// Number of empty placeholder slots left
    pub fn open_slots(&self) -> usize {
        self.capacity.saturating_sub(self.products.len())
    }

    /// At least two products are needed for a comparison
    pub fn can_compare(&self) -> bool {
        self.products.len() >= 2
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn persist_if_changed(&self, change: SelectionChange, store: &mut dyn KeyValueStore) {
        if !change.is_change() {
            return;
        }
        log::debug!("Selection {:?}: {:?}", change, self.ids());
        if let Err(e) = self.persist(store) {
            log::warn!("⚠️  Could not save selection: {}", e);
        }
    }

    fn persist(&self, store: &mut dyn KeyValueStore) -> StoreResult<()> {
        let json = serde_json::to_string(&self.ids())?;
        store.set(SELECTION_KEY, &json)
    }
}

/// Persisted ids; an absent key means an empty selection
fn load_ids(store: &dyn KeyValueStore) -> StoreResult<Vec<String>> {
    match store.get(SELECTION_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
