//! # Receipt Repository
//!
//! In-memory storage for receipts.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  RwLock<HashMap<id, Arc<Receipt>>>                      │
//! │                                                                         │
//! │  get ───────────┐                                                       │
//! │  get ───────────┼──► read lock (shared, many at once)                  │
//! │  len ───────────┘                                                       │
//! │                                                                         │
//! │  insert ────────┐                                                       │
//! │  update ────────┼──► write lock (exclusive)                            │
//! │  delete ────────┘                                                       │
//! │                                                                         │
//! │  Values are Arc<Receipt>. `get` hands out a clone of the Arc: callers  │
//! │  share the stored receipt but can never mutate it. `update` swaps the  │
//! │  Arc, so a reader holding the old one keeps a complete old receipt.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reward_core::Receipt;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

type ReceiptMap = HashMap<String, Arc<Receipt>>;

/// Repository for receipts, safe to share across threads.
///
/// ## Usage
/// ```rust
/// # use chrono::{NaiveDate, NaiveTime};
/// # use reward_core::{Item, Money, Receipt};
/// use reward_store::ReceiptStore;
///
/// # let receipt = Receipt::new(
/// #     "Target",
/// #     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
/// #     NaiveTime::from_hms_opt(13, 1, 0).unwrap(),
/// #     vec![Item::new("Pepsi", Money::from_cents(125))],
/// #     Money::from_cents(125),
/// # );
/// let store = ReceiptStore::new();
/// let id = receipt.id.clone();
///
/// store.insert(receipt).unwrap();
/// assert_eq!(store.get(&id).unwrap().retailer, "Target");
/// ```
#[derive(Debug, Default)]
pub struct ReceiptStore {
    receipts: RwLock<ReceiptMap>,
}

impl ReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ReceiptStore::default()
    }

    /// Adds a new receipt.
    ///
    /// ## Returns
    /// * `Ok(())` - Receipt stored
    /// * `Err(StoreError::Duplicate)` - A receipt with this id already exists
    pub fn insert(&self, receipt: Receipt) -> StoreResult<()> {
        debug!(id = %receipt.id, "Inserting receipt");

        let mut receipts = self.write()?;
        if receipts.contains_key(&receipt.id) {
            return Err(StoreError::duplicate(receipt.id));
        }

        receipts.insert(receipt.id.clone(), Arc::new(receipt));
        Ok(())
    }

    /// Gets a receipt by its id.
    ///
    /// ## Returns
    /// * `Ok(Arc<Receipt>)` - Shared handle to the stored receipt
    /// * `Err(StoreError::NotFound)` - No receipt with this id
    pub fn get(&self, id: &str) -> StoreResult<Arc<Receipt>> {
        debug!(id = %id, "Fetching receipt");

        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Replaces an existing receipt wholesale.
    ///
    /// ## Returns
    /// * `Ok(())` - Receipt replaced
    /// * `Err(StoreError::NotFound)` - No receipt with this id
    pub fn update(&self, receipt: Receipt) -> StoreResult<()> {
        debug!(id = %receipt.id, "Updating receipt");

        let mut receipts = self.write()?;
        match receipts.get_mut(&receipt.id) {
            Some(slot) => {
                *slot = Arc::new(receipt);
                Ok(())
            }
            None => Err(StoreError::not_found(receipt.id)),
        }
    }

    /// Removes a receipt.
    ///
    /// ## Returns
    /// * `Ok(())` - Receipt removed
    /// * `Err(StoreError::NotFound)` - No receipt with this id
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting receipt");

        self.write()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Number of stored receipts.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, ReceiptMap>> {
        self.receipts.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, ReceiptMap>> {
        self.receipts.write().map_err(|_| StoreError::LockPoisoned)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use reward_core::{Item, Money};

    fn receipt(retailer: &str) -> Receipt {
        Receipt::new(
            retailer,
            NaiveDate::from_ymd_opt(2022, 3, 20).unwrap(),
            NaiveTime::from_hms_opt(14, 33, 0).unwrap(),
            vec![
                Item::new("Gatorade", Money::from_cents(225)),
                Item::new("Gatorade", Money::from_cents(225)),
            ],
            Money::from_cents(450),
        )
    }

    #[test]
    fn test_insert_then_get() {
        let store = ReceiptStore::new();
        let r = receipt("M&M Corner Market");
        let id = r.id.clone();

        store.insert(r.clone()).unwrap();

        let stored = store.get(&id).unwrap();
        assert_eq!(*stored, r);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_insert_duplicate() {
        let store = ReceiptStore::new();
        let r = receipt("Target");
        let id = r.id.clone();

        store.insert(r.clone()).unwrap();
        assert_eq!(store.insert(r), Err(StoreError::duplicate(id)));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = ReceiptStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.get("nope"), Err(StoreError::not_found("nope")));
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let store = ReceiptStore::new();
        let original = receipt("Target");
        let id = original.id.clone();
        store.insert(original).unwrap();

        let before = store.get(&id).unwrap();

        let mut changed = receipt("Walgreens");
        changed.id = id.clone();
        changed.items.truncate(1);
        store.update(changed).unwrap();

        let after = store.get(&id).unwrap();
        assert_eq!(after.retailer, "Walgreens");
        assert_eq!(after.items.len(), 1);

        // Earlier readers keep the snapshot they were handed.
        assert_eq!(before.retailer, "Target");
        assert_eq!(before.items.len(), 2);
    }

    #[test]
    fn test_update_missing() {
        let store = ReceiptStore::new();
        let r = receipt("Target");
        let id = r.id.clone();

        assert_eq!(store.update(r), Err(StoreError::not_found(id)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_delete() {
        let store = ReceiptStore::new();
        let r = receipt("Target");
        let id = r.id.clone();
        store.insert(r).unwrap();

        store.delete(&id).unwrap();
        assert_eq!(store.get(&id), Err(StoreError::not_found(id.as_str())));
        assert_eq!(store.delete(&id), Err(StoreError::not_found(id.as_str())));
    }

    #[test]
    fn test_concurrent_inserts_and_reads() {
        let store = ReceiptStore::new();
        let receipts: Vec<Receipt> = (0..64).map(|i| receipt(&format!("Shop {i}"))).collect();
        let ids: Vec<String> = receipts.iter().map(|r| r.id.clone()).collect();

        std::thread::scope(|s| {
            for r in receipts {
                let store = &store;
                s.spawn(move || store.insert(r).unwrap());
            }
        });

        assert_eq!(store.len().unwrap(), 64);

        std::thread::scope(|s| {
            for id in &ids {
                let store = &store;
                s.spawn(move || assert_eq!(&store.get(id).unwrap().id, id));
            }
        });
    }
}
