//! Storage traits.
//!
//! The document store is the only durability and atomicity boundary: no
//! in-process lock is held across operations, and the one read-modify-write
//! path (lifecycle transitions) goes through a conditional update keyed on
//! the state that was read.

pub mod in_memory;

use naycourse_audit::AuditEntry;
use naycourse_core::{AuditEntryId, CourierId, OrderId, UserId, VaultEntryId};
use naycourse_couriers::Courier;
use naycourse_orders::{Order, OrderRef, OrderState, Parcel, Receiver, Sender};
use naycourse_vault::VaultEntry;

use crate::error::StoreError;

/// Per-year sequence counters.
pub trait CounterStore: Send + Sync {
    /// Atomically increment and return the counter for `year`, creating it at
    /// zero if absent. Two concurrent callers never observe the same value.
    fn increment(&self, year: i32) -> Result<u64, StoreError>;
}

/// Orders plus their satellite records.
pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: Order) -> Result<(), StoreError>;
    fn insert_sender(&self, sender: Sender) -> Result<(), StoreError>;
    fn insert_receiver(&self, receiver: Receiver) -> Result<(), StoreError>;
    fn insert_parcel(&self, parcel: Parcel) -> Result<(), StoreError>;

    fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;
    fn order_by_ref(&self, order_ref: &OrderRef) -> Result<Option<Order>, StoreError>;
    /// All orders, newest first.
    fn orders(&self) -> Result<Vec<Order>, StoreError>;
    /// Orders owned by `owner`, newest first.
    fn orders_for_owner(&self, owner: UserId) -> Result<Vec<Order>, StoreError>;

    /// Replace the stored order. When `expected_state` is given, the write
    /// only succeeds if the stored state still matches (optimistic update);
    /// otherwise it fails with [`StoreError::Concurrency`].
    fn update_order(
        &self,
        order: &Order,
        expected_state: Option<OrderState>,
    ) -> Result<(), StoreError>;

    fn remove_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    fn satellites(
        &self,
        order_ref: &OrderRef,
    ) -> Result<(Option<Sender>, Option<Receiver>, Option<Parcel>), StoreError>;

    /// Delete whatever satellites carry `order_ref`. Missing records are not
    /// an error; the owning order may already be gone.
    fn remove_satellites(&self, order_ref: &OrderRef) -> Result<(), StoreError>;
}

/// Append-mostly audit/inbox log.
pub trait AuditStore: Send + Sync {
    fn append(&self, entry: AuditEntry) -> Result<(), StoreError>;
    fn entry(&self, id: AuditEntryId) -> Result<Option<AuditEntry>, StoreError>;
    /// All entries, newest first.
    fn entries(&self) -> Result<Vec<AuditEntry>, StoreError>;
    /// Replace a stored entry (only used for the pending->done flip).
    fn update(&self, entry: &AuditEntry) -> Result<(), StoreError>;
    fn remove(&self, id: AuditEntryId) -> Result<Option<AuditEntry>, StoreError>;
}

/// Courier roster.
pub trait CourierStore: Send + Sync {
    /// Insert; fails with [`StoreError::Duplicate`] when the phone number is
    /// already registered.
    fn insert(&self, courier: Courier) -> Result<(), StoreError>;
    fn courier(&self, id: CourierId) -> Result<Option<Courier>, StoreError>;
    fn couriers(&self) -> Result<Vec<Courier>, StoreError>;
    /// Replace; enforces the same phone uniqueness as `insert`.
    fn update(&self, courier: &Courier) -> Result<(), StoreError>;
    fn remove(&self, id: CourierId) -> Result<Option<Courier>, StoreError>;
}

/// Soft-delete vault.
pub trait VaultStore: Send + Sync {
    fn insert(&self, entry: VaultEntry) -> Result<(), StoreError>;
    fn entry(&self, id: VaultEntryId) -> Result<Option<VaultEntry>, StoreError>;
    /// All entries, most recently deleted first.
    fn entries(&self) -> Result<Vec<VaultEntry>, StoreError>;
    fn remove(&self, id: VaultEntryId) -> Result<Option<VaultEntry>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}
