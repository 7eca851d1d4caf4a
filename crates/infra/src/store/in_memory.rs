//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use naycourse_audit::AuditEntry;
use naycourse_core::{AuditEntryId, CourierId, OrderId, UserId, VaultEntryId};
use naycourse_couriers::Courier;
use naycourse_orders::{Order, OrderRef, OrderState, Parcel, Receiver, Sender};
use naycourse_vault::VaultEntry;

use super::{AuditStore, CounterStore, CourierStore, OrderStore, VaultStore};
use crate::error::StoreError;

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

/// In-memory per-year counters.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    counters: RwLock<HashMap<i32, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn increment(&self, year: i32) -> Result<u64, StoreError> {
        let mut counters = self.counters.write().map_err(|_| poisoned())?;
        let seq = counters.entry(year).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

/// In-memory order + satellite storage.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    senders: RwLock<HashMap<OrderRef, Sender>>,
    receivers: RwLock<HashMap<OrderRef, Receiver>>,
    parcels: RwLock<HashMap<OrderRef, Parcel>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        if orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(format!("order id {}", order.id)));
        }
        if orders.values().any(|o| o.order_ref == order.order_ref) {
            return Err(StoreError::Duplicate(format!(
                "order reference {}",
                order.order_ref
            )));
        }
        orders.insert(order.id, order);
        Ok(())
    }

    fn insert_sender(&self, sender: Sender) -> Result<(), StoreError> {
        let mut senders = self.senders.write().map_err(|_| poisoned())?;
        senders.insert(sender.order_ref.clone(), sender);
        Ok(())
    }

    fn insert_receiver(&self, receiver: Receiver) -> Result<(), StoreError> {
        let mut receivers = self.receivers.write().map_err(|_| poisoned())?;
        receivers.insert(receiver.order_ref.clone(), receiver);
        Ok(())
    }

    fn insert_parcel(&self, parcel: Parcel) -> Result<(), StoreError> {
        let mut parcels = self.parcels.write().map_err(|_| poisoned())?;
        parcels.insert(parcel.order_ref.clone(), parcel);
        Ok(())
    }

    fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders.get(&id).cloned())
    }

    fn order_by_ref(&self, order_ref: &OrderRef) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders.values().find(|o| &o.order_ref == order_ref).cloned())
    }

    fn orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn orders_for_owner(&self, owner: UserId) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        let mut owned: Vec<Order> = orders
            .values()
            .filter(|o| o.owner_id == Some(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    fn update_order(
        &self,
        order: &Order,
        expected_state: Option<OrderState>,
    ) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        let Some(stored) = orders.get_mut(&order.id) else {
            return Err(StoreError::Concurrency(format!(
                "order {} no longer exists",
                order.id
            )));
        };

        if let Some(expected) = expected_state {
            if stored.state != expected {
                return Err(StoreError::Concurrency(format!(
                    "order {} is '{}', expected '{}'",
                    order.id, stored.state, expected
                )));
            }
        }

        *stored = order.clone();
        Ok(())
    }

    fn remove_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        Ok(orders.remove(&id))
    }

    fn satellites(
        &self,
        order_ref: &OrderRef,
    ) -> Result<(Option<Sender>, Option<Receiver>, Option<Parcel>), StoreError> {
        let senders = self.senders.read().map_err(|_| poisoned())?;
        let receivers = self.receivers.read().map_err(|_| poisoned())?;
        let parcels = self.parcels.read().map_err(|_| poisoned())?;
        Ok((
            senders.get(order_ref).cloned(),
            receivers.get(order_ref).cloned(),
            parcels.get(order_ref).cloned(),
        ))
    }

    fn remove_satellites(&self, order_ref: &OrderRef) -> Result<(), StoreError> {
        self.senders
            .write()
            .map_err(|_| poisoned())?
            .remove(order_ref);
        self.receivers
            .write()
            .map_err(|_| poisoned())?
            .remove(order_ref);
        self.parcels
            .write()
            .map_err(|_| poisoned())?
            .remove(order_ref);
        Ok(())
    }
}

/// In-memory audit/inbox log.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    entries: RwLock<HashMap<AuditEntryId, AuditEntry>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn append(&self, entry: AuditEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(entry.id, entry);
        Ok(())
    }

    fn entry(&self, id: AuditEntryId) -> Result<Option<AuditEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&id).cloned())
    }

    fn entries(&self) -> Result<Vec<AuditEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        let mut all: Vec<AuditEntry> = entries.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    fn update(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        match entries.get_mut(&entry.id) {
            Some(stored) => {
                *stored = entry.clone();
                Ok(())
            }
            None => Err(StoreError::Concurrency(format!(
                "audit entry {} no longer exists",
                entry.id
            ))),
        }
    }

    fn remove(&self, id: AuditEntryId) -> Result<Option<AuditEntry>, StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(entries.remove(&id))
    }
}

/// In-memory courier roster.
#[derive(Debug, Default)]
pub struct InMemoryCourierStore {
    couriers: RwLock<HashMap<CourierId, Courier>>,
}

impl InMemoryCourierStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CourierStore for InMemoryCourierStore {
    fn insert(&self, courier: Courier) -> Result<(), StoreError> {
        let mut couriers = self.couriers.write().map_err(|_| poisoned())?;
        if couriers.values().any(|c| c.phone == courier.phone) {
            return Err(StoreError::Duplicate(format!(
                "courier phone {}",
                courier.phone
            )));
        }
        couriers.insert(courier.id, courier);
        Ok(())
    }

    fn courier(&self, id: CourierId) -> Result<Option<Courier>, StoreError> {
        let couriers = self.couriers.read().map_err(|_| poisoned())?;
        Ok(couriers.get(&id).cloned())
    }

    fn couriers(&self) -> Result<Vec<Courier>, StoreError> {
        let couriers = self.couriers.read().map_err(|_| poisoned())?;
        let mut all: Vec<Courier> = couriers.values().cloned().collect();
        all.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(all)
    }

    fn update(&self, courier: &Courier) -> Result<(), StoreError> {
        let mut couriers = self.couriers.write().map_err(|_| poisoned())?;
        if couriers
            .values()
            .any(|c| c.id != courier.id && c.phone == courier.phone)
        {
            return Err(StoreError::Duplicate(format!(
                "courier phone {}",
                courier.phone
            )));
        }
        match couriers.get_mut(&courier.id) {
            Some(stored) => {
                *stored = courier.clone();
                Ok(())
            }
            None => Err(StoreError::Concurrency(format!(
                "courier {} no longer exists",
                courier.id
            ))),
        }
    }

    fn remove(&self, id: CourierId) -> Result<Option<Courier>, StoreError> {
        let mut couriers = self.couriers.write().map_err(|_| poisoned())?;
        Ok(couriers.remove(&id))
    }
}

/// In-memory soft-delete vault.
#[derive(Debug, Default)]
pub struct InMemoryVaultStore {
    entries: RwLock<HashMap<VaultEntryId, VaultEntry>>,
}

impl InMemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VaultStore for InMemoryVaultStore {
    fn insert(&self, entry: VaultEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(entry.id, entry);
        Ok(())
    }

    fn entry(&self, id: VaultEntryId) -> Result<Option<VaultEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&id).cloned())
    }

    fn entries(&self) -> Result<Vec<VaultEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        let mut all: Vec<VaultEntry> = entries.values().cloned().collect();
        all.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(all)
    }

    fn remove(&self, id: VaultEntryId) -> Result<Option<VaultEntry>, StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        Ok(entries.remove(&id))
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.clear();
        Ok(())
    }
}
