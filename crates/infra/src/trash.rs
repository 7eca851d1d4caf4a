//! Soft-delete vault service.
//!
//! Deleting an order or an inbox entry snapshots the full record into the
//! vault before removing it from the live store. Restore is not an undo: a
//! restored order comes back as a new aggregate with a fresh identity and a
//! fresh reference, forced to `pending`, with a back-pointer to the vault
//! entry it came from.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use naycourse_audit::AuditEntry;
use naycourse_core::{DomainError, OrderId, VaultEntryId};
use naycourse_orders::{Order, OrderState};
use naycourse_vault::{TrashItemKind, VaultEntry};

use crate::error::{ServiceResult, StoreError};
use crate::orders::AssembledOrder;
use crate::sequence::OrderRefGenerator;
use crate::store::{AuditStore, CounterStore, OrderStore, VaultStore};

/// What a successful restore brought back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum RestoredItem {
    Order(AssembledOrder),
    Inbox(AuditEntry),
}

pub struct TrashService<S, A, V, C> {
    orders: Arc<S>,
    audit: Arc<A>,
    vault: Arc<V>,
    refs: Arc<OrderRefGenerator<C>>,
}

impl<S, A, V, C> TrashService<S, A, V, C>
where
    S: OrderStore,
    A: AuditStore,
    V: VaultStore,
    C: CounterStore,
{
    pub fn new(
        orders: Arc<S>,
        audit: Arc<A>,
        vault: Arc<V>,
        refs: Arc<OrderRefGenerator<C>>,
    ) -> Self {
        Self {
            orders,
            audit,
            vault,
            refs,
        }
    }

    /// All vault entries, most recently deleted first.
    pub fn list(&self) -> ServiceResult<Vec<VaultEntry>> {
        Ok(self.vault.entries()?)
    }

    /// Snapshot a live record into the vault, then remove it from its store.
    ///
    /// The vault write happens first: if the subsequent removal fails the
    /// record exists twice, which is recoverable, whereas the opposite order
    /// could lose it.
    pub fn move_to_trash(
        &self,
        kind: TrashItemKind,
        raw_id: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<VaultEntry> {
        match kind {
            TrashItemKind::Order => {
                let id: OrderId = raw_id.parse()?;
                let order = self.orders.order(id)?.ok_or(DomainError::NotFound)?;
                let (sender, receiver, parcel) = self.orders.satellites(&order.order_ref)?;
                let order_ref = order.order_ref.clone();
                let assembled = AssembledOrder {
                    order,
                    sender,
                    receiver,
                    parcel,
                };

                let entry = VaultEntry::new(
                    TrashItemKind::Order,
                    id.to_string(),
                    snapshot(&assembled)?,
                    now,
                );
                self.vault.insert(entry.clone())?;

                self.orders.remove_order(id)?;
                self.orders.remove_satellites(&order_ref)?;
                Ok(entry)
            }
            TrashItemKind::Inbox => {
                let id = raw_id.parse()?;
                let inbox_entry = self.audit.entry(id)?.ok_or(DomainError::NotFound)?;

                let entry = VaultEntry::new(
                    TrashItemKind::Inbox,
                    id.to_string(),
                    snapshot(&inbox_entry)?,
                    now,
                );
                self.vault.insert(entry.clone())?;

                self.audit.remove(id)?;
                Ok(entry)
            }
        }
    }

    /// Bring a vaulted record back to the live store and drop the vault entry.
    pub fn restore(&self, id: VaultEntryId, now: DateTime<Utc>) -> ServiceResult<RestoredItem> {
        let entry = self.vault.entry(id)?.ok_or(DomainError::NotFound)?;

        let restored = match entry.item_type {
            TrashItemKind::Order => {
                let vaulted: AssembledOrder = serde_json::from_value(entry.snapshot.clone())
                    .map_err(|err| {
                        StoreError::Unavailable(format!("unreadable vault snapshot: {err}"))
                    })?;

                let order = Order {
                    id: OrderId::new(),
                    order_ref: self.refs.next_ref(now),
                    state: OrderState::Pending,
                    restored_from: Some(entry.id),
                    restored_at: Some(now),
                    updated_at: now,
                    ..vaulted.order
                };

                let sender = vaulted.sender.map(|mut s| {
                    s.order_ref = order.order_ref.clone();
                    s
                });
                let receiver = vaulted.receiver.map(|mut r| {
                    r.order_ref = order.order_ref.clone();
                    r
                });
                let parcel = vaulted.parcel.map(|mut p| {
                    p.order_ref = order.order_ref.clone();
                    p
                });

                if let Some(s) = &sender {
                    self.orders.insert_sender(s.clone())?;
                }
                if let Some(r) = &receiver {
                    self.orders.insert_receiver(r.clone())?;
                }
                if let Some(p) = &parcel {
                    self.orders.insert_parcel(p.clone())?;
                }
                if let Err(err) = self.orders.insert_order(order.clone()) {
                    if let Err(cleanup) = self.orders.remove_satellites(&order.order_ref) {
                        tracing::warn!(
                            order_ref = %order.order_ref,
                            error = %cleanup,
                            "could not clean up satellites after failed restore"
                        );
                    }
                    return Err(err.into());
                }

                RestoredItem::Order(AssembledOrder {
                    order,
                    sender,
                    receiver,
                    parcel,
                })
            }
            TrashItemKind::Inbox => {
                let inbox_entry: AuditEntry = serde_json::from_value(entry.snapshot.clone())
                    .map_err(|err| {
                        StoreError::Unavailable(format!("unreadable vault snapshot: {err}"))
                    })?;
                self.audit.append(inbox_entry.clone())?;
                RestoredItem::Inbox(inbox_entry)
            }
        };

        self.vault.remove(entry.id)?;
        Ok(restored)
    }

    /// Permanently discard one vault entry.
    pub fn purge(&self, id: VaultEntryId) -> ServiceResult<VaultEntry> {
        Ok(self.vault.remove(id)?.ok_or(DomainError::NotFound)?)
    }

    /// Permanently discard everything.
    pub fn purge_all(&self) -> ServiceResult<()> {
        Ok(self.vault.clear()?)
    }
}

fn snapshot<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value)
        .map_err(|err| StoreError::Unavailable(format!("unserializable snapshot: {err}")))
}
