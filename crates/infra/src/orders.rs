//! Order creation, reads and edits.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use naycourse_audit::AuditEntry;
use naycourse_core::{DomainError, OrderId, UserId};
use naycourse_orders::{
    LifecycleConfig, Order, OrderDraft, OrderRef, OrderState, Parcel, ParcelDraft, Receiver,
    ReceiverDraft, Sender, SenderDraft,
};

use crate::error::ServiceResult;
use crate::sequence::OrderRefGenerator;
use crate::store::{AuditStore, CounterStore, OrderStore};

/// An order joined with its satellite records.
///
/// Satellites are optional on read: a restore from an old vault snapshot or a
/// partially failed cleanup can leave an order without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledOrder {
    pub order: Order,
    pub sender: Option<Sender>,
    pub receiver: Option<Receiver>,
    pub parcel: Option<Parcel>,
}

/// Partial edit of an order's satellite records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(default)]
    pub sender: SenderDraft,
    #[serde(default)]
    pub receiver: ReceiverDraft,
    #[serde(default)]
    pub parcel: ParcelDraft,
}

/// Order intake and read-side service.
pub struct OrderService<S, C, A> {
    store: Arc<S>,
    audit: Arc<A>,
    refs: Arc<OrderRefGenerator<C>>,
    config: LifecycleConfig,
}

impl<S, C, A> OrderService<S, C, A>
where
    S: OrderStore,
    C: CounterStore,
    A: AuditStore,
{
    pub fn new(
        store: Arc<S>,
        audit: Arc<A>,
        refs: Arc<OrderRefGenerator<C>>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store,
            audit,
            refs,
            config,
        }
    }

    /// Create an order with its three satellite records.
    ///
    /// Satellites are written first; if the order write then fails, the
    /// satellites are deleted again so no orphans survive. The creation audit
    /// entry is best-effort and never fails the request.
    pub fn create(&self, draft: &OrderDraft, now: DateTime<Utc>) -> ServiceResult<AssembledOrder> {
        let order_ref = self.refs.next_ref(now);
        let (sender, receiver, parcel) = draft.build_satellites(&order_ref, &self.config, now)?;
        let order = Order::new(
            OrderId::new(),
            order_ref.clone(),
            draft.owner_id,
            draft.accepted_terms,
            now,
        )?;

        self.store.insert_sender(sender.clone())?;
        if let Err(err) = self
            .store
            .insert_receiver(receiver.clone())
            .and_then(|_| self.store.insert_parcel(parcel.clone()))
            .and_then(|_| self.store.insert_order(order.clone()))
        {
            self.discard_satellites(&order_ref);
            return Err(err.into());
        }

        let entry = AuditEntry::creation(order_ref, sender.full_name.clone(), now);
        if let Err(err) = self.audit.append(entry) {
            tracing::warn!(
                order_ref = %order.order_ref,
                error = %err,
                "creation audit entry could not be written"
            );
        }

        Ok(AssembledOrder {
            order,
            sender: Some(sender),
            receiver: Some(receiver),
            parcel: Some(parcel),
        })
    }

    pub fn get(&self, id: OrderId) -> ServiceResult<AssembledOrder> {
        let order = self.store.order(id)?.ok_or(DomainError::NotFound)?;
        self.assemble(order)
    }

    pub fn get_by_ref(&self, order_ref: &OrderRef) -> ServiceResult<AssembledOrder> {
        let order = self
            .store
            .order_by_ref(order_ref)?
            .ok_or(DomainError::NotFound)?;
        self.assemble(order)
    }

    /// All orders, newest first.
    pub fn list_all(&self) -> ServiceResult<Vec<AssembledOrder>> {
        self.assemble_many(self.store.orders()?)
    }

    /// Orders awaiting confirmation, newest first.
    pub fn list_pending(&self) -> ServiceResult<Vec<AssembledOrder>> {
        let pending = self
            .store
            .orders()?
            .into_iter()
            .filter(|o| o.state == OrderState::Pending)
            .collect();
        self.assemble_many(pending)
    }

    /// Orders owned by `owner`, newest first.
    pub fn list_for_owner(&self, owner: UserId) -> ServiceResult<Vec<AssembledOrder>> {
        self.assemble_many(self.store.orders_for_owner(owner)?)
    }

    /// Apply a partial edit to the satellite records.
    ///
    /// Terminal orders are frozen. A modification audit entry is written when
    /// at least one field actually changed, again best-effort.
    pub fn update(
        &self,
        id: OrderId,
        update: &OrderUpdate,
        now: DateTime<Utc>,
    ) -> ServiceResult<AssembledOrder> {
        let mut order = self.store.order(id)?.ok_or(DomainError::NotFound)?;
        if order.state.is_terminal() {
            return Err(DomainError::invalid_transition(order.state.as_str(), "update").into());
        }

        let (sender, receiver, parcel) = self.store.satellites(&order.order_ref)?;
        let mut changed = 0usize;

        // Apply the whole patch in memory before persisting anything, so a
        // rejected parcel field cannot leave sender/receiver edits behind.
        let sender = match sender {
            Some(mut s) => {
                let before = s.clone();
                s.apply_draft(&update.sender);
                changed += count_changes(&before, &s);
                Some(s)
            }
            None => None,
        };
        let receiver = match receiver {
            Some(mut r) => {
                let before = r.clone();
                r.apply_draft(&update.receiver);
                changed += count_changes(&before, &r);
                Some(r)
            }
            None => None,
        };
        let parcel = match parcel {
            Some(mut p) => {
                let before = p.clone();
                p.apply_draft(&update.parcel, &self.config)?;
                changed += count_changes(&before, &p);
                Some(p)
            }
            None => None,
        };

        if let Some(s) = &sender {
            self.store.insert_sender(s.clone())?;
        }
        if let Some(r) = &receiver {
            self.store.insert_receiver(r.clone())?;
        }
        if let Some(p) = &parcel {
            self.store.insert_parcel(p.clone())?;
        }

        if changed > 0 {
            order.updated_at = now;
            self.store.update_order(&order, None)?;

            let client = sender
                .as_ref()
                .map(|s| s.full_name.clone())
                .unwrap_or_else(|| "N/A".to_string());
            let entry = AuditEntry::modification(order.order_ref.clone(), client, changed, now);
            if let Err(err) = self.audit.append(entry) {
                tracing::warn!(
                    order_ref = %order.order_ref,
                    error = %err,
                    "modification audit entry could not be written"
                );
            }
        }

        Ok(AssembledOrder {
            order,
            sender,
            receiver,
            parcel,
        })
    }

    /// Hard delete: the order and whatever satellites share its reference.
    ///
    /// Satellites are matched by reference, not a live join, so an order that
    /// already lost its satellites deletes cleanly.
    pub fn delete(&self, id: OrderId) -> ServiceResult<Order> {
        let order = self.store.remove_order(id)?.ok_or(DomainError::NotFound)?;
        self.store.remove_satellites(&order.order_ref)?;
        Ok(order)
    }

    fn assemble(&self, order: Order) -> ServiceResult<AssembledOrder> {
        let (sender, receiver, parcel) = self.store.satellites(&order.order_ref)?;
        Ok(AssembledOrder {
            order,
            sender,
            receiver,
            parcel,
        })
    }

    fn assemble_many(&self, orders: Vec<Order>) -> ServiceResult<Vec<AssembledOrder>> {
        orders.into_iter().map(|o| self.assemble(o)).collect()
    }

    fn discard_satellites(&self, order_ref: &OrderRef) {
        if let Err(err) = self.store.remove_satellites(order_ref) {
            tracing::warn!(
                %order_ref,
                error = %err,
                "could not clean up satellites after failed order write"
            );
        }
    }
}

/// Number of top-level fields whose value differs between the two records.
fn count_changes<T: Serialize>(before: &T, after: &T) -> usize {
    let (Ok(a), Ok(b)) = (serde_json::to_value(before), serde_json::to_value(after)) else {
        return 0;
    };
    match (a, b) {
        (serde_json::Value::Object(a), serde_json::Value::Object(b)) => a
            .iter()
            .filter(|(key, value)| b.get(*key) != Some(value))
            .count(),
        _ => 0,
    }
}
