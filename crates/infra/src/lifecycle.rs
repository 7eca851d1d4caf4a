//! Lifecycle transition service.
//!
//! Loads the order, runs the pure transition function, commits the result
//! with a conditional write keyed on the state that was read, then records
//! the audit entry. Audit writes are best-effort: the state change has
//! already been committed and is never rolled back for a logging failure.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use naycourse_audit::{
    assignment_message, AuditEntry, CourierSnapshot, ParcelSnapshot, ReceiverSnapshot,
    SenderSnapshot,
};
use naycourse_core::{DomainError, OrderId};
use naycourse_orders::{lifecycle, AuditNote, LifecycleConfig, LifecycleEvent, Order};

use crate::error::ServiceResult;
use crate::store::{AuditStore, OrderStore};

pub struct LifecycleService<S, A> {
    store: Arc<S>,
    audit: Arc<A>,
    config: LifecycleConfig,
}

impl<S, A> LifecycleService<S, A>
where
    S: OrderStore,
    A: AuditStore,
{
    pub fn new(store: Arc<S>, audit: Arc<A>, config: LifecycleConfig) -> Self {
        Self {
            store,
            audit,
            config,
        }
    }

    /// Apply one lifecycle event to the order and return its new form.
    ///
    /// Two operators racing on the same order: the first commit wins, the
    /// second fails the conditional write and surfaces as a conflict.
    pub fn transition(
        &self,
        id: OrderId,
        event: LifecycleEvent,
        now: DateTime<Utc>,
    ) -> ServiceResult<Order> {
        let current = self.store.order(id)?.ok_or(DomainError::NotFound)?;
        let read_state = current.state;

        let transition = lifecycle::apply(&current, &event, &self.config, now)?;
        self.store
            .update_order(&transition.order, Some(read_state))?;

        if let Some(note) = transition.audit {
            self.record(&transition.order, note, now);
        }

        Ok(transition.order)
    }

    fn record(&self, order: &Order, note: AuditNote, now: DateTime<Utc>) {
        if let Err(err) = self.try_record(order, note, now) {
            tracing::warn!(
                order_ref = %order.order_ref,
                error = %err,
                "audit entry could not be written for committed transition"
            );
        }
    }

    fn try_record(&self, order: &Order, note: AuditNote, now: DateTime<Utc>) -> ServiceResult<()> {
        let (sender, receiver, parcel) = self.store.satellites(&order.order_ref)?;
        let client = sender
            .as_ref()
            .map(|s| s.full_name.clone())
            .unwrap_or_else(|| "N/A".to_string());
        let sender: Option<SenderSnapshot> = sender.as_ref().map(Into::into);
        let receiver: Option<ReceiverSnapshot> = receiver.as_ref().map(Into::into);
        let parcel: Option<ParcelSnapshot> = parcel.as_ref().map(Into::into);

        let entry = match note {
            AuditNote::Validation { price } => AuditEntry::validation(
                order.order_ref.clone(),
                client,
                price,
                sender,
                receiver,
                parcel,
                now,
            ),
            AuditNote::Assignment {
                courier_name,
                courier_phone,
            } => {
                let courier = CourierSnapshot {
                    full_name: courier_name,
                    phone: courier_phone,
                };
                let message = assignment_message(
                    &order.order_ref,
                    sender.as_ref(),
                    receiver.as_ref(),
                    parcel.as_ref(),
                    &courier,
                    order.price,
                );
                AuditEntry::assignment(
                    order.order_ref.clone(),
                    client,
                    courier,
                    sender,
                    receiver,
                    parcel,
                    message,
                    now,
                )
            }
            AuditNote::Cancellation { reason } => AuditEntry::cancellation(
                order.order_ref.clone(),
                client,
                reason.as_deref(),
                now,
            ),
        };

        self.audit.append(entry)?;
        Ok(())
    }
}
