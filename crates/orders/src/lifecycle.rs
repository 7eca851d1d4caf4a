//! Lifecycle state machine.
//!
//! Events form a closed tagged union; each carries only the payload its
//! transition needs, and the engine rejects any event that is not legal for
//! the current state. The transition function is pure: it returns the updated
//! order plus an audit note describing what must be logged, and leaves all
//! persistence to the caller.

use chrono::{DateTime, Utc};

use naycourse_core::{DomainError, DomainResult};

use crate::config::LifecycleConfig;
use crate::order::{
    CourierAssignment, Order, OrderState, Settlement, SettlementMethod, SettlementStatus,
};

/// One lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Price the order and confirm it (cash settlement, validated).
    Confirm { price: u64 },
    /// Assign a courier; the name/phone pair is copied onto the order.
    AssignCourier { name: String, phone: String },
    /// Cancel with an optional operator-supplied reason.
    Cancel { reason: Option<String> },
    /// Terminal: the parcel reached its receiver.
    MarkDelivered,
    /// Operator acknowledgement; orthogonal to the lifecycle state.
    MarkViewed,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Confirm { .. } => "confirm",
            LifecycleEvent::AssignCourier { .. } => "assign_courier",
            LifecycleEvent::Cancel { .. } => "cancel",
            LifecycleEvent::MarkDelivered => "mark_delivered",
            LifecycleEvent::MarkViewed => "mark_viewed",
        }
    }
}

/// What the audit trail must record for a committed transition.
///
/// The full entry (snapshots, notification text) is assembled by the caller,
/// which holds the satellite records; the note only carries the facts the
/// transition itself decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditNote {
    Validation { price: u64 },
    Assignment { courier_name: String, courier_phone: String },
    Cancellation { reason: Option<String> },
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub order: Order,
    pub audit: Option<AuditNote>,
}

/// Decide the outcome of `event` against the current `order`.
///
/// On error nothing has changed; the returned order is a modified copy and the
/// caller commits it with a conditional write keyed on the state it read.
pub fn apply(
    order: &Order,
    event: &LifecycleEvent,
    config: &LifecycleConfig,
    now: DateTime<Utc>,
) -> DomainResult<Transition> {
    // The viewed flag is orthogonal: it never consults nor changes the state.
    if let LifecycleEvent::MarkViewed = event {
        let mut next = order.clone();
        next.viewed = true;
        next.viewed_at = Some(now);
        next.updated_at = now;
        return Ok(Transition { order: next, audit: None });
    }

    if order.state.is_terminal() {
        return Err(DomainError::invalid_transition(
            order.state.as_str(),
            event.name(),
        ));
    }

    match event {
        LifecycleEvent::Confirm { price } => {
            if *price < config.min_price {
                return Err(DomainError::validation(format!(
                    "Prix invalide. Doit être un nombre >= {} FCFA",
                    config.min_price
                )));
            }
            if order.state != OrderState::Pending {
                return Err(DomainError::invalid_transition(
                    order.state.as_str(),
                    event.name(),
                ));
            }

            let mut next = order.clone();
            next.state = OrderState::Confirmed;
            next.price = *price;
            next.settlement = Some(Settlement {
                method: SettlementMethod::Cash,
                status: SettlementStatus::Validated,
                settled_at: Some(now),
            });
            next.updated_at = now;

            Ok(Transition {
                order: next,
                audit: Some(AuditNote::Validation { price: *price }),
            })
        }

        LifecycleEvent::AssignCourier { name, phone } => {
            if name.trim().is_empty() || phone.trim().is_empty() {
                return Err(DomainError::validation(
                    "Le nom et le téléphone du coursier sont requis",
                ));
            }
            if !matches!(order.state, OrderState::Pending | OrderState::Confirmed) {
                return Err(DomainError::invalid_transition(
                    order.state.as_str(),
                    event.name(),
                ));
            }

            let mut next = order.clone();
            next.state = OrderState::InProgress;
            next.courier_assignment = Some(CourierAssignment {
                name: name.trim().to_string(),
                phone: phone.trim().to_string(),
                assigned_at: now,
            });
            next.updated_at = now;

            Ok(Transition {
                order: next,
                audit: Some(AuditNote::Assignment {
                    courier_name: name.trim().to_string(),
                    courier_phone: phone.trim().to_string(),
                }),
            })
        }

        LifecycleEvent::Cancel { reason } => {
            let mut next = order.clone();
            next.state = OrderState::Cancelled;
            next.cancelled_at = Some(now);
            next.cancellation_reason = reason.clone();
            next.updated_at = now;

            Ok(Transition {
                order: next,
                audit: Some(AuditNote::Cancellation {
                    reason: reason.clone(),
                }),
            })
        }

        LifecycleEvent::MarkDelivered => {
            if order.state != OrderState::InProgress {
                return Err(DomainError::invalid_transition(
                    order.state.as_str(),
                    event.name(),
                ));
            }

            let mut next = order.clone();
            next.state = OrderState::Delivered;
            next.updated_at = now;

            Ok(Transition { order: next, audit: None })
        }

        LifecycleEvent::MarkViewed => unreachable!("handled above"),
    }
}
