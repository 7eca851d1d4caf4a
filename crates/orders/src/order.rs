//! Order aggregate root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use naycourse_core::{DomainError, DomainResult, Entity, OrderId, UserId, VaultEntryId};

use crate::order_ref::OrderRef;

/// Order lifecycle state.
///
/// `Delivered`, `Cancelled` and `Failed` are terminal: no further lifecycle
/// event is accepted from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Pending,
    Confirmed,
    InProgress,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderState::Delivered | OrderState::Cancelled | OrderState::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Pending => "pending",
            OrderState::Confirmed => "confirmed",
            OrderState::InProgress => "in_progress",
            OrderState::Delivered => "delivered",
            OrderState::Cancelled => "cancelled",
            OrderState::Failed => "failed",
        }
    }
}

impl core::fmt::Display for OrderState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cash-settlement method recorded on confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    Cash,
    MobileMoney,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Validated,
}

/// Settlement terms, set by the confirm transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub method: SettlementMethod,
    pub status: SettlementStatus,
    pub settled_at: Option<DateTime<Utc>>,
}

/// Denormalized copy of the courier taken at assignment time.
///
/// Not a live reference: later changes to the courier roster do not alter
/// orders assigned earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierAssignment {
    pub name: String,
    pub phone: String,
    pub assigned_at: DateTime<Utc>,
}

/// Aggregate root. Satellite records (sender, receiver, parcel) are stored
/// separately and joined by `order_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_ref: OrderRef,
    /// Absent for guest orders.
    pub owner_id: Option<UserId>,
    pub state: OrderState,
    /// Price in currency units (FCFA has no subunit). Set only by confirm.
    pub price: u64,
    pub settlement: Option<Settlement>,
    pub courier_assignment: Option<CourierAssignment>,
    pub accepted_terms: bool,
    /// Operator-acknowledgement flag, orthogonal to `state`.
    pub viewed: bool,
    pub viewed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    /// Back-reference to the vault entry this order was restored from.
    pub restored_from: Option<VaultEntryId>,
    pub restored_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Construct a fresh `Pending` order.
    ///
    /// An order can never exist without accepted terms; the caller's consent
    /// checkbox is an invariant here, not just input validation.
    pub fn new(
        id: OrderId,
        order_ref: OrderRef,
        owner_id: Option<UserId>,
        accepted_terms: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !accepted_terms {
            return Err(DomainError::validation(
                "Vous devez accepter les conditions générales d'utilisation",
            ));
        }

        Ok(Self {
            id,
            order_ref,
            owner_id,
            state: OrderState::Pending,
            price: 0,
            settlement: None,
            courier_assignment: None,
            accepted_terms,
            viewed: false,
            viewed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            restored_from: None,
            restored_at: None,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
