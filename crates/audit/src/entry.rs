//! Audit entry model and write-time snapshots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use naycourse_core::{AuditEntryId, Entity};
use naycourse_couriers::Courier;
use naycourse_orders::{OrderRef, Parcel, ParcelCategory, Receiver, Sender};

/// Lifecycle action recorded by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Creation,
    Validation,
    AssignationCoursier,
    Annulation,
    Modification,
}

/// Inbox handling status.
///
/// Lifecycle-generated entries are written `done` (except `creation`, which
/// feeds the manager triage queue); manually-created notes default to
/// `pending` until an operator flips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pending,
    Done,
}

/// Sender fields frozen at the time of the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderSnapshot {
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

impl From<&Sender> for SenderSnapshot {
    fn from(s: &Sender) -> Self {
        Self {
            full_name: s.full_name.clone(),
            phone: s.phone.clone(),
            address: s.address.clone(),
        }
    }
}

/// Receiver fields frozen at the time of the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverSnapshot {
    pub full_name: String,
    pub whatsapp: String,
    pub address: String,
}

impl From<&Receiver> for ReceiverSnapshot {
    fn from(r: &Receiver) -> Self {
        Self {
            full_name: r.full_name.clone(),
            whatsapp: r.whatsapp.clone(),
            address: r.address.clone(),
        }
    }
}

/// Parcel fields frozen at the time of the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelSnapshot {
    pub description: String,
    pub category: ParcelCategory,
    pub delivery_date: NaiveDate,
    pub delivery_time: String,
}

impl From<&Parcel> for ParcelSnapshot {
    fn from(p: &Parcel) -> Self {
        Self {
            description: p.description.clone(),
            category: p.category,
            delivery_date: p.delivery_date,
            delivery_time: p.delivery_time.clone(),
        }
    }
}

/// Courier fields frozen at assignment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierSnapshot {
    pub full_name: String,
    pub phone: String,
}

impl From<&Courier> for CourierSnapshot {
    fn from(c: &Courier) -> Self {
        Self {
            full_name: c.full_name.clone(),
            phone: c.phone.clone(),
        }
    }
}

/// One record of the manager-facing activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub action: AuditAction,
    pub order_ref: OrderRef,
    /// Client display name (usually the sender's full name).
    pub client: String,
    pub date: DateTime<Utc>,
    pub details: String,
    pub status: AuditStatus,
    pub price: Option<u64>,
    pub sender: Option<SenderSnapshot>,
    pub receiver: Option<ReceiverSnapshot>,
    pub parcel: Option<ParcelSnapshot>,
    pub courier: Option<CourierSnapshot>,
    /// Outbound notification text stored verbatim for later reference/resend.
    /// Transmission itself is an external collaborator's job.
    pub message: Option<String>,
}

impl AuditEntry {
    fn base(
        action: AuditAction,
        order_ref: OrderRef,
        client: impl Into<String>,
        details: impl Into<String>,
        status: AuditStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            action,
            order_ref,
            client: client.into(),
            date: now,
            details: details.into(),
            status,
            price: None,
            sender: None,
            receiver: None,
            parcel: None,
            courier: None,
            message: None,
        }
    }

    /// Triage-queue entry written when an order is created.
    pub fn creation(order_ref: OrderRef, client: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::base(
            AuditAction::Creation,
            order_ref,
            client,
            "Nouvelle commande créée",
            AuditStatus::Pending,
            now,
        )
    }

    pub fn validation(
        order_ref: OrderRef,
        client: impl Into<String>,
        price: u64,
        sender: Option<SenderSnapshot>,
        receiver: Option<ReceiverSnapshot>,
        parcel: Option<ParcelSnapshot>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::base(
            AuditAction::Validation,
            order_ref,
            client,
            format!("Commande validée - Prix: {price} FCFA"),
            AuditStatus::Done,
            now,
        );
        entry.price = Some(price);
        entry.sender = sender;
        entry.receiver = receiver;
        entry.parcel = parcel;
        entry
    }

    pub fn assignment(
        order_ref: OrderRef,
        client: impl Into<String>,
        courier: CourierSnapshot,
        sender: Option<SenderSnapshot>,
        receiver: Option<ReceiverSnapshot>,
        parcel: Option<ParcelSnapshot>,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::base(
            AuditAction::AssignationCoursier,
            order_ref,
            client,
            format!("Coursier assigné: {}", courier.full_name),
            AuditStatus::Done,
            now,
        );
        entry.courier = Some(courier);
        entry.sender = sender;
        entry.receiver = receiver;
        entry.parcel = parcel;
        entry.message = Some(message);
        entry
    }

    pub fn cancellation(
        order_ref: OrderRef,
        client: impl Into<String>,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::base(
            AuditAction::Annulation,
            order_ref,
            client,
            format!("Commande annulée - Motif: {}", reason.unwrap_or("Non spécifié")),
            AuditStatus::Done,
            now,
        )
    }

    pub fn modification(
        order_ref: OrderRef,
        client: impl Into<String>,
        changed_fields: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self::base(
            AuditAction::Modification,
            order_ref,
            client,
            format!("Commande modifiée - {changed_fields} changement(s)"),
            AuditStatus::Done,
            now,
        )
    }

    /// Manually appended inbox note (not lifecycle-generated).
    pub fn manual_note(
        action: AuditAction,
        order_ref: OrderRef,
        client: impl Into<String>,
        details: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::base(action, order_ref, client, details, AuditStatus::Pending, now)
    }

    /// The one permitted mutation: `pending -> done`. Idempotent.
    pub fn mark_done(&mut self) {
        self.status = AuditStatus::Done;
    }
}

impl Entity for AuditEntry {
    type Id = AuditEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
