//! Manager inbox service.
//!
//! The inbox is a read view over the audit log plus two small writes: manual
//! notes and the `pending -> done` flip.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use naycourse_audit::{AuditAction, AuditEntry, AuditStatus};
use naycourse_core::{AuditEntryId, DomainError};
use naycourse_orders::OrderRef;

use crate::error::ServiceResult;
use crate::store::AuditStore;

pub struct InboxService<A> {
    audit: Arc<A>,
}

impl<A: AuditStore> InboxService<A> {
    pub fn new(audit: Arc<A>) -> Self {
        Self { audit }
    }

    /// Every entry, newest first.
    pub fn list(&self) -> ServiceResult<Vec<AuditEntry>> {
        Ok(self.audit.entries()?)
    }

    /// Entries still awaiting an operator, newest first.
    pub fn pending(&self) -> ServiceResult<Vec<AuditEntry>> {
        Ok(self
            .audit
            .entries()?
            .into_iter()
            .filter(|e| e.status == AuditStatus::Pending)
            .collect())
    }

    /// Append an operator-written note outside the lifecycle flow.
    pub fn append_note(
        &self,
        action: AuditAction,
        order_ref: OrderRef,
        client: &str,
        details: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<AuditEntry> {
        let entry = AuditEntry::manual_note(action, order_ref, client, details, now);
        self.audit.append(entry.clone())?;
        Ok(entry)
    }

    /// Flip an entry to `done`. Idempotent.
    pub fn mark_done(&self, id: AuditEntryId) -> ServiceResult<AuditEntry> {
        let mut entry = self.audit.entry(id)?.ok_or(DomainError::NotFound)?;
        entry.mark_done();
        self.audit.update(&entry)?;
        Ok(entry)
    }
}
