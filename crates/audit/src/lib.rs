//! `naycourse-audit` — append-mostly audit/inbox log entries.
//!
//! Entries are immutable once written (the single exception is the
//! `pending -> done` status flip used by the manager inbox). Snapshots are
//! captured at write time and never re-read from the live entities: this is
//! intentional historical fidelity.

pub mod entry;
pub mod notification;

pub use entry::{
    AuditAction, AuditEntry, AuditStatus, CourierSnapshot, ParcelSnapshot, ReceiverSnapshot,
    SenderSnapshot,
};
pub use notification::assignment_message;
