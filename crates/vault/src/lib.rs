//! `naycourse-vault` — soft-delete vault entries.
//!
//! A vault entry holds the full serialized snapshot of a deleted record. It is
//! created only by move-to-trash and consumed (removed) only by restore; a
//! restore creates a brand-new entity from the snapshot, never the old one.

pub mod entry;

pub use entry::{TrashItemKind, VaultEntry};
