//! Vault entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use naycourse_core::{Entity, VaultEntryId};

/// What kind of record a vault entry snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrashItemKind {
    /// A full order aggregate (order + satellites inlined).
    Order,
    /// A manager inbox / audit entry.
    Inbox,
}

impl TrashItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrashItemKind::Order => "order",
            TrashItemKind::Inbox => "inbox",
        }
    }
}

/// Snapshot of a soft-deleted record, pending restore or permanent purge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    pub id: VaultEntryId,
    pub item_type: TrashItemKind,
    /// Display form of the deleted record's identity.
    pub original_id: String,
    /// Full serialized state captured at deletion time.
    pub snapshot: JsonValue,
    pub deleted_at: DateTime<Utc>,
}

impl VaultEntry {
    pub fn new(
        item_type: TrashItemKind,
        original_id: impl Into<String>,
        snapshot: JsonValue,
        deleted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: VaultEntryId::new(),
            item_type,
            original_id: original_id.into(),
            snapshot,
            deleted_at,
        }
    }
}

impl Entity for VaultEntry {
    type Id = VaultEntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
