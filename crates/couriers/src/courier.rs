//! Courier entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use naycourse_core::{CourierId, DomainError, DomainResult, Entity};

/// Courier availability status.
///
/// Lifecycle transitions never change this automatically; it is managed by
/// the roster's own update-status operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Active,
    Inactive,
    Leave,
    Suspended,
}

/// Roster entry. The phone number is unique across the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub id: CourierId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Availability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation/update input for a roster entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierDraft {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<Availability>,
}

impl Courier {
    pub fn from_draft(id: CourierId, draft: &CourierDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        let full_name = draft
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::validation("Le nom du coursier est requis"))?;
        let phone = draft
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::validation("Le téléphone du coursier est requis"))?;

        Ok(Self {
            id,
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Identity and creation time are untouched.
    pub fn apply_draft(&mut self, draft: &CourierDraft, now: DateTime<Utc>) {
        if let Some(name) = draft.full_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.full_name = name.to_string();
        }
        if let Some(phone) = draft.phone.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.phone = phone.to_string();
        }
        if draft.email.is_some() {
            self.email = draft.email.clone();
        }
        if draft.address.is_some() {
            self.address = draft.address.clone();
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

impl Entity for Courier {
    type Id = CourierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_name_and_phone() {
        let err = Courier::from_draft(CourierId::new(), &CourierDraft::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let draft = CourierDraft {
            full_name: Some("Koffi".to_string()),
            phone: Some("  ".to_string()),
            ..CourierDraft::default()
        };
        let err = Courier::from_draft(CourierId::new(), &draft, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_courier_defaults_to_active() {
        let draft = CourierDraft {
            full_name: Some("Koffi".to_string()),
            phone: Some("0709000000".to_string()),
            ..CourierDraft::default()
        };
        let courier = Courier::from_draft(CourierId::new(), &draft, Utc::now()).unwrap();
        assert_eq!(courier.status, Availability::Active);
    }

    #[test]
    fn partial_update_keeps_unset_fields() {
        let draft = CourierDraft {
            full_name: Some("Koffi".to_string()),
            phone: Some("0709000000".to_string()),
            email: Some("koffi@example.ci".to_string()),
            ..CourierDraft::default()
        };
        let mut courier = Courier::from_draft(CourierId::new(), &draft, Utc::now()).unwrap();

        courier.apply_draft(
            &CourierDraft {
                status: Some(Availability::Leave),
                ..CourierDraft::default()
            },
            Utc::now(),
        );

        assert_eq!(courier.status, Availability::Leave);
        assert_eq!(courier.full_name, "Koffi");
        assert_eq!(courier.email.as_deref(), Some("koffi@example.ci"));
    }
}
