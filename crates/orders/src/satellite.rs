//! Satellite records: sender, receiver, parcel.
//!
//! Each satellite is owned by exactly one order and tagged with its order
//! reference; creation and deletion always follow the order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use naycourse_core::{DomainError, DomainResult, UserId};

use crate::config::LifecycleConfig;
use crate::order_ref::OrderRef;

/// Parcel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelCategory {
    #[default]
    Document,
    Light,
    Medium,
    Heavy,
}

/// Sender record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub order_ref: OrderRef,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Receiver record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    pub order_ref: OrderRef,
    pub full_name: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Parcel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub order_ref: OrderRef,
    pub description: String,
    pub category: ParcelCategory,
    pub count: u32,
    /// Declared value in currency units.
    pub declared_value: u64,
    pub insured: bool,
    pub delivery_date: NaiveDate,
    /// Stored verbatim in the configured format; no timezone arithmetic.
    pub delivery_time: String,
    pub instructions: String,
    pub created_at: DateTime<Utc>,
}

/// Creation input for the sender record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderDraft {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Creation input for the receiver record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverDraft {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
}

/// Creation input for the parcel record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelDraft {
    pub description: Option<String>,
    pub category: Option<ParcelCategory>,
    pub count: Option<u32>,
    pub declared_value: Option<u64>,
    pub insured: Option<bool>,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub delivery_date: Option<String>,
    pub delivery_time: Option<String>,
    pub instructions: Option<String>,
}

/// Full creation draft for one order and its satellites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub owner_id: Option<UserId>,
    pub sender: SenderDraft,
    pub receiver: ReceiverDraft,
    pub parcel: ParcelDraft,
    pub accepted_terms: bool,
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Sender {
    /// Apply a partial update; unset fields keep their current value.
    pub fn apply_draft(&mut self, draft: &SenderDraft) {
        if let Some(name) = required(&draft.full_name) {
            self.full_name = name.to_string();
        }
        if let Some(phone) = required(&draft.phone) {
            self.phone = phone.to_string();
        }
        if let Some(address) = required(&draft.address) {
            self.address = address.to_string();
        }
    }
}

impl Receiver {
    pub fn apply_draft(&mut self, draft: &ReceiverDraft) {
        if let Some(name) = required(&draft.full_name) {
            self.full_name = name.to_string();
        }
        if let Some(phone) = required(&draft.phone) {
            self.phone = phone.to_string();
        }
        if let Some(whatsapp) = required(&draft.whatsapp) {
            self.whatsapp = whatsapp.to_string();
        }
        if let Some(address) = required(&draft.address) {
            self.address = address.to_string();
        }
    }
}

impl Parcel {
    /// Apply a partial update. Date/time updates are validated the same way
    /// as at creation.
    pub fn apply_draft(&mut self, draft: &ParcelDraft, config: &LifecycleConfig) -> DomainResult<()> {
        if let Some(date) = required(&draft.delivery_date) {
            self.delivery_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| DomainError::validation("Date de livraison invalide"))?;
        }
        if let Some(time) = required(&draft.delivery_time) {
            if !config.delivery_time_format.matches(time) {
                return Err(DomainError::validation(format!(
                    "Format d'heure invalide ({})",
                    config.delivery_time_format.pattern()
                )));
            }
            self.delivery_time = time.to_string();
        }
        if let Some(description) = required(&draft.description) {
            self.description = description.to_string();
        }
        if let Some(category) = draft.category {
            self.category = category;
        }
        if let Some(count) = draft.count {
            if count == 0 {
                return Err(DomainError::validation(
                    "Le nombre de colis doit être au moins 1",
                ));
            }
            self.count = count;
        }
        if let Some(value) = draft.declared_value {
            self.declared_value = value;
        }
        if let Some(insured) = draft.insured {
            self.insured = insured;
        }
        if let Some(instructions) = required(&draft.instructions) {
            self.instructions = instructions.to_string();
        }
        Ok(())
    }
}

impl OrderDraft {
    /// Validate the draft against the data-model invariants.
    ///
    /// All problems are collected so the client can fix them in one pass.
    pub fn validate(&self, config: &LifecycleConfig) -> Vec<String> {
        let mut errors = Vec::new();

        if required(&self.sender.full_name).is_none() {
            errors.push("Le nom de l'expéditeur est requis".to_string());
        }
        if required(&self.sender.phone).is_none() {
            errors.push("Le téléphone de l'expéditeur est requis".to_string());
        }
        if required(&self.receiver.full_name).is_none() {
            errors.push("Le nom du destinataire est requis".to_string());
        }
        if required(&self.receiver.whatsapp).is_none() {
            errors.push("Le WhatsApp du destinataire est requis".to_string());
        }
        if required(&self.receiver.address).is_none() {
            errors.push("L'adresse de destination est requise".to_string());
        }

        match required(&self.parcel.delivery_date) {
            None => errors.push("La date de livraison est requise".to_string()),
            Some(d) if NaiveDate::parse_from_str(d, "%Y-%m-%d").is_err() => {
                errors.push("Date de livraison invalide".to_string());
            }
            Some(_) => {}
        }

        match required(&self.parcel.delivery_time) {
            None => errors.push("L'heure de livraison est requise".to_string()),
            Some(t) if !config.delivery_time_format.matches(t) => {
                errors.push(format!(
                    "Format d'heure invalide ({})",
                    config.delivery_time_format.pattern()
                ));
            }
            Some(_) => {}
        }

        if self.parcel.count == Some(0) {
            errors.push("Le nombre de colis doit être au moins 1".to_string());
        }

        if !self.accepted_terms {
            errors.push("Vous devez accepter les conditions générales d'utilisation".to_string());
        }

        errors
    }

    /// Validate and build the three satellite records for `order_ref`.
    ///
    /// Optional fields take the documented defaults; the receiver's phone
    /// falls back to the WhatsApp contact when not given separately.
    pub fn build_satellites(
        &self,
        order_ref: &OrderRef,
        config: &LifecycleConfig,
        now: DateTime<Utc>,
    ) -> DomainResult<(Sender, Receiver, Parcel)> {
        let errors = self.validate(config);
        if !errors.is_empty() {
            return Err(DomainError::validation(errors.join("; ")));
        }

        let sender = Sender {
            order_ref: order_ref.clone(),
            full_name: required(&self.sender.full_name).unwrap_or_default().to_string(),
            phone: required(&self.sender.phone).unwrap_or_default().to_string(),
            address: required(&self.sender.address)
                .unwrap_or("Adresse non spécifiée")
                .to_string(),
            created_at: now,
        };

        let whatsapp = required(&self.receiver.whatsapp).unwrap_or_default().to_string();
        let receiver = Receiver {
            order_ref: order_ref.clone(),
            full_name: required(&self.receiver.full_name).unwrap_or_default().to_string(),
            phone: required(&self.receiver.phone)
                .map(str::to_string)
                .unwrap_or_else(|| whatsapp.clone()),
            whatsapp,
            address: required(&self.receiver.address).unwrap_or_default().to_string(),
            created_at: now,
        };

        let delivery_date = required(&self.parcel.delivery_date)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .ok_or_else(|| DomainError::validation("Date de livraison invalide"))?;

        let parcel = Parcel {
            order_ref: order_ref.clone(),
            description: required(&self.parcel.description).unwrap_or_default().to_string(),
            category: self.parcel.category.unwrap_or_default(),
            count: self.parcel.count.unwrap_or(1),
            declared_value: self.parcel.declared_value.unwrap_or(0),
            insured: self.parcel.insured.unwrap_or(false),
            delivery_date,
            delivery_time: required(&self.parcel.delivery_time)
                .unwrap_or_default()
                .to_string(),
            instructions: required(&self.parcel.instructions)
                .unwrap_or("Aucune instruction")
                .to_string(),
            created_at: now,
        };

        Ok((sender, receiver, parcel))
    }
}
