//! Request DTOs.
//!
//! The wire vocabulary is the French one the clients already speak
//! (`nomComplet`, `dateLivraison`, `acceptCGU`, ...); mapping onto the domain
//! drafts happens here and nowhere else.

use serde::Deserialize;

use naycourse_audit::AuditAction;
use naycourse_core::UserId;
use naycourse_couriers::{Availability, CourierDraft};
use naycourse_infra::OrderUpdate;
use naycourse_orders::{
    OrderDraft, ParcelCategory, ParcelDraft, ReceiverDraft, SenderDraft,
};
use naycourse_vault::TrashItemKind;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPayload {
    pub nom_complet: Option<String>,
    pub telephone: Option<String>,
    pub whatsapp: Option<String>,
    pub adresse: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColisPayload {
    #[serde(rename = "type")]
    pub categorie: Option<ParcelCategory>,
    pub description: Option<String>,
    pub nombre: Option<u32>,
    pub valeur_declaree: Option<u64>,
    pub assurance: Option<bool>,
    pub date_livraison: Option<String>,
    pub heure_livraison: Option<String>,
    pub instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub expediteur: PartyPayload,
    #[serde(default)]
    pub destinataire: PartyPayload,
    #[serde(default)]
    pub colis: ColisPayload,
    #[serde(rename = "acceptCGU", default)]
    pub accept_cgu: bool,
}

impl CreateOrderRequest {
    pub fn into_draft(self, owner_id: Option<UserId>) -> OrderDraft {
        OrderDraft {
            owner_id,
            sender: sender_draft(self.expediteur),
            receiver: receiver_draft(self.destinataire),
            parcel: parcel_draft(self.colis),
            accepted_terms: self.accept_cgu,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub expediteur: PartyPayload,
    #[serde(default)]
    pub destinataire: PartyPayload,
    #[serde(default)]
    pub colis: ColisPayload,
}

impl UpdateOrderRequest {
    pub fn into_update(self) -> OrderUpdate {
        OrderUpdate {
            sender: sender_draft(self.expediteur),
            receiver: receiver_draft(self.destinataire),
            parcel: parcel_draft(self.colis),
        }
    }
}

fn sender_draft(p: PartyPayload) -> SenderDraft {
    SenderDraft {
        full_name: p.nom_complet,
        phone: p.telephone,
        address: p.adresse,
    }
}

fn receiver_draft(p: PartyPayload) -> ReceiverDraft {
    ReceiverDraft {
        full_name: p.nom_complet,
        phone: p.telephone,
        whatsapp: p.whatsapp,
        address: p.adresse,
    }
}

fn parcel_draft(c: ColisPayload) -> ParcelDraft {
    ParcelDraft {
        description: c.description,
        category: c.categorie,
        count: c.nombre,
        declared_value: c.valeur_declaree,
        insured: c.assurance,
        delivery_date: c.date_livraison,
        delivery_time: c.heure_livraison,
        instructions: c.instructions,
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateOrderRequest {
    pub prix: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourierRequest {
    /// Roster id; takes precedence over the inline pair.
    pub coursier_id: Option<String>,
    pub coursier: Option<InlineCourier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineCourier {
    pub nom_complet: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelOrderRequest {
    pub motif: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToTrashRequest {
    pub item_id: String,
    pub item_type: TrashItemKind,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub depart: String,
    pub arrivee: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierRequest {
    pub nom_complet: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub adresse: Option<String>,
    pub statut: Option<Availability>,
}

impl CourierRequest {
    pub fn into_draft(self) -> CourierDraft {
        CourierDraft {
            full_name: self.nom_complet,
            phone: self.telephone,
            email: self.email,
            address: self.adresse,
            status: self.statut,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CourierStatusRequest {
    pub statut: Availability,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxNoteRequest {
    #[serde(default = "default_note_action")]
    pub action: AuditAction,
    pub commande: String,
    pub client: String,
    pub details: String,
}

fn default_note_action() -> AuditAction {
    AuditAction::Modification
}
