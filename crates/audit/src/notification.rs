//! Outbound notification templating.
//!
//! The text is built at assignment time from the frozen snapshots and stored
//! verbatim on the audit entry. Nothing here sends anything.

use naycourse_orders::OrderRef;

use crate::entry::{CourierSnapshot, ParcelSnapshot, ReceiverSnapshot, SenderSnapshot};

/// Message handed to the courier when an order is assigned.
pub fn assignment_message(
    order_ref: &OrderRef,
    sender: Option<&SenderSnapshot>,
    receiver: Option<&ReceiverSnapshot>,
    parcel: Option<&ParcelSnapshot>,
    courier: &CourierSnapshot,
    price: u64,
) -> String {
    let mut lines = vec![
        format!("🚚 Nouvelle course assignée à {}", courier.full_name),
        format!("Commande: {order_ref}"),
    ];

    if let Some(s) = sender {
        lines.push(format!("Expéditeur: {} ({}) - {}", s.full_name, s.phone, s.address));
    }
    if let Some(r) = receiver {
        lines.push(format!(
            "Destinataire: {} (WhatsApp: {}) - {}",
            r.full_name, r.whatsapp, r.address
        ));
    }
    if let Some(p) = parcel {
        lines.push(format!("Colis: {}", p.description));
        lines.push(format!("Livraison: {} à {}", p.delivery_date, p.delivery_time));
    }
    if price > 0 {
        lines.push(format!("Montant à encaisser: {price} FCFA"));
    }

    lines.join("\n")
}
