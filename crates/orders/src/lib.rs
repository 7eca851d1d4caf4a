//! `naycourse-orders` — order aggregate and lifecycle state machine.
//!
//! Pure domain: the aggregate, its three satellite records, the human-readable
//! order reference, and the closed set of lifecycle events with their
//! transition rules. Persistence and audit writes live in `naycourse-infra`.

pub mod config;
pub mod lifecycle;
pub mod order;
pub mod order_ref;
pub mod satellite;

pub use config::{LifecycleConfig, TimeFormat};
pub use lifecycle::{AuditNote, LifecycleEvent, Transition};
pub use order::{CourierAssignment, Order, OrderState, Settlement, SettlementMethod, SettlementStatus};
pub use order_ref::OrderRef;
pub use satellite::{
    OrderDraft, Parcel, ParcelCategory, ParcelDraft, Receiver, ReceiverDraft, Sender, SenderDraft,
};
