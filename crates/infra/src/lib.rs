//! `naycourse-infra` — storage and application services.
//!
//! Storage is a set of narrow traits with in-memory implementations; the
//! services on top implement the operational semantics: compensated
//! multi-record creation, conditional lifecycle updates with a best-effort
//! audit trail, the soft-delete vault, the courier directory and the pricing
//! collaborator seam.

pub mod couriers;
pub mod error;
pub mod inbox;
pub mod lifecycle;
pub mod orders;
pub mod pricing;
pub mod sequence;
pub mod store;
pub mod trash;

pub use couriers::CourierService;
pub use error::{ServiceError, ServiceResult, StoreError};
pub use inbox::InboxService;
pub use lifecycle::LifecycleService;
pub use orders::{AssembledOrder, OrderService, OrderUpdate};
pub use pricing::{Coordinates, Geocoder, PerKmPricer, PricingError, Quote, StaticGeocoder};
pub use sequence::OrderRefGenerator;
pub use trash::{RestoredItem, TrashService};
pub use store::in_memory::{
    InMemoryAuditStore, InMemoryCounterStore, InMemoryCourierStore, InMemoryOrderStore,
    InMemoryVaultStore,
};
pub use store::{AuditStore, CounterStore, CourierStore, OrderStore, VaultStore};
