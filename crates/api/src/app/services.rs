//! Store and service wiring for the in-memory deployment.

use std::sync::Arc;

use naycourse_infra::{
    CourierService, InMemoryAuditStore, InMemoryCounterStore, InMemoryCourierStore,
    InMemoryOrderStore, InMemoryVaultStore, InboxService, LifecycleService, OrderRefGenerator,
    OrderService, PerKmPricer, StaticGeocoder, TrashService,
};
use naycourse_orders::LifecycleConfig;

// FCFA. The minimum matches the confirm transition's price floor.
const PRICING_BASE: u64 = 300;
const PRICING_PER_KM: u64 = 100;

pub struct AppServices {
    pub orders: OrderService<InMemoryOrderStore, InMemoryCounterStore, InMemoryAuditStore>,
    pub lifecycle: LifecycleService<InMemoryOrderStore, InMemoryAuditStore>,
    pub trash: TrashService<
        InMemoryOrderStore,
        InMemoryAuditStore,
        InMemoryVaultStore,
        InMemoryCounterStore,
    >,
    pub couriers: CourierService<InMemoryCourierStore>,
    pub inbox: InboxService<InMemoryAuditStore>,
    pub pricing: PerKmPricer<StaticGeocoder>,
}

pub fn build_services(config: LifecycleConfig) -> AppServices {
    let order_store = Arc::new(InMemoryOrderStore::new());
    let audit_store = Arc::new(InMemoryAuditStore::new());
    let vault_store = Arc::new(InMemoryVaultStore::new());
    let courier_store = Arc::new(InMemoryCourierStore::new());
    let refs = Arc::new(OrderRefGenerator::new(Arc::new(
        InMemoryCounterStore::new(),
    )));

    AppServices {
        orders: OrderService::new(
            Arc::clone(&order_store),
            Arc::clone(&audit_store),
            Arc::clone(&refs),
            config,
        ),
        lifecycle: LifecycleService::new(
            Arc::clone(&order_store),
            Arc::clone(&audit_store),
            config,
        ),
        trash: TrashService::new(
            Arc::clone(&order_store),
            Arc::clone(&audit_store),
            vault_store,
            refs,
        ),
        couriers: CourierService::new(courier_store),
        inbox: InboxService::new(audit_store),
        pricing: PerKmPricer::new(
            Arc::new(StaticGeocoder::with_abidjan_districts()),
            PRICING_BASE,
            PRICING_PER_KM,
            config.min_price,
        ),
    }
}
