//! Courier directory service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use naycourse_core::{CourierId, DomainError};
use naycourse_couriers::{Courier, CourierDraft};

use crate::error::ServiceResult;
use crate::store::CourierStore;

pub struct CourierService<D> {
    store: Arc<D>,
}

impl<D: CourierStore> CourierService<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }

    /// Register a courier. The phone number must be unique in the roster.
    pub fn create(&self, draft: &CourierDraft, now: DateTime<Utc>) -> ServiceResult<Courier> {
        let courier = Courier::from_draft(CourierId::new(), draft, now)?;
        self.store.insert(courier.clone())?;
        Ok(courier)
    }

    pub fn get(&self, id: CourierId) -> ServiceResult<Courier> {
        Ok(self.store.courier(id)?.ok_or(DomainError::NotFound)?)
    }

    /// Full roster, sorted by name.
    pub fn list(&self) -> ServiceResult<Vec<Courier>> {
        Ok(self.store.couriers()?)
    }

    pub fn update(
        &self,
        id: CourierId,
        draft: &CourierDraft,
        now: DateTime<Utc>,
    ) -> ServiceResult<Courier> {
        let mut courier = self.store.courier(id)?.ok_or(DomainError::NotFound)?;
        courier.apply_draft(draft, now);
        self.store.update(&courier)?;
        Ok(courier)
    }

    pub fn delete(&self, id: CourierId) -> ServiceResult<Courier> {
        Ok(self.store.remove(id)?.ok_or(DomainError::NotFound)?)
    }
}
