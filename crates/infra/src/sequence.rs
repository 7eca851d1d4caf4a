//! Order reference generation.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use naycourse_orders::OrderRef;

use crate::store::CounterStore;

/// Issues globally unique, year-scoped order references.
///
/// The per-year counter is incremented atomically at the storage layer. When
/// the counter store is unavailable the generator degrades to a
/// timestamp-derived reference that is not guaranteed collision-free; callers
/// can detect this through [`OrderRef::is_canonical`].
pub struct OrderRefGenerator<C> {
    counters: Arc<C>,
}

impl<C: CounterStore> OrderRefGenerator<C> {
    pub fn new(counters: Arc<C>) -> Self {
        Self { counters }
    }

    pub fn next_ref(&self, now: DateTime<Utc>) -> OrderRef {
        let year = now.year();
        match self.counters.increment(year) {
            Ok(seq) => OrderRef::canonical(year, seq),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "counter store unavailable; issuing degraded order reference"
                );
                OrderRef::degraded(now.timestamp_millis())
            }
        }
    }
}
