//! Delivery price estimation.
//!
//! Geocoding is an external collaborator behind a trait; the bundled
//! resolver only knows a fixed set of Abidjan districts and is what tests
//! and the default wiring use. Pricing itself is a pure per-kilometre
//! formula over the great-circle distance.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("adresse introuvable: {0}")]
    UnresolvableAddress(String),

    /// The geocoding collaborator failed; the caller's input may be fine.
    #[error("service de géocodage indisponible: {0}")]
    Upstream(String),
}

/// Address resolution seam.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinates, PricingError>;
}

/// Fixed-table resolver matching on a case-insensitive district name.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    known: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the Abidjan districts the service operates in.
    pub fn with_abidjan_districts() -> Self {
        let mut geocoder = Self::new();
        for (name, lat, lon) in [
            ("abobo", 5.4312, -4.0191),
            ("adjame", 5.3667, -4.0167),
            ("cocody", 5.3599, -3.9673),
            ("koumassi", 5.2889, -3.9537),
            ("marcory", 5.3008, -3.9830),
            ("plateau", 5.3235, -4.0237),
            ("port-bouet", 5.2548, -3.9298),
            ("treichville", 5.2932, -4.0075),
            ("yopougon", 5.3456, -4.0892),
        ] {
            geocoder.insert(name, Coordinates { lat, lon });
        }
        geocoder
    }

    pub fn insert(&mut self, name: &str, position: Coordinates) {
        self.known.insert(name.trim().to_lowercase(), position);
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, PricingError> {
        let key = address.trim().to_lowercase();
        self.known
            .get(&key)
            .copied()
            .ok_or_else(|| PricingError::UnresolvableAddress(address.trim().to_string()))
    }
}

/// Price quote for one pickup/drop-off pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub distance_km: f64,
    /// FCFA, already floored at the service minimum.
    pub price: u64,
}

/// Base fare plus a per-started-kilometre charge, floored at `min_price`.
pub struct PerKmPricer<G> {
    geocoder: Arc<G>,
    base_price: u64,
    price_per_km: u64,
    min_price: u64,
}

impl<G: Geocoder> PerKmPricer<G> {
    pub fn new(geocoder: Arc<G>, base_price: u64, price_per_km: u64, min_price: u64) -> Self {
        Self {
            geocoder,
            base_price,
            price_per_km,
            min_price,
        }
    }

    pub async fn estimate(&self, pickup: &str, dropoff: &str) -> Result<Quote, PricingError> {
        let from = self.geocoder.resolve(pickup).await?;
        let to = self.geocoder.resolve(dropoff).await?;

        let distance_km = haversine_km(from, to);
        let billed_km = distance_km.ceil() as u64;
        let price = (self.base_price + billed_km * self.price_per_km).max(self.min_price);

        Ok(Quote { distance_km, price })
    }
}

fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricer() -> PerKmPricer<StaticGeocoder> {
        PerKmPricer::new(
            Arc::new(StaticGeocoder::with_abidjan_districts()),
            300,
            200,
            500,
        )
    }

    #[tokio::test]
    async fn cross_town_estimate_charges_per_started_kilometre() {
        let quote = pricer().estimate("Plateau", "Cocody").await.unwrap();

        assert!(quote.distance_km > 5.0 && quote.distance_km < 9.0);
        let billed = quote.distance_km.ceil() as u64;
        assert_eq!(quote.price, 300 + billed * 200);
    }

    #[tokio::test]
    async fn same_district_is_floored_at_the_minimum() {
        let quote = pricer().estimate("cocody", "COCODY ").await.unwrap();

        assert_eq!(quote.distance_km, 0.0);
        assert_eq!(quote.price, 500);
    }

    #[tokio::test]
    async fn unknown_address_names_the_culprit() {
        let err = pricer().estimate("Plateau", "Atlantis").await.unwrap_err();
        assert_eq!(err, PricingError::UnresolvableAddress("Atlantis".to_string()));
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = Coordinates { lat: 5.3235, lon: -4.0237 };
        let b = Coordinates { lat: 5.3599, lon: -3.9673 };
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }
}
