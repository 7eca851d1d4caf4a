//! `naycourse-couriers` — independent courier roster.
//!
//! Couriers are not owned by orders; an order's courier assignment is a
//! denormalized copy taken at assignment time.

pub mod courier;

pub use courier::{Availability, Courier, CourierDraft};
