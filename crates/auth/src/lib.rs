//! `naycourse-auth` — authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it verifies a
//! bearer credential into `{ identity, role }` claims and nothing else.
//! Credential *issuance* is out of scope (an external collaborator).

pub mod claims;
pub mod roles;
pub mod verifier;

pub use claims::{Claims, TokenError, validate_claims};
pub use roles::Role;
pub use verifier::{Hs256Verifier, TokenVerifier};
