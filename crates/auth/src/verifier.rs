//! Bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{Claims, TokenError, validate_claims};

/// Verifies a bearer credential into claims.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError>;
}

/// HS256 verifier over a shared secret.
///
/// The time window is checked against our own `issued_at`/`expires_at` claims
/// rather than the registered `exp`/`nbf` ones, so the library's built-in
/// checks are disabled.
pub struct Hs256Verifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256Verifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenVerifier for Hs256Verifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use naycourse_core::UserId;

    fn mint(secret: &str, claims: &Claims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn fresh_claims() -> Claims {
        let now = Utc::now();
        Claims {
            sub: UserId::new(),
            role: Role::Manager,
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn round_trip_verifies() {
        let claims = fresh_claims();
        let token = mint("s3cret", &claims);

        let verifier = Hs256Verifier::new(b"s3cret");
        let verified = verifier.verify(&token, Utc::now()).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = mint("s3cret", &fresh_claims());
        let verifier = Hs256Verifier::new(b"other");
        assert_eq!(verifier.verify(&token, Utc::now()), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = fresh_claims();
        claims.issued_at = Utc::now() - Duration::hours(2);
        claims.expires_at = Utc::now() - Duration::hours(1);
        let token = mint("s3cret", &claims);

        let verifier = Hs256Verifier::new(b"s3cret");
        assert_eq!(verifier.verify(&token, Utc::now()), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = Hs256Verifier::new(b"s3cret");
        assert_eq!(
            verifier.verify("not-a-token", Utc::now()),
            Err(TokenError::Invalid)
        );
    }
}
