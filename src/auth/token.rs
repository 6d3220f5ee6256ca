use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

use crate::model::user;

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("session token rejected: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
    #[error("session ttl of {0:?} puts expiry past the end of time")]
    ExpiryOverflow(Duration),
}

/// `now + ttl` as a unix timestamp, or `None` if it doesn't fit.
pub fn expiry_after(now: i64, ttl: Duration) -> Option<i64> {
    i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
}

/// Signs and verifies HS256 session tokens with a single server key.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> TokenSigner {
        TokenSigner {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// How long an issued token stays valid.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign(&self, user_id: user::Id) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = expiry_after(now, self.ttl).ok_or(TokenError::ExpiryOverflow(self.ttl))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp,
        };

        self.sign_claims(&claims)
    }

    pub(crate) fn sign_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Check the signature and expiry of a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expired means expired, no grace period
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Verify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(8 * 60 * 60);

    #[test]
    fn embeds_user_id() {
        let signer = TokenSigner::new(b"secret", TTL);
        let token = signer.sign(42).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 28800);
    }

    #[test]
    fn rejects_other_key() {
        let token = TokenSigner::new(b"secret", TTL).sign(42).unwrap();
        let other = TokenSigner::new(b"not the secret", TTL);

        assert!(matches!(other.verify(&token), Err(TokenError::Verify(_))));
    }

    #[test]
    fn rejects_expired() {
        let signer = TokenSigner::new(b"secret", TTL);
        let now = Utc::now().timestamp();
        let token = signer
            .sign_claims(&Claims {
                sub: "42".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert!(signer.verify(&token).is_err());
    }

    #[test]
    fn rejects_just_expired() {
        let signer = TokenSigner::new(b"secret", TTL);
        let now = Utc::now().timestamp();
        let token = signer
            .sign_claims(&Claims {
                sub: "42".to_string(),
                iat: now - 60,
                exp: now - 5,
            })
            .unwrap();

        assert!(matches!(signer.verify(&token), Err(TokenError::Verify(_))));
    }

    #[test]
    fn huge_ttl_fails_to_sign() {
        let signer = TokenSigner::new(b"secret", Duration::from_secs(u64::MAX));
        assert!(matches!(signer.sign(42), Err(TokenError::ExpiryOverflow(_))));

        let signer = TokenSigner::new(b"secret", Duration::from_secs(i64::MAX as u64));
        assert!(matches!(signer.sign(42), Err(TokenError::ExpiryOverflow(_))));
    }

    #[test]
    fn expiry_after_bounds() {
        assert_eq!(expiry_after(100, Duration::from_secs(28800)), Some(28900));
        assert_eq!(expiry_after(1, Duration::from_secs(i64::MAX as u64)), None);
        assert_eq!(expiry_after(0, Duration::from_secs(u64::MAX)), None);
    }

    #[test]
    fn rejects_garbage() {
        let signer = TokenSigner::new(b"secret", TTL);
        assert!(signer.verify("not.a.token").is_err());
        assert!(signer.verify("").is_err());
    }
}
