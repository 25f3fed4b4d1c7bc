use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::repos::user_repo::User;

/// Access token claims.
///
/// `sub` carries the stringified user id; `username` is a custom claim so
/// clients can display the identity without an extra lookup.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
    username: String,
}

/// HS256 access-token issuer/verifier.
///
/// Tokens are self-contained: verification needs only the shared secret, no
/// server-side session state. Expiry is the only bound on token lifetime.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_seconds: u64,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtService {
    pub fn new(secret: &str, issuer: String, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        // An exp that is not strictly in the future must fail.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            ttl_seconds,
        }
    }

    /// Issue an access token for an authenticated user.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            iss: self.issuer.clone(),
            sub: user.id.to_string(),
            iat: now,
            exp: now + self.ttl_seconds as i64,
            username: user.username.clone(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign access token");
                AppError::Internal
            },
        )
    }

    /// Verify a token and return the subject user id.
    ///
    /// Signature, issuer, and expiry are all checked; any structural,
    /// signature, or expiry failure collapses into `None`. Callers cannot
    /// (and should not) distinguish the failure kind.
    pub fn verify(&self, token: &str) -> Option<i64> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
                .ok()?;

        data.claims.sub.parse::<i64>().ok()
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            username: "testuser".to_string(),
            password_hash: "hash".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    fn test_service(secret: &str) -> JwtService {
        JwtService::new(secret, "todo-api".to_string(), 3600)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = test_service("test-secret-key-12345");
        let user = test_user();

        let token = service.issue(&user).unwrap();
        assert!(!token.is_empty());

        assert_eq!(service.verify(&token), Some(user.id));
        assert!(service.is_valid(&token));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service("test-secret-key-12345");

        assert_eq!(service.verify("not.a.token"), None);
        assert_eq!(service.verify(""), None);
        assert!(!service.is_valid("invalid.token.here"));
    }

    #[test]
    fn test_different_secrets_reject() {
        let service1 = test_service("secret1");
        let service2 = test_service("secret2");

        let token = service1.issue(&test_user()).unwrap();
        assert_eq!(service2.verify(&token), None);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuer_a = JwtService::new("shared-secret", "issuer-a".to_string(), 3600);
        let issuer_b = JwtService::new("shared-secret", "issuer-b".to_string(), 3600);

        let token = issuer_a.issue(&test_user()).unwrap();
        assert_eq!(issuer_b.verify(&token), None);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service("test-secret-key-12345");

        // Sign an already-expired payload with the service's own secret.
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: "todo-api".to_string(),
            sub: "42".to_string(),
            iat: now - 120,
            exp: now - 60,
            username: "testuser".to_string(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-12345".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.verify(&token), None);
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let service = test_service("test-secret-key-12345");

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: "todo-api".to_string(),
            sub: "not-a-number".to_string(),
            iat: now,
            exp: now + 3600,
            username: "testuser".to_string(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-key-12345".as_bytes()),
        )
        .unwrap();

        assert_eq!(service.verify(&token), None);
    }
}
