//! Bearer token verification for provider-issued JWTs.
//!
//! The identity provider signs session tokens; this adapter checks the
//! signature, expiry and (optionally) issuer, then hands handlers a domain
//! [`Caller`]. Missing or unverifiable tokens yield [`Caller::Anonymous`] so
//! read-only pages keep working for signed-out visitors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Caller, DisplayName, Error, ExternalUserId, Identity};
use crate::inbound::http::state::HttpState;

/// Message returned when an endpoint needs a verified caller.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";

/// Failure to build a verifier from configuration.
#[derive(Debug, thiserror::Error)]
pub enum VerifierConfigError {
    /// The verification key is empty.
    #[error("token verification key must not be empty")]
    EmptyKey,
    /// The PEM key could not be parsed.
    #[error("invalid token verification key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Claims read from provider session tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    name: Option<String>,
}

/// Verifies bearer tokens against a shared secret or an RSA public key.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// Build a verifier from a key and optional issuer.
    ///
    /// Keys starting with a PEM header are treated as RS256 public keys;
    /// anything else is an HS256 shared secret.
    ///
    /// # Examples
    /// ```
    /// use mytrip::inbound::http::auth::TokenVerifier;
    ///
    /// let verifier = TokenVerifier::new("dev-secret", Some("https://auth.example.com"))?;
    /// # let _ = verifier;
    /// # Ok::<(), mytrip::inbound::http::auth::VerifierConfigError>(())
    /// ```
    pub fn new(key: &str, issuer: Option<&str>) -> Result<Self, VerifierConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(VerifierConfigError::EmptyKey);
        }
        let (key, algorithm) = if key.starts_with("-----BEGIN") {
            (DecodingKey::from_rsa_pem(key.as_bytes())?, Algorithm::RS256)
        } else {
            (DecodingKey::from_secret(key.as_bytes()), Algorithm::HS256)
        };
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer.map(str::trim).filter(|value| !value.is_empty()) {
            validation.set_issuer(&[issuer]);
        }
        Ok(Self { key, validation })
    }

    /// Verify `token` and return the caller identity.
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let claims = match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                debug!(error = %err, "bearer token rejected");
                return None;
            }
        };
        let external_id = ExternalUserId::new(claims.sub).ok()?;
        let display_name = claims.name.and_then(|name| DisplayName::new(name).ok());
        Some(Identity {
            external_id,
            display_name,
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
        .filter(|token| !token.is_empty())
}

/// Resolve the caller for `req` using the verifier in [`HttpState`].
pub fn caller_for(req: &HttpRequest) -> Caller {
    let verifier = req
        .app_data::<web::Data<HttpState>>()
        .and_then(|state| state.verifier.clone());
    match (verifier, bearer_token(req)) {
        (Some(verifier), Some(token)) => verifier
            .verify(token)
            .map_or(Caller::Anonymous, Caller::Authenticated),
        _ => Caller::Anonymous,
    }
}

/// Extractor exposing the verified caller to handlers.
#[derive(Debug, Clone)]
pub struct CallerContext(Caller);

impl CallerContext {
    /// Borrow the caller.
    pub fn caller(&self) -> &Caller {
        &self.0
    }

    /// Require a verified identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<&Identity, Error> {
        self.0
            .identity()
            .ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED_MESSAGE))
    }
}

impl FromRequest for CallerContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(caller_for(req))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{bearer, test_state};
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn request_with(header_value: Option<&str>) -> HttpRequest {
        let mut request = TestRequest::default().app_data(web::Data::new(test_state()));
        if let Some(value) = header_value {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        request.to_http_request()
    }

    #[rstest]
    fn valid_token_yields_identity() {
        let header_value = bearer("user_2abc", Some("홍길동"));
        let caller = caller_for(&request_with(Some(&header_value)));
        let identity = caller.identity().expect("authenticated");
        assert_eq!(identity.external_id.as_ref(), "user_2abc");
        assert_eq!(
            identity.display_name.as_ref().map(AsRef::as_ref),
            Some("홍길동")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer not-a-jwt"))]
    fn unusable_credentials_are_anonymous(#[case] header_value: Option<&str>) {
        assert_eq!(caller_for(&request_with(header_value)), Caller::Anonymous);
    }

    #[rstest]
    fn wrong_issuer_is_anonymous() {
        let verifier =
            TokenVerifier::new(crate::inbound::http::test_utils::TEST_SECRET, Some("https://other"))
                .expect("verifier");
        let header_value = bearer("user_2abc", None);
        let token = header_value.trim_start_matches("Bearer ");
        assert!(verifier.verify(token).is_none());
    }

    #[rstest]
    fn empty_key_is_rejected() {
        assert!(matches!(
            TokenVerifier::new("  ", None),
            Err(VerifierConfigError::EmptyKey)
        ));
    }

    #[rstest]
    fn anonymous_context_requires_sign_in() {
        let context = CallerContext(Caller::Anonymous);
        let err = context.require_identity().expect_err("anonymous");
        assert_eq!(err.message(), SIGN_IN_REQUIRED_MESSAGE);
    }
}
