//! Bearer API-key authentication.
//!
//! Handlers receive the authenticated [`Actor`] as an extractor. The raw key
//! never leaves this module: its SHA-256 hex fingerprint is looked up through
//! the user cache, and the matching user is reduced to an actor.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::UserStoreError;
use crate::domain::{Actor, Error};
use crate::inbound::http::state::HttpState;

/// Lowercase hex SHA-256 fingerprint of an API key.
#[must_use]
pub fn fingerprint(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}

fn bearer_key(req: &HttpRequest) -> Result<String, Error> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing Authorization header"))?;
    let value = value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed Authorization header"))?;
    let key = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("Authorization scheme must be Bearer"))?
        .trim();
    if key.is_empty() {
        return Err(Error::unauthorized("empty bearer API key"));
    }
    Ok(key.to_owned())
}

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserStoreError::Query { message } => Error::internal(format!("user lookup failed: {message}")),
    }
}

impl FromRequest for Actor {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let key = bearer_key(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let key = key?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user = state
                .users
                .get_or_load(&fingerprint(&key))
                .await
                .map_err(map_store_error)?
                .ok_or_else(|| {
                    debug!("bearer key does not match any user");
                    Error::unauthorized("unknown API key")
                })?;
            Ok(user.actor())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[test]
    fn fingerprints_are_lowercase_hex_sha256() {
        let fp = fingerprint("terraviva");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // Stable across calls.
        assert_eq!(fp, fingerprint("terraviva"));
        assert_ne!(fp, fingerprint("terraviva2"));
    }

    #[rstest]
    #[case(TestRequest::default())]
    #[case(TestRequest::default().insert_header((header::AUTHORIZATION, "Basic dXNlcg==")))]
    #[case(TestRequest::default().insert_header((header::AUTHORIZATION, "Bearer   ")))]
    fn bad_headers_are_unauthorised(#[case] request: TestRequest) {
        let req = request.to_http_request();
        let err = bearer_key(&req).expect_err("header must be rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn bearer_key_is_extracted_and_trimmed() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer  abc123 "))
            .to_http_request();
        assert_eq!(bearer_key(&req).expect("valid header"), "abc123");
    }

    #[test]
    fn connection_failures_surface_as_service_unavailable() {
        let err = map_store_error(UserStoreError::connection("pool down"));
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
