// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction for the server.
//!
//! The identity service in front of this server asserts who the caller is
//! through the `x-user-email` and `x-user-role` headers. This extractor
//! turns them into an `AuthenticatedActor`, rejecting the request with 401
//! when the email is missing or malformed or the role is unknown.

use axum::{extract::FromRequestParts, http::request::Parts};
use fips_reporting_api::{
    ApiError, AuthenticatedActor, USER_EMAIL_HEADER, USER_ROLE_HEADER, authenticate,
};
use tracing::{debug, warn};

use crate::HttpError;

/// Extractor for the calling user.
///
/// ```ignore
/// async fn my_handler(Caller(actor): Caller) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
/// }
/// ```
pub struct Caller(pub AuthenticatedActor);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email: Option<&str> = header_value(parts, USER_EMAIL_HEADER)?;
        let role: Option<&str> = header_value(parts, USER_ROLE_HEADER)?;

        let actor: AuthenticatedActor = authenticate(email, role).map_err(|e| {
            warn!(error = %e, "Caller identity rejected");
            HttpError::from(ApiError::from(e))
        })?;

        debug!(user = %actor.email, role = actor.role.as_str(), "Caller identified");
        Ok(Self(actor))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, HttpError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Identity header is not valid text");
                HttpError::from(ApiError::AuthenticationFailed {
                    reason: format!("header '{name}' is not valid text"),
                })
            })
        })
        .transpose()
}
