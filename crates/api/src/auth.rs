// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and role checks.
//!
//! Identity is asserted by the fronting identity service through request
//! headers. This module turns those header values into an
//! `AuthenticatedActor`; it never invents one.

use std::str::FromStr;

use fips_reporting_domain::UserEmail;
use thiserror::Error;

use crate::error::AuthError;

/// Header carrying the caller's email address.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Header carrying the caller's role. Absent means `Reporter`.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Manages metric definitions and product assignments.
    Admin,
    /// Records values and submits returns for assigned products.
    Reporter,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Reporter => "Reporter",
        }
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "reporter" => Ok(Self::Reporter),
            _ => Err(IdentityError::UnknownRole(s.trim().to_string())),
        }
    }
}

/// Why identity headers could not be turned into an actor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("no caller identity was supplied")]
    MissingEmail,
    #[error("caller email '{0}' is not a valid address")]
    InvalidEmail(String),
    #[error("role '{0}' is not recognised")]
    UnknownRole(String),
}

impl From<IdentityError> for AuthError {
    fn from(err: IdentityError) -> Self {
        Self::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's normalized email, which is also their reporter identity.
    pub email: UserEmail,
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(email: UserEmail, role: Role) -> Self {
        Self { email, role }
    }
}

/// Builds an actor from the raw identity header values.
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the email is missing or
/// malformed, or the role is not recognised.
pub fn authenticate(
    email_header: Option<&str>,
    role_header: Option<&str>,
) -> Result<AuthenticatedActor, AuthError> {
    let raw_email: &str = email_header
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or(IdentityError::MissingEmail)?;
    let email: UserEmail =
        UserEmail::new(raw_email).map_err(|_| IdentityError::InvalidEmail(raw_email.to_string()))?;

    let role: Role = match role_header.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw_role) => raw_role.parse()?,
        None => Role::Reporter,
    };

    Ok(AuthenticatedActor::new(email, role))
}

/// Role-based access checks.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only admins may create, edit, enable, disable or delete metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_metrics(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "manage_metrics")
    }

    /// Only admins may change which products a reporter is responsible for.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_assignments(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_admin(actor, "manage_assignments")
    }

    /// Reporters may only view their own assignments; admins may view anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if a reporter asks about someone else.
    pub fn authorize_view_assignments(
        actor: &AuthenticatedActor,
        reporter: &UserEmail,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin || &actor.email == reporter {
            Ok(())
        } else {
            require_admin(actor, "view_assignments")
        }
    }
}

fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
    match actor.role {
        Role::Admin => Ok(()),
        Role::Reporter => Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: String::from(Role::Admin.as_str()),
        }),
    }
}
