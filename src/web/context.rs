//! Request context, e.g. user id, its role, etc.
//!

use axum::{extract::FromRequestParts, http::request::Parts};

pub use crate::model::UserRole;
use crate::model::Authorizer;
use crate::web::{WebResult, error::WebError};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user_id: String,
    user_role: UserRole,
}

impl AuthenticatedUser {
    pub fn new<S: Into<String>>(user_id: S, user_role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            user_role,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_role(&self) -> UserRole {
        self.user_role
    }
}

impl Authorizer for AuthenticatedUser {
    fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.user_role)
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    maybe_user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn new(maybe_user: Option<AuthenticatedUser>) -> Self {
        Self { maybe_user }
    }

    pub fn user(&self) -> WebResult<&AuthenticatedUser> {
        self.maybe_user.as_ref().ok_or(WebError::auth_required())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<RequestContext>();
        if let Some(ctx) = ctx {
            Ok(ctx.clone())
        } else {
            Ok(RequestContext::new(None))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn capability() {
        assert!(AuthenticatedUser::new("1", UserRole::Admin).can_edit());
        assert!(AuthenticatedUser::new("7", UserRole::Instructor).can_edit());
        assert!(!AuthenticatedUser::new("8", UserRole::Learner).can_edit());
    }
}
