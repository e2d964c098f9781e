// src/middleware/session.rs

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    api::ForwardedCookies,
    common::error::AppError,
    config::AppState,
    models::auth::{Role, SessionUser},
};

/// Who is asking, resolved once per request by `session_loader`.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<SessionUser>,
    pub cookies: ForwardedCookies,
    /// Why the session could not be read, when the auth service failed.
    pub error: Option<String>,
}

impl SessionContext {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

pub async fn session_loader(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookies = ForwardedCookies::from_headers(request.headers());

    let context = match app_state.user_service.get_session(&cookies).await {
        Ok(user) => SessionContext {
            user,
            cookies,
            error: None,
        },
        Err(e) => SessionContext {
            user: None,
            cookies,
            error: Some(e.message()),
        },
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

// Handlers outside the loader see an anonymous visitor.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default())
    }
}

/// The logged-in user; anonymous visitors are sent to `/login`.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(|ctx| ctx.user.clone())
            .map(CurrentUser)
            .ok_or(AppError::Unauthenticated)
    }
}
