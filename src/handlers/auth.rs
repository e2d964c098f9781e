// src/handlers/auth.rs

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    api::AuthReply,
    common::error::validation_messages,
    config::AppState,
    middleware::{role_gate::area_for, SessionContext},
    models::auth::{LoginPayload, RegisterPayload},
    views::{
        self,
        auth::RegisterForm,
        Notice,
    },
};

fn redirect_with_cookies(to: &str, cookies: Vec<HeaderValue>) -> Response {
    let mut response = Redirect::to(to).into_response();
    for cookie in cookies {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

pub async fn login_form(session: SessionContext) -> Response {
    match session.role() {
        Some(role) => Redirect::to(area_for(role).root).into_response(),
        None => views::auth::login_page(&session, "", None).into_response(),
    }
}

pub async fn login(
    State(app_state): State<AppState>,
    session: SessionContext,
    Form(payload): Form<LoginPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        let outcome = Notice::errors(validation_messages(&errors));
        return views::auth::login_page(&session, &payload.email, Some(&outcome)).into_response();
    }

    match app_state.auth_service.sign_in_email(&payload).await {
        Ok(AuthReply { set_cookies, .. }) => {
            tracing::info!("User {} signed in", payload.email.trim());
            redirect_with_cookies("/", set_cookies)
        }
        Err(e) => {
            let message = if e.is_unauthorized() {
                "Invalid email or password.".to_string()
            } else {
                e.message()
            };
            let outcome = Notice::Error(message);
            (
                StatusCode::UNAUTHORIZED,
                views::auth::login_page(&session, &payload.email, Some(&outcome)),
            )
                .into_response()
        }
    }
}

pub async fn register_form(session: SessionContext) -> Html<String> {
    let form = RegisterForm { name: "", email: "", role: "CUSTOMER" };
    views::auth::register_page(&session, &form, None)
}

pub async fn register(
    State(app_state): State<AppState>,
    session: SessionContext,
    Form(payload): Form<RegisterPayload>,
) -> Response {
    let form = RegisterForm {
        name: &payload.name,
        email: &payload.email,
        role: &payload.role,
    };

    if let Err(errors) = payload.validate() {
        let outcome = Notice::errors(validation_messages(&errors));
        return views::auth::register_page(&session, &form, Some(&outcome)).into_response();
    }

    match app_state.auth_service.sign_up_email(&payload.to_sign_up()).await {
        Ok(reply) => {
            tracing::info!("Registered {} as {}", payload.email.trim(), payload.role);
            redirect_with_cookies("/", reply.set_cookies)
        }
        Err(e) => {
            let outcome = Notice::Error(e.message());
            views::auth::register_page(&session, &form, Some(&outcome)).into_response()
        }
    }
}

pub async fn logout(State(app_state): State<AppState>, session: SessionContext) -> Response {
    if session.cookies.is_empty() {
        return Redirect::to("/").into_response();
    }
    match app_state.auth_service.sign_out(&session.cookies).await {
        Ok(reply) => redirect_with_cookies("/", reply.set_cookies),
        Err(e) => {
            tracing::warn!("Sign out failed: {}", e);
            Redirect::to("/").into_response()
        }
    }
}

/// `GET /api/session`: `{data, error}` for scripts that poll the session.
pub async fn api_session(session: SessionContext) -> Response {
    match (&session.user, &session.error) {
        (Some(user), _) => Json(json!({ "data": { "user": user }, "error": null })).into_response(),
        (None, error) => {
            let message = error.as_deref().unwrap_or("No active session");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "data": null, "error": { "message": message } })),
            )
                .into_response()
        }
    }
}

pub async fn unauthorized(session: SessionContext) -> (StatusCode, Html<String>) {
    (StatusCode::FORBIDDEN, views::auth::unauthorized_page(&session))
}
