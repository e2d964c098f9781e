// src/services/auth.rs

use serde_json::json;

use crate::{
    api::{ApiClient, AuthReply, ForwardedCookies},
    common::error::ServiceResult,
    models::auth::{LoginPayload, SignUpData},
};

/// Email/password sign-in against the auth service. The session lives in the
/// cookies it sets; callers relay `AuthReply::set_cookies` to the browser.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn sign_in_email(&self, payload: &LoginPayload) -> ServiceResult<AuthReply> {
        let body = json!({
            "email": payload.email.trim(),
            "password": payload.password,
        });
        self.api
            .auth_post("sign in", "/sign-in/email", &ForwardedCookies::none(), &body)
            .await
    }

    pub async fn sign_up_email(&self, data: &SignUpData) -> ServiceResult<AuthReply> {
        self.api
            .auth_post("sign up", "/sign-up/email", &ForwardedCookies::none(), data)
            .await
    }

    pub async fn sign_out(&self, cookies: &ForwardedCookies) -> ServiceResult<AuthReply> {
        self.api
            .auth_post("sign out", "/sign-out", cookies, &json!({}))
            .await
    }
}
