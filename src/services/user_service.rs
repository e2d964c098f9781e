// src/services/user_service.rs

use reqwest::Method;

use crate::{
    api::{ApiClient, Envelope, FetchOptions, ForwardedCookies},
    common::error::ServiceResult,
    models::auth::{Profile, ProfileUpdateData, SessionEnvelope, SessionUser, User},
};

#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `Ok(None)` when the auth service answers `null`, i.e. nobody is logged in.
    pub async fn get_session(&self, cookies: &ForwardedCookies) -> ServiceResult<Option<SessionUser>> {
        if cookies.is_empty() {
            return Ok(None);
        }
        let session: Option<SessionEnvelope> = self
            .api
            .auth_get("fetch session", "/get-session", cookies)
            .await?;
        Ok(session.map(|s| s.user))
    }

    pub async fn get_profile(&self, cookies: &ForwardedCookies) -> ServiceResult<Profile> {
        let profile: Envelope<Profile> = self
            .api
            .get("fetch profile", "/api/users/profile", &[], cookies, FetchOptions::no_store())
            .await?;
        Ok(profile.into_inner())
    }

    pub async fn update_profile(
        &self,
        cookies: &ForwardedCookies,
        data: &ProfileUpdateData,
    ) -> ServiceResult<Profile> {
        let profile: Envelope<Profile> = self
            .api
            .send("update profile", Method::PATCH, "/api/users/profile", cookies, data)
            .await?;
        Ok(profile.into_inner())
    }

    pub async fn list_users(&self, cookies: &ForwardedCookies) -> ServiceResult<Vec<User>> {
        let users: Envelope<Vec<User>> = self
            .api
            .get("fetch users", "/api/users", &[], cookies, FetchOptions::no_store())
            .await?;
        Ok(users.into_inner())
    }

    pub async fn delete_user(&self, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
        self.api
            .delete("delete user", &format!("/api/users/{id}"), cookies)
            .await
    }
}
