// src/handlers/profile.rs

use axum::{extract::State, http::Uri, response::Html, Form};
use validator::Validate;

use crate::{
    actions,
    common::error::validation_messages,
    config::AppState,
    middleware::SessionContext,
    models::auth::{ProfileUpdateData, ProfileUpdatePayload},
    views::{self, Notice},
};

// Shared by `/dashboard/profile` and `/provider-dashboard/profile`; the form
// posts back to the path it was served from.

pub async fn show(State(app_state): State<AppState>, session: SessionContext, uri: Uri) -> Html<String> {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    views::dashboard::profile_page(&session, uri.path(), &profile, None)
}

pub async fn update(
    State(app_state): State<AppState>,
    session: SessionContext,
    uri: Uri,
    Form(payload): Form<ProfileUpdatePayload>,
) -> Html<String> {
    let outcome = match payload.validate() {
        Err(errors) => Notice::errors(validation_messages(&errors)),
        Ok(()) => {
            let data = ProfileUpdateData::from(&payload);
            let result = actions::user::update_profile(&app_state, &session.cookies, &data).await;
            Notice::from_result(&result, "Profile updated successfully!")
        }
    };

    let profile = app_state.user_service.get_profile(&session.cookies).await;
    views::dashboard::profile_page(&session, uri.path(), &profile, Some(&outcome))
}
