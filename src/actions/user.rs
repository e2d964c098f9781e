use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::auth::{Profile, ProfileUpdateData},
};

pub async fn update_profile(
    state: &AppState,
    cookies: &ForwardedCookies,
    data: &ProfileUpdateData,
) -> ServiceResult<Profile> {
    let result = state.user_service.update_profile(cookies, data).await;
    revalidate(&state.cache, tags::USERS).await;
    result
}

pub async fn delete_user(state: &AppState, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
    let result = state.user_service.delete_user(cookies, id).await;
    revalidate(&state.cache, tags::USERS).await;
    result
}
