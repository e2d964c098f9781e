use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::review::{Review, ReviewData, ReviewUpdate},
};

pub async fn create_review(state: &AppState, cookies: &ForwardedCookies, data: &ReviewData) -> ServiceResult<Review> {
    let result = state.review_service.create(cookies, data).await;
    revalidate(&state.cache, tags::REVIEWS).await;
    result
}

pub async fn update_review(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    data: &ReviewUpdate,
) -> ServiceResult<Review> {
    let result = state.review_service.update(cookies, id, data).await;
    revalidate(&state.cache, tags::REVIEWS).await;
    result
}

pub async fn delete_review(state: &AppState, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
    let result = state.review_service.delete(cookies, id).await;
    revalidate(&state.cache, tags::REVIEWS).await;
    result
}
