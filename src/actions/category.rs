use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::catalog::{Category, CategoryData},
};

pub async fn create_category(
    state: &AppState,
    cookies: &ForwardedCookies,
    data: &CategoryData,
) -> ServiceResult<Category> {
    let result = state.category_service.create(cookies, data).await;
    revalidate(&state.cache, tags::CATEGORIES).await;
    result
}

pub async fn update_category(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    data: &CategoryData,
) -> ServiceResult<Category> {
    let result = state.category_service.update(cookies, id, data).await;
    revalidate(&state.cache, tags::CATEGORIES).await;
    result
}
