use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::catalog::{Provider, ProviderData},
};

pub async fn create_provider(
    state: &AppState,
    cookies: &ForwardedCookies,
    data: &ProviderData,
) -> ServiceResult<Provider> {
    let result = state.provider_service.create(cookies, data).await;
    revalidate(&state.cache, tags::PROVIDERS).await;
    result
}

pub async fn update_provider(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    data: &ProviderData,
) -> ServiceResult<Provider> {
    let result = state.provider_service.update(cookies, id, data).await;
    revalidate(&state.cache, tags::PROVIDERS).await;
    result
}
