use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::catalog::{Meal, MealData},
};

pub async fn create_meal(state: &AppState, cookies: &ForwardedCookies, data: &MealData) -> ServiceResult<Meal> {
    let result = state.meal_service.create(cookies, data).await;
    revalidate(&state.cache, tags::MEALS).await;
    result
}

pub async fn update_meal(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    data: &MealData,
) -> ServiceResult<Meal> {
    let result = state.meal_service.update(cookies, id, data).await;
    revalidate(&state.cache, tags::MEALS).await;
    result
}

pub async fn delete_meal(state: &AppState, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
    let result = state.meal_service.delete(cookies, id).await;
    revalidate(&state.cache, tags::MEALS).await;
    result
}
