use crate::{
    actions::revalidate,
    api::{tags, ForwardedCookies},
    common::error::ServiceResult,
    config::AppState,
    models::order::{Order, OrderData, OrderStatus, OrderUpdate},
};

pub async fn create_order(state: &AppState, cookies: &ForwardedCookies, data: &OrderData) -> ServiceResult<Order> {
    let result = state.order_service.create(cookies, data).await;
    revalidate(&state.cache, tags::ORDERS).await;
    result
}

pub async fn update_order(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    patch: &OrderUpdate,
) -> ServiceResult<Order> {
    let result = state.order_service.update(cookies, id, patch).await;
    revalidate(&state.cache, tags::ORDERS).await;
    result
}

pub async fn update_order_status(
    state: &AppState,
    cookies: &ForwardedCookies,
    id: &str,
    status: OrderStatus,
) -> ServiceResult<Order> {
    let result = state.order_service.update_status(cookies, id, status).await;
    revalidate(&state.cache, tags::ORDERS).await;
    result
}

pub async fn delete_order(state: &AppState, cookies: &ForwardedCookies, id: &str) -> ServiceResult<()> {
    let result = state.order_service.delete(cookies, id).await;
    revalidate(&state.cache, tags::ORDERS).await;
    result
}
