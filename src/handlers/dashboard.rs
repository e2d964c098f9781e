// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    config::AppState,
    handlers::clamp_page,
    middleware::CurrentUser,
    middleware::SessionContext,
    models::{order::OrderStatus, pagination::PageQuery},
    services::OrderParams,
    views,
};

const ORDERS_PER_PAGE: u32 = 10;

/// `GET /dashboard`
pub async fn overview(
    State(app_state): State<AppState>,
    session: SessionContext,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    let params = OrderParams {
        customer_id: Some(user.id.clone()),
        limit: Some(ORDERS_PER_PAGE),
        ..Default::default()
    };
    let orders = app_state.order_service.list(&session.cookies, &params).await;

    let stats = match &orders {
        Ok(page) => {
            let active = page
                .data
                .iter()
                .filter(|o| !matches!(o.status, OrderStatus::Delivered | OrderStatus::Cancelled))
                .count();
            vec![
                ("Total orders", page.meta.total.to_string()),
                ("In progress", active.to_string()),
            ]
        }
        Err(_) => Vec::new(),
    };

    views::dashboard::overview(
        &session,
        "My dashboard",
        &stats,
        &[("Browse meals", "/meals"), ("My orders", "/dashboard/orders"), ("Profile", "/dashboard/profile")],
        &orders,
    )
}

/// `GET /dashboard/orders`
pub async fn orders(
    State(app_state): State<AppState>,
    session: SessionContext,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page();
    let params = OrderParams {
        customer_id: Some(user.id),
        page: Some(page),
        limit: Some(ORDERS_PER_PAGE),
        ..Default::default()
    };
    let result = app_state.order_service.list(&session.cookies, &params).await;

    if let Some(redirect) = result.as_ref().ok().and_then(|list| clamp_page(list, "/dashboard/orders", page)) {
        return redirect;
    }
    views::dashboard::customer_orders(&session, &result).into_response()
}
