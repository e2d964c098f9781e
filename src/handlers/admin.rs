// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    actions,
    api::CacheMode,
    common::error::validation_messages,
    config::AppState,
    handlers::clamp_page,
    middleware::{CurrentUser, SessionContext},
    models::{
        catalog::{CategoryData, CategoryPayload, ProviderFilter},
        order::{OrderDraft, OrderStatus, QuantityForm, StatusForm},
        pagination::{overflow_redirect, PageQuery},
    },
    services::{OrderParams, ProviderParams},
    views::{self, dashboard::OrderTable, query_string, Notice},
};

const ORDERS_BASE: &str = "/admin-dashboard/orders";
const PER_PAGE: u32 = 10;

// =========================================================================
//  Overview
// =========================================================================

/// `GET /admin-dashboard`
pub async fn overview(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let order_params = OrderParams {
        limit: Some(PER_PAGE),
        ..Default::default()
    };
    let provider_params = ProviderParams {
        limit: Some(1),
        ..Default::default()
    };
    let (users, providers, orders) = tokio::join!(
        app_state.user_service.list_users(&session.cookies),
        app_state.provider_service.list(&provider_params, CacheMode::NoStore),
        app_state.order_service.list(&session.cookies, &order_params),
    );

    let mut stats = Vec::new();
    if let Ok(users) = &users {
        stats.push(("Users", users.len().to_string()));
    }
    if let Ok(page) = &providers {
        stats.push(("Providers", page.meta.total.to_string()));
    }
    if let Ok(page) = &orders {
        stats.push(("Orders", page.meta.total.to_string()));
    }

    views::dashboard::overview(
        &session,
        "Admin dashboard",
        &stats,
        &[
            ("Users", "/admin-dashboard/users"),
            ("Categories", "/admin-dashboard/categories"),
            ("Orders", ORDERS_BASE),
            ("Providers", "/admin-dashboard/providers"),
        ],
        &orders,
    )
}

// =========================================================================
//  Users
// =========================================================================

/// `GET /admin-dashboard/users`
pub async fn users(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let users = app_state.user_service.list_users(&session.cookies).await;
    views::dashboard::users_page(&session, &users, None)
}

/// `POST /admin-dashboard/users/{id}/delete`. An admin never deletes their own account.
pub async fn delete_user(
    State(app_state): State<AppState>,
    session: SessionContext,
    CurrentUser(current): CurrentUser,
    Path(id): Path<String>,
) -> Html<String> {
    let outcome = if id == current.id {
        Notice::Error("You cannot delete your own account.".into())
    } else {
        let result = actions::user::delete_user(&app_state, &session.cookies, &id).await;
        Notice::from_result(&result, "User deleted successfully!")
    };
    let users = app_state.user_service.list_users(&session.cookies).await;
    views::dashboard::users_page(&session, &users, Some(&outcome))
}

// =========================================================================
//  Categories
// =========================================================================

#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    pub edit: Option<String>,
}

async fn render_categories(
    app_state: &AppState,
    session: &SessionContext,
    editing: Option<&str>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let categories = app_state.category_service.list(CacheMode::cached()).await;
    let current = match (&categories, editing) {
        (Ok(list), Some(id)) => list.iter().find(|c| c.id == id),
        _ => None,
    };
    views::dashboard::admin_categories(session, &categories, current, outcome)
}

/// `GET /admin-dashboard/categories[?edit={id}]`
pub async fn categories(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<EditQuery>,
) -> Html<String> {
    render_categories(&app_state, &session, query.edit.as_deref(), None).await
}

/// `POST /admin-dashboard/categories`
pub async fn create_category(
    State(app_state): State<AppState>,
    session: SessionContext,
    Form(payload): Form<CategoryPayload>,
) -> Html<String> {
    let outcome = match payload.validate() {
        Err(errors) => Notice::errors(validation_messages(&errors)),
        Ok(()) => {
            let result = actions::category::create_category(&app_state, &session.cookies, &CategoryData::from(&payload)).await;
            Notice::from_result(&result, "Category created successfully!")
        }
    };
    render_categories(&app_state, &session, None, Some(&outcome)).await
}

/// `POST /admin-dashboard/categories/{id}`
pub async fn update_category(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(payload): Form<CategoryPayload>,
) -> Html<String> {
    let (outcome, editing) = match payload.validate() {
        Err(errors) => (Notice::errors(validation_messages(&errors)), Some(id.as_str())),
        Ok(()) => {
            let data = CategoryData::from(&payload);
            let result = actions::category::update_category(&app_state, &session.cookies, &id, &data).await;
            (Notice::from_result(&result, "Category updated successfully!"), None)
        }
    };
    render_categories(&app_state, &session, editing, Some(&outcome)).await
}

// =========================================================================
//  Orders
// =========================================================================

async fn render_orders(
    app_state: &AppState,
    session: &SessionContext,
    page: u32,
    editing: Option<(&str, &OrderDraft)>,
    outcome: Option<&Notice>,
) -> Response {
    let params = OrderParams {
        page: Some(page),
        limit: Some(PER_PAGE),
        ..Default::default()
    };
    let result = app_state.order_service.list(&session.cookies, &params).await;

    if let Some(redirect) = result.as_ref().ok().and_then(|list| clamp_page(list, ORDERS_BASE, page)) {
        return redirect;
    }
    let table = OrderTable {
        base: ORDERS_BASE,
        page,
        edit_quantities: true,
        allow_delete: true,
        editing,
    };
    views::dashboard::managed_orders(session, "All orders", &result, &table, outcome).into_response()
}

/// `GET /admin-dashboard/orders`
pub async fn orders(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PageQuery>,
) -> Response {
    render_orders(&app_state, &session, query.page(), None, None).await
}

/// `POST /admin-dashboard/orders/{id}/status`
pub async fn update_order_status(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let outcome = match OrderStatus::parse(&form.status) {
        Some(status) => {
            let result = actions::order::update_order_status(&app_state, &session.cookies, &id, status).await;
            Notice::from_result(&result, "Order status updated successfully!")
        }
        None => Notice::Error(format!("Unknown order status '{}'.", form.status)),
    };
    let page = PageQuery { page: form.page }.page();
    render_orders(&app_state, &session, page, None, Some(&outcome)).await
}

/// `POST /admin-dashboard/orders/{id}/quantity`: adjusts the local draft only.
pub async fn adjust_quantity(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(form): Form<QuantityForm>,
) -> Response {
    let page = PageQuery { page: form.page.clone() }.page();
    let Some(mut draft) = OrderDraft::decode(&form.draft) else {
        let outcome = Notice::Error("The order editor was out of date. Please try again.".into());
        return render_orders(&app_state, &session, page, None, Some(&outcome)).await;
    };
    draft.adjust(&form.meal_id, form.delta);
    render_orders(&app_state, &session, page, Some((&id, &draft)), None).await
}

#[derive(Debug, Deserialize)]
pub struct DraftForm {
    pub draft: String,
    #[serde(default)]
    pub page: Option<String>,
}

/// `POST /admin-dashboard/orders/{id}/items`: saves the edited quantities.
pub async fn save_quantities(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(form): Form<DraftForm>,
) -> Response {
    let outcome = match OrderDraft::decode(&form.draft).filter(|d| !d.lines.is_empty()) {
        Some(draft) => {
            let result = actions::order::update_order(&app_state, &session.cookies, &id, &draft.to_update()).await;
            Notice::from_result(&result, "Order updated successfully!")
        }
        None => Notice::Error("Nothing to save.".into()),
    };
    let page = PageQuery { page: form.page }.page();
    render_orders(&app_state, &session, page, None, Some(&outcome)).await
}

/// `POST /admin-dashboard/orders/{id}/delete`
pub async fn delete_order(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(form): Form<PageQuery>,
) -> Response {
    let result = actions::order::delete_order(&app_state, &session.cookies, &id).await;
    let outcome = Notice::from_result(&result, "Order deleted successfully!");
    render_orders(&app_state, &session, form.page(), None, Some(&outcome)).await
}

// =========================================================================
//  Providers
// =========================================================================

/// `GET /admin-dashboard/providers`
pub async fn providers(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(filter): Query<ProviderFilter>,
) -> Response {
    let page = PageQuery { page: filter.page.clone() }.page();
    let params = ProviderParams {
        search: filter.search.clone().filter(|s| !s.trim().is_empty()),
        is_open: filter.is_open(),
        page: Some(page),
        limit: Some(PER_PAGE),
    };
    let result = app_state.provider_service.list(&params, CacheMode::NoStore).await;

    if let Some(last) = result.as_ref().ok().and_then(|list| overflow_redirect(&list.meta, page)) {
        let mut pairs = views::catalog::provider_filter_pairs(&filter);
        pairs.push(("page", last.to_string()));
        return Redirect::to(&format!("/admin-dashboard/providers{}", query_string(&pairs))).into_response();
    }
    views::dashboard::admin_providers(&session, &result, &filter).into_response()
}
