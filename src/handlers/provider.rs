// src/handlers/provider.rs

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    actions,
    api::CacheMode,
    common::error::{validation_messages, ServiceResult},
    config::AppState,
    handlers::clamp_page,
    middleware::SessionContext,
    models::{
        auth::Profile,
        catalog::{MealPayload, ProviderData, ProviderPayload},
        order::{OrderStatus, StatusForm},
        pagination::PageQuery,
    },
    services::{MealParams, OrderParams},
    views::{
        self,
        dashboard::{MealEditor, MealFormValues, OrderTable},
        Notice,
    },
};

const ORDERS_BASE: &str = "/provider-dashboard/orders";
const PER_PAGE: u32 = 10;

// =========================================================================
//  Overview
// =========================================================================

/// `GET /provider-dashboard`
pub async fn overview(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let provider_id = profile.as_ref().ok().and_then(|p| p.provider_id()).map(str::to_string);

    let order_params = OrderParams {
        provider_id: provider_id.clone(),
        limit: Some(PER_PAGE),
        ..Default::default()
    };
    let meal_params = MealParams {
        provider_id: provider_id.clone(),
        limit: Some(1),
        ..Default::default()
    };
    let (orders, meals) = tokio::join!(
        app_state.order_service.list(&session.cookies, &order_params),
        app_state.meal_service.list(&meal_params, CacheMode::NoStore),
    );

    let mut stats = vec![(
        "Restaurant",
        restaurant_name(&profile).unwrap_or_else(|| "Not set up yet".to_string()),
    )];
    if let Ok(page) = &orders {
        let pending = page.data.iter().filter(|o| o.status == OrderStatus::Pending).count();
        stats.push(("Orders", page.meta.total.to_string()));
        stats.push(("Pending", pending.to_string()));
    }
    if let Ok(page) = &meals {
        stats.push(("Meals", page.meta.total.to_string()));
    }

    views::dashboard::overview(
        &session,
        "Provider dashboard",
        &stats,
        &[
            ("Manage orders", ORDERS_BASE),
            ("Manage meals", "/provider-dashboard/meals"),
            ("Restaurant", "/provider-dashboard/restaurant"),
        ],
        &orders,
    )
}

fn restaurant_name(profile: &ServiceResult<Profile>) -> Option<String> {
    profile
        .as_ref()
        .ok()?
        .provider_profile
        .as_ref()?
        .restaurant_name
        .clone()
}

// =========================================================================
//  Orders
// =========================================================================

async fn render_orders(
    app_state: &AppState,
    session: &SessionContext,
    page: u32,
    outcome: Option<&Notice>,
) -> Response {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let params = OrderParams {
        provider_id: profile.as_ref().ok().and_then(|p| p.provider_id()).map(str::to_string),
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
        edit_quantities: false,
        allow_delete: false,
        editing: None,
    };
    views::dashboard::managed_orders(session, "Orders", &result, &table, outcome).into_response()
}

/// `GET /provider-dashboard/orders`
pub async fn orders(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PageQuery>,
) -> Response {
    render_orders(&app_state, &session, query.page(), None).await
}

/// `POST /provider-dashboard/orders/{id}/status`
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
    render_orders(&app_state, &session, page, Some(&outcome)).await
}

// =========================================================================
//  Meals
// =========================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MealsQuery {
    pub page: Option<String>,
    pub edit: Option<String>,
}

async fn render_meals(
    app_state: &AppState,
    session: &SessionContext,
    page: u32,
    editor: MealEditor<'_>,
    outcome: Option<&Notice>,
) -> Response {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let Some(provider_id) = profile.as_ref().ok().and_then(|p| p.provider_id()).map(str::to_string) else {
        let body = r#"<h1>My meals</h1><div class="notice error">Set up your restaurant before adding meals. <a href="/provider-dashboard/restaurant">Go to restaurant settings</a></div>"#;
        return views::dashboard_page("My meals", session, body).into_response();
    };

    let params = MealParams {
        provider_id: Some(provider_id),
        page: Some(page),
        limit: Some(PER_PAGE),
        ..Default::default()
    };
    let (meals, categories) = tokio::join!(
        app_state.meal_service.list(&params, CacheMode::NoStore),
        app_state.category_service.list(CacheMode::cached()),
    );

    if let Some(redirect) = meals
        .as_ref()
        .ok()
        .and_then(|list| clamp_page(list, "/provider-dashboard/meals", page))
    {
        return redirect;
    }
    let categories = categories.unwrap_or_default();
    views::dashboard::provider_meals(session, &meals, &categories, &editor, outcome).into_response()
}

/// `GET /provider-dashboard/meals[?edit={id}]`
pub async fn meals(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<MealsQuery>,
) -> Response {
    let page = PageQuery { page: query.page.clone() }.page();

    let editing = match query.edit.as_deref() {
        Some(id) => app_state
            .meal_service
            .get(id, CacheMode::NoStore)
            .await
            .ok()
            .map(|meal| (meal.id.clone(), MealFormValues::from(&meal))),
        None => None,
    };
    let editor = match &editing {
        Some((id, values)) => MealEditor::Edit(id, values.clone()),
        None => MealEditor::Create(MealFormValues::default()),
    };
    render_meals(&app_state, &session, page, editor, None).await
}

/// `POST /provider-dashboard/meals`
pub async fn create_meal(
    State(app_state): State<AppState>,
    session: SessionContext,
    Form(payload): Form<MealPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        let outcome = Notice::errors(validation_messages(&errors));
        let editor = MealEditor::Create(MealFormValues::from(&payload));
        return render_meals(&app_state, &session, 1, editor, Some(&outcome)).await;
    }

    let result = actions::meal::create_meal(&app_state, &session.cookies, &payload.to_data()).await;
    let editor = match &result {
        Ok(_) => MealEditor::Create(MealFormValues::default()),
        Err(_) => MealEditor::Create(MealFormValues::from(&payload)),
    };
    let outcome = Notice::from_result(&result, "Meal created successfully!");
    render_meals(&app_state, &session, 1, editor, Some(&outcome)).await
}

/// `POST /provider-dashboard/meals/{id}`
pub async fn update_meal(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
    Form(payload): Form<MealPayload>,
) -> Response {
    if let Err(errors) = payload.validate() {
        let outcome = Notice::errors(validation_messages(&errors));
        let editor = MealEditor::Edit(&id, MealFormValues::from(&payload));
        return render_meals(&app_state, &session, 1, editor, Some(&outcome)).await;
    }

    let result = actions::meal::update_meal(&app_state, &session.cookies, &id, &payload.to_data()).await;
    let editor = match &result {
        Ok(_) => MealEditor::Create(MealFormValues::default()),
        Err(_) => MealEditor::Edit(&id, MealFormValues::from(&payload)),
    };
    let outcome = Notice::from_result(&result, "Meal updated successfully!");
    render_meals(&app_state, &session, 1, editor, Some(&outcome)).await
}

/// `POST /provider-dashboard/meals/{id}/delete`
pub async fn delete_meal(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Response {
    let result = actions::meal::delete_meal(&app_state, &session.cookies, &id).await;
    let outcome = Notice::from_result(&result, "Meal deleted successfully!");
    render_meals(&app_state, &session, 1, MealEditor::Create(MealFormValues::default()), Some(&outcome)).await
}

// =========================================================================
//  Restaurant profile
// =========================================================================

/// `GET /provider-dashboard/restaurant`
pub async fn restaurant(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let restaurant = profile
        .as_ref()
        .ok()
        .filter(|p| p.provider_id().is_some())
        .and_then(|p| p.provider_profile.as_ref());
    views::dashboard::restaurant_page(&session, restaurant, None)
}

/// `POST /provider-dashboard/restaurant`: creates the restaurant on first save.
pub async fn save_restaurant(
    State(app_state): State<AppState>,
    session: SessionContext,
    Form(payload): Form<ProviderPayload>,
) -> Html<String> {
    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let existing = profile.as_ref().ok().and_then(|p| p.provider_id()).map(str::to_string);

    let outcome = match payload.validate() {
        Err(errors) => Notice::errors(validation_messages(&errors)),
        Ok(()) => {
            let data = ProviderData::from(&payload);
            match existing {
                Some(id) => {
                    let result = actions::provider::update_provider(&app_state, &session.cookies, &id, &data).await;
                    Notice::from_result(&result, "Restaurant updated successfully!")
                }
                None => {
                    let result = actions::provider::create_provider(&app_state, &session.cookies, &data).await;
                    Notice::from_result(&result, "Restaurant created successfully!")
                }
            }
        }
    };

    let profile = app_state.user_service.get_profile(&session.cookies).await;
    let restaurant = profile
        .as_ref()
        .ok()
        .filter(|p| p.provider_id().is_some())
        .and_then(|p| p.provider_profile.as_ref());
    views::dashboard::restaurant_page(&session, restaurant, Some(&outcome))
}
