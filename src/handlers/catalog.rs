// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::CacheMode,
    common::error::AppError,
    config::AppState,
    handlers::clamp_page,
    middleware::SessionContext,
    models::{
        catalog::ProviderFilter,
        pagination::{overflow_redirect, PageQuery},
        review::ReviewSection,
    },
    services::{MealParams, ProviderParams},
    views::{self, catalog::OrderForm, query_string},
};

const MEALS_PER_PAGE: u32 = 12;
const PROVIDERS_PER_PAGE: u32 = 9;

pub async fn home(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let meal_params = MealParams {
        is_available: Some(true),
        limit: Some(6),
        ..Default::default()
    };
    let provider_params = ProviderParams {
        limit: Some(6),
        ..Default::default()
    };

    let (categories, meals, providers) = tokio::join!(
        app_state.category_service.list(CacheMode::cached()),
        app_state.meal_service.list(&meal_params, CacheMode::cached()),
        app_state.provider_service.list(&provider_params, CacheMode::cached()),
    );

    views::catalog::home(&session, &categories, &meals, &providers)
}

pub async fn meals(
    State(app_state): State<AppState>,
    session: SessionContext,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page();
    let params = MealParams {
        page: Some(page),
        limit: Some(MEALS_PER_PAGE),
        ..Default::default()
    };
    let result = app_state.meal_service.list(&params, CacheMode::cached()).await;

    if let Some(redirect) = result.as_ref().ok().and_then(|list| clamp_page(list, "/meals", page)) {
        return redirect;
    }
    views::catalog::meals_list(&session, &result).into_response()
}

pub async fn meal_detail(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let meal = app_state.meal_service.get(&id, CacheMode::cached()).await?;
    let reviews = ReviewSection::new(meal.reviews.clone());
    Ok(views::catalog::meal_detail(&session, &meal, &OrderForm::default(), &reviews))
}

pub async fn categories(State(app_state): State<AppState>, session: SessionContext) -> Html<String> {
    let result = app_state.category_service.list(CacheMode::cached()).await;
    views::catalog::categories_list(&session, &result)
}

pub async fn category_detail(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let category = app_state.category_service.get(&id, CacheMode::cached()).await?;
    Ok(views::catalog::category_detail(&session, &category))
}

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
        limit: Some(PROVIDERS_PER_PAGE),
    };
    let result = app_state.provider_service.list(&params, CacheMode::cached()).await;

    if let Some(last) = result.as_ref().ok().and_then(|list| overflow_redirect(&list.meta, page)) {
        let mut pairs = views::catalog::provider_filter_pairs(&filter);
        pairs.push(("page", last.to_string()));
        return Redirect::to(&format!("/providers{}", query_string(&pairs))).into_response();
    }
    views::catalog::providers_list(&session, &result, &filter).into_response()
}

pub async fn provider_detail(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let provider = app_state.provider_service.get(&id).await?;
    Ok(views::catalog::provider_detail(&session, &provider))
}
