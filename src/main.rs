//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod actions;
mod api;
mod common;
mod config;
mod handlers;
mod middleware;
mod models;
mod services;
mod views;

#[cfg(test)]
mod test_support;

use crate::common::error::AppError;
use crate::config::{AppState, Settings};
use crate::middleware::{role_gate, session_loader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    // If configuration is incomplete the storefront must not start.
    let settings = Settings::from_env()?;
    let bind_addr = settings.bind_addr.clone();
    let app_state = AppState::new(settings)?;

    let app = app(app_state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Storefront listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn app(app_state: AppState) -> Router {
    // Public storefront and account pages
    let public_routes = Router::new()
        .route("/", get(handlers::catalog::home))
        .route("/meals", get(handlers::catalog::meals))
        .route("/meals/{id}", get(handlers::catalog::meal_detail))
        .route("/meals/{id}/order", post(handlers::orders::place_order))
        .route("/meals/{id}/reviews", post(handlers::reviews::create_review))
        .route(
            "/meals/{id}/reviews/{review_id}/edit",
            post(handlers::reviews::edit_review),
        )
        .route(
            "/meals/{id}/reviews/{review_id}/delete",
            post(handlers::reviews::delete_review),
        )
        .route("/categories", get(handlers::catalog::categories))
        .route("/categories/{id}", get(handlers::catalog::category_detail))
        .route("/providers", get(handlers::catalog::providers))
        .route("/providers/{id}", get(handlers::catalog::provider_detail))
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_form).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/unauthorized", get(handlers::auth::unauthorized))
        .route("/api/session", get(handlers::auth::api_session));

    let customer_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::overview))
        .route("/dashboard/orders", get(handlers::dashboard::orders))
        .route(
            "/dashboard/profile",
            get(handlers::profile::show).post(handlers::profile::update),
        );

    let provider_routes = Router::new()
        .route("/provider-dashboard", get(handlers::provider::overview))
        .route("/provider-dashboard/orders", get(handlers::provider::orders))
        .route(
            "/provider-dashboard/orders/{id}/status",
            post(handlers::provider::update_order_status),
        )
        .route(
            "/provider-dashboard/meals",
            get(handlers::provider::meals).post(handlers::provider::create_meal),
        )
        .route(
            "/provider-dashboard/meals/{id}",
            post(handlers::provider::update_meal),
        )
        .route(
            "/provider-dashboard/meals/{id}/delete",
            post(handlers::provider::delete_meal),
        )
        .route(
            "/provider-dashboard/restaurant",
            get(handlers::provider::restaurant).post(handlers::provider::save_restaurant),
        )
        .route(
            "/provider-dashboard/profile",
            get(handlers::profile::show).post(handlers::profile::update),
        );

    let admin_routes = Router::new()
        .route("/admin-dashboard", get(handlers::admin::overview))
        .route("/admin-dashboard/users", get(handlers::admin::users))
        .route(
            "/admin-dashboard/users/{id}/delete",
            post(handlers::admin::delete_user),
        )
        .route(
            "/admin-dashboard/categories",
            get(handlers::admin::categories).post(handlers::admin::create_category),
        )
        .route(
            "/admin-dashboard/categories/{id}",
            post(handlers::admin::update_category),
        )
        .route("/admin-dashboard/orders", get(handlers::admin::orders))
        .route(
            "/admin-dashboard/orders/{id}/status",
            post(handlers::admin::update_order_status),
        )
        .route(
            "/admin-dashboard/orders/{id}/quantity",
            post(handlers::admin::adjust_quantity),
        )
        .route(
            "/admin-dashboard/orders/{id}/items",
            post(handlers::admin::save_quantities),
        )
        .route(
            "/admin-dashboard/orders/{id}/delete",
            post(handlers::admin::delete_order),
        )
        .route("/admin-dashboard/providers", get(handlers::admin::providers));

    // The gate runs inside the session loader: every request has its
    // SessionContext before any role check or handler sees it.
    Router::new()
        .merge(public_routes)
        .merge(customer_routes)
        .merge(provider_routes)
        .merge(admin_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { AppError::NotFound })
        .layer(axum_middleware::from_fn(role_gate))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            session_loader,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
