// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::{
    actions,
    api::CacheMode,
    common::error::{validation_messages, AppError},
    config::AppState,
    middleware::SessionContext,
    models::{
        auth::Role,
        order::{OrderData, PlaceOrderPayload},
        review::ReviewSection,
    },
    views::{self, catalog::OrderForm, Notice},
};

/// `POST /meals/{id}/order`: a single-meal, cash-on-delivery order.
pub async fn place_order(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(meal_id): Path<String>,
    Form(payload): Form<PlaceOrderPayload>,
) -> Result<Response, AppError> {
    if session.user.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }

    let meal = app_state.meal_service.get(&meal_id, CacheMode::cached()).await?;
    let reviews = ReviewSection::new(meal.reviews.clone());
    let mut form = OrderForm {
        delivery_address: payload.delivery_address.clone(),
        quantity: payload.quantity(),
        notice: None,
    };

    let outcome = if !session.has_role(Role::Customer) {
        Notice::Error("Only customers can place orders.".into())
    } else if !meal.is_available {
        Notice::Error("This meal is currently unavailable.".into())
    } else if let Err(errors) = payload.validate() {
        Notice::errors(validation_messages(&errors))
    } else if let Some(provider_id) = meal.owning_provider_id() {
        let data = OrderData::single_meal(provider_id, &meal.id, meal.price, &payload);
        match actions::order::create_order(&app_state, &session.cookies, &data).await {
            Ok(order) => {
                tracing::info!("Order {} placed for meal {}", order.id, meal.id);
                form = OrderForm::default();
                Notice::Success("Order placed successfully! Track it under My Orders.".into())
            }
            Err(e) if e.is_unauthorized() => return Ok(Redirect::to("/login").into_response()),
            Err(e) => Notice::Error(e.message()),
        }
    } else {
        Notice::Error("This meal is not linked to a restaurant.".into())
    };

    form.notice = Some(outcome);
    Ok(views::catalog::meal_detail(&session, &meal, &form, &reviews).into_response())
}
