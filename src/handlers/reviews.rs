// src/handlers/reviews.rs

use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use validator::Validate;

use crate::{
    actions,
    api::CacheMode,
    common::error::{validation_messages, AppError},
    config::AppState,
    middleware::SessionContext,
    models::review::{authorize_review, ReviewAction, ReviewPayload, ReviewSection},
    views::{self, catalog::OrderForm},
};

async fn render(
    app_state: &AppState,
    session: &SessionContext,
    meal_id: &str,
    outcome: impl FnOnce(ReviewSection) -> ReviewSection,
) -> Result<Html<String>, AppError> {
    let meal = app_state.meal_service.get(meal_id, CacheMode::cached()).await?;
    let section = outcome(ReviewSection::new(meal.reviews.clone()));
    Ok(views::catalog::meal_detail(session, &meal, &OrderForm::default(), &section))
}

/// `POST /meals/{id}/reviews`. Permission and form checks run before the backend is called.
pub async fn create_review(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path(meal_id): Path<String>,
    Form(payload): Form<ReviewPayload>,
) -> Result<Html<String>, AppError> {
    if let Err(message) = authorize_review(session.user.as_ref(), ReviewAction::Create, None) {
        return render(&app_state, &session, &meal_id, |s| s.rejected(message)).await;
    }
    if let Err(errors) = payload.validate() {
        let message = validation_messages(&errors).join(" ");
        return render(&app_state, &session, &meal_id, |s| s.rejected(message)).await;
    }

    let result = actions::review::create_review(&app_state, &session.cookies, &payload.for_meal(&meal_id)).await;
    render(&app_state, &session, &meal_id, |s| match result {
        Ok(review) => s.created(review),
        Err(e) => s.rejected(e.message()),
    })
    .await
}

/// `POST /meals/{id}/reviews/{review_id}/edit`
pub async fn edit_review(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path((meal_id, review_id)): Path<(String, String)>,
    Form(payload): Form<ReviewPayload>,
) -> Result<Html<String>, AppError> {
    let meal = app_state.meal_service.get(&meal_id, CacheMode::cached()).await?;
    let target = meal.reviews.iter().find(|r| r.id == review_id);

    if let Err(message) = authorize_review(session.user.as_ref(), ReviewAction::Edit, target) {
        let section = ReviewSection::new(meal.reviews.clone()).rejected(message);
        return Ok(views::catalog::meal_detail(&session, &meal, &OrderForm::default(), &section));
    }
    if let Err(errors) = payload.validate() {
        let section = ReviewSection::new(meal.reviews.clone()).rejected(validation_messages(&errors).join(" "));
        return Ok(views::catalog::meal_detail(&session, &meal, &OrderForm::default(), &section));
    }

    let result = actions::review::update_review(&app_state, &session.cookies, &review_id, &payload.as_update()).await;
    render(&app_state, &session, &meal_id, |s| match result {
        Ok(_) => s.updated(&review_id, &payload),
        Err(e) => s.rejected(e.message()),
    })
    .await
}

/// `POST /meals/{id}/reviews/{review_id}/delete`
pub async fn delete_review(
    State(app_state): State<AppState>,
    session: SessionContext,
    Path((meal_id, review_id)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    if let Err(message) = authorize_review(session.user.as_ref(), ReviewAction::Delete, None) {
        return render(&app_state, &session, &meal_id, |s| s.rejected(message)).await;
    }

    let result = actions::review::delete_review(&app_state, &session.cookies, &review_id).await;
    render(&app_state, &session, &meal_id, |s| match result {
        Ok(()) => s.deleted(&review_id),
        Err(e) => s.rejected(e.message()),
    })
    .await
}
