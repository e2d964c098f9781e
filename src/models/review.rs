// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::auth::{Role, SessionUser};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub customer: Option<ReviewAuthor>,
}

impl Review {
    pub fn is_written_by(&self, user_id: &str) -> bool {
        self.customer.as_ref().is_some_and(|c| c.id == user_id)
    }
}

// ---
// Review form
// ---

fn parse_rating(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|r| (1..=5).contains(r))
}

fn validate_rating(value: &str) -> Result<(), ValidationError> {
    if parse_rating(value).is_none() {
        let mut err = ValidationError::new("range");
        err.message = Some("Rating must be between 1 and 5.".into());
        return Err(err);
    }
    Ok(())
}

/// `rating` stays text so a blank or garbled value reaches validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewPayload {
    #[validate(custom(function = "validate_rating"))]
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
}

// Body of `POST /api/reviews`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub meal_id: String,
}

// Body of `PATCH /api/reviews/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub comment: String,
}

impl ReviewPayload {
    /// Only meaningful after `validate()` passed.
    pub fn rating(&self) -> u8 {
        parse_rating(&self.rating).unwrap_or(5)
    }

    pub fn for_meal(&self, meal_id: &str) -> ReviewData {
        let comment = self.comment.trim();
        ReviewData {
            rating: self.rating(),
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            meal_id: meal_id.to_string(),
        }
    }

    pub fn as_update(&self) -> ReviewUpdate {
        ReviewUpdate {
            rating: self.rating(),
            comment: self.comment.trim().to_string(),
        }
    }
}

// ---
// Who may do what with reviews, checked before any backend call
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Create,
    Edit,
    Delete,
}

pub fn authorize_review(
    user: Option<&SessionUser>,
    action: ReviewAction,
    target: Option<&Review>,
) -> Result<(), &'static str> {
    let Some(user) = user else {
        return Err("Please login to manage reviews");
    };

    match action {
        ReviewAction::Create if user.role != Role::Customer => Err("Only customers can submit reviews"),
        ReviewAction::Edit if user.role != Role::Customer => Err("Only customers can edit reviews"),
        ReviewAction::Edit if !target.is_some_and(|r| r.is_written_by(&user.id)) => {
            Err("You can only edit your own reviews")
        }
        ReviewAction::Delete if user.role != Role::Admin => Err("Only administrators can delete reviews"),
        _ => Ok(()),
    }
}

/// Reviews shown under a meal plus the outcome of the last submit.
#[derive(Debug, Clone, Default)]
pub struct ReviewSection {
    pub reviews: Vec<Review>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ReviewSection {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            ..Default::default()
        }
    }

    pub fn rejected(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// A freshly created review goes on top of the visible list.
    pub fn created(mut self, review: Review) -> Self {
        self.reviews.retain(|r| r.id != review.id);
        self.reviews.insert(0, review);
        self.success = Some("Review added successfully!".into());
        self
    }

    pub fn updated(mut self, id: &str, payload: &ReviewPayload) -> Self {
        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == id) {
            review.rating = Some(payload.rating());
            review.comment = Some(payload.comment.trim().to_string());
        }
        self.success = Some("Review updated successfully!".into());
        self
    }

    pub fn deleted(mut self, id: &str) -> Self {
        self.reviews.retain(|r| r.id != id);
        self.success = Some("Review deleted successfully!".into());
        self
    }

    pub fn has_reviewed(&self, user_id: &str) -> bool {
        self.reviews.iter().any(|r| r.is_written_by(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> SessionUser {
        SessionUser {
            id: id.into(),
            name: "Test".into(),
            email: format!("{id}@example.com"),
            role,
            email_verified: true,
            image: None,
        }
    }

    fn review(id: &str, author: &str) -> Review {
        Review {
            id: id.into(),
            rating: Some(4),
            comment: Some("Fine".into()),
            created_at: None,
            customer: Some(ReviewAuthor { id: author.into(), name: None }),
        }
    }

    #[test]
    fn only_customers_create() {
        let customer = user("c1", Role::Customer);
        let provider = user("p1", Role::Provider);
        assert!(authorize_review(Some(&customer), ReviewAction::Create, None).is_ok());
        assert_eq!(
            authorize_review(Some(&provider), ReviewAction::Create, None),
            Err("Only customers can submit reviews")
        );
        assert!(authorize_review(None, ReviewAction::Create, None).is_err());
    }

    #[test]
    fn customers_edit_only_their_own() {
        let customer = user("c1", Role::Customer);
        let mine = review("r1", "c1");
        let theirs = review("r2", "c2");
        assert!(authorize_review(Some(&customer), ReviewAction::Edit, Some(&mine)).is_ok());
        assert_eq!(
            authorize_review(Some(&customer), ReviewAction::Edit, Some(&theirs)),
            Err("You can only edit your own reviews")
        );
    }

    #[test]
    fn only_admins_delete() {
        let admin = user("a1", Role::Admin);
        let customer = user("c1", Role::Customer);
        let target = review("r1", "c1");
        assert!(authorize_review(Some(&admin), ReviewAction::Delete, Some(&target)).is_ok());
        assert!(authorize_review(Some(&customer), ReviewAction::Delete, Some(&target)).is_err());
    }

    #[test]
    fn created_review_is_prepended() {
        let section = ReviewSection::new(vec![review("r1", "c2"), review("r2", "c3")])
            .created(review("r9", "c1"));
        let ids: Vec<_> = section.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r9", "r1", "r2"]);
        assert!(section.has_reviewed("c1"));
        assert!(section.success.is_some());
    }

    #[test]
    fn rating_outside_range_is_invalid() {
        let payload = ReviewPayload { rating: "6".into(), comment: String::new() };
        assert!(payload.validate().is_err());
        let payload = ReviewPayload { rating: "5".into(), comment: " Great ".into() };
        assert!(payload.validate().is_ok());
        assert_eq!(payload.for_meal("m1").comment.as_deref(), Some("Great"));
    }

    #[test]
    fn unreadable_rating_fails_validation() {
        for raw in ["", "abc", "0", "2.5"] {
            let payload = ReviewPayload { rating: raw.into(), comment: String::new() };
            let errors = payload.validate().unwrap_err();
            assert_eq!(
                crate::common::error::validation_messages(&errors),
                vec!["Rating must be between 1 and 5.".to_string()]
            );
        }
        let payload = ReviewPayload { rating: " 3 ".into(), comment: String::new() };
        assert_eq!(payload.for_meal("m1").rating, 3);
    }
}
