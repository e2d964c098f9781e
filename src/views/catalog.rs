// src/views/catalog.rs

use axum::response::Html;

use crate::{
    common::error::ServiceResult,
    middleware::SessionContext,
    models::{
        auth::Role,
        catalog::{Category, Meal, Provider, ProviderFilter},
        pagination::Paginated,
        review::{Review, ReviewSection},
    },
    views::{date, empty_state, error_state, escape, money, notice, page, pagination, Notice},
};

// ---
// Cards
// ---

fn stars(rating: Option<u8>) -> String {
    let filled = usize::from(rating.unwrap_or(0).min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn meal_card(meal: &Meal) -> String {
    let availability = if meal.is_available {
        r#"<span class="badge">Available</span>"#
    } else {
        r#"<span class="badge">Unavailable</span>"#
    };
    let provider = meal
        .provider
        .as_ref()
        .and_then(|p| p.restaurant_name.as_deref())
        .map(|name| format!("<p>by {}</p>", escape(name)))
        .unwrap_or_default();
    let rating = meal
        .average_rating
        .map(|r| format!("<p>{:.1} / 5 ({} reviews)</p>", r, meal.total_reviews.unwrap_or(0)))
        .unwrap_or_default();

    format!(
        r#"<div class="card"><img src="{}" alt="{}"><h3><a href="/meals/{}">{}</a></h3>{}<p>{}</p>{}<p><strong>{}</strong> {}</p></div>"#,
        escape(meal.image_url()),
        escape(&meal.name),
        escape(&meal.id),
        escape(&meal.name),
        provider,
        escape(&meal.description),
        rating,
        money(meal.price),
        availability
    )
}

fn meal_grid(meals: &[Meal], empty: &str) -> String {
    if meals.is_empty() {
        return empty_state(empty);
    }
    format!(r#"<div class="grid">{}</div>"#, meals.iter().map(meal_card).collect::<String>())
}

fn provider_card(provider: &Provider) -> String {
    let open = if provider.is_open { "Open" } else { "Closed" };
    format!(
        r#"<div class="card"><h3><a href="/providers/{}">{}</a></h3><p>{}</p><p>{}</p><span class="badge">{}</span></div>"#,
        escape(&provider.id),
        escape(provider.display_name()),
        escape(provider.description.as_deref().unwrap_or("")),
        escape(provider.address.as_deref().unwrap_or("")),
        open
    )
}

fn category_card(category: &Category) -> String {
    format!(
        r#"<div class="card"><h3><a href="/categories/{}">{}</a></h3></div>"#,
        escape(&category.id),
        escape(&category.name)
    )
}

// ---
// Pages
// ---

pub fn home(
    session: &SessionContext,
    categories: &ServiceResult<Vec<Category>>,
    meals: &ServiceResult<Paginated<Meal>>,
    providers: &ServiceResult<Paginated<Provider>>,
) -> Html<String> {
    let categories = match categories {
        Ok(list) if list.is_empty() => empty_state("No categories yet."),
        Ok(list) => format!(r#"<div class="grid">{}</div>"#, list.iter().map(category_card).collect::<String>()),
        Err(e) => error_state("Could not load categories", &e.message()),
    };
    let meals = match meals {
        Ok(page) => meal_grid(&page.data, "No meals available right now."),
        Err(e) => error_state("Could not load meals", &e.message()),
    };
    let providers = match providers {
        Ok(page) if page.data.is_empty() => empty_state("No restaurants yet."),
        Ok(page) => format!(
            r#"<div class="grid">{}</div>"#,
            page.data.iter().map(provider_card).collect::<String>()
        ),
        Err(e) => error_state("Could not load restaurants", &e.message()),
    };

    let body = format!(
        r#"<h1>Delicious meals, delivered</h1><p>Order from the best local restaurants.</p>
<h2>Categories</h2>{categories}
<h2>Popular meals</h2>{meals}<p><a href="/meals">Browse all meals</a></p>
<h2>Restaurants</h2>{providers}<p><a href="/providers">See all restaurants</a></p>"#
    );
    page("Home", session, &body)
}

pub fn meals_list(session: &SessionContext, result: &ServiceResult<Paginated<Meal>>) -> Html<String> {
    let body = match result {
        Ok(list) => {
            let (first, last) = list.meta.showing(list.data.len());
            format!(
                "<h1>All meals</h1><p>Showing {first}-{last} of {}</p>{}{}",
                list.meta.total,
                meal_grid(&list.data, "No meals found."),
                pagination(&list.meta, "/meals", &[])
            )
        }
        Err(e) => format!("<h1>All meals</h1>{}", error_state("Could not load meals", &e.message())),
    };
    page("Meals", session, &body)
}

/// State of the order form under a meal.
#[derive(Debug, Clone)]
pub struct OrderForm {
    pub delivery_address: String,
    pub quantity: u32,
    pub notice: Option<Notice>,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            delivery_address: String::new(),
            quantity: 1,
            notice: None,
        }
    }
}

fn order_form(session: &SessionContext, meal: &Meal, form: &OrderForm) -> String {
    if !meal.is_available {
        return format!(
            "{}{}",
            notice(form.notice.as_ref()),
            empty_state("This meal is currently unavailable.")
        );
    }
    match session.role() {
        Some(Role::Customer) => format!(
            r#"<div class="card"><h2>Place an order</h2>{}<form method="post" action="/meals/{}/order">
<label for="delivery_address">Delivery address</label><input id="delivery_address" name="delivery_address" value="{}" required>
<label for="quantity">Quantity</label><input id="quantity" name="quantity" type="number" min="1" value="{}">
<p>Payment: Cash on delivery</p><button type="submit">Order now</button></form></div>"#,
            notice(form.notice.as_ref()),
            escape(&meal.id),
            escape(&form.delivery_address),
            form.quantity.max(1)
        ),
        Some(_) => r#"<div class="card"><p>Only customers can place orders.</p></div>"#.to_string(),
        None => r#"<div class="card"><p><a href="/login">Login</a> to place an order.</p></div>"#.to_string(),
    }
}

fn review_item(session: &SessionContext, meal_id: &str, review: &Review) -> String {
    let author = review
        .customer
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .unwrap_or("Anonymous");

    let mut controls = String::new();
    if let Some(user) = &session.user {
        if user.role == Role::Customer && review.is_written_by(&user.id) {
            controls.push_str(&format!(
                r#"<form method="post" action="/meals/{}/reviews/{}/edit"><select name="rating">{}</select><input name="comment" value="{}"><button type="submit">Update</button></form>"#,
                escape(meal_id),
                escape(&review.id),
                rating_options(review.rating.unwrap_or(5)),
                escape(review.comment.as_deref().unwrap_or(""))
            ));
        }
        if user.role == Role::Admin {
            controls.push_str(&format!(
                r#"<form class="inline" method="post" action="/meals/{}/reviews/{}/delete"><button type="submit">Delete</button></form>"#,
                escape(meal_id),
                escape(&review.id)
            ));
        }
    }

    format!(
        r#"<div class="card review"><p>{} <strong>{}</strong> <small>{}</small></p><p>{}</p>{}</div>"#,
        stars(review.rating),
        escape(author),
        date(review.created_at),
        escape(review.comment.as_deref().unwrap_or("")),
        controls
    )
}

fn rating_options(selected: u8) -> String {
    (1..=5u8)
        .rev()
        .map(|r| {
            let attr = if r == selected { " selected" } else { "" };
            format!(r#"<option value="{r}"{attr}>{r}</option>"#)
        })
        .collect()
}

fn review_section(session: &SessionContext, meal_id: &str, section: &ReviewSection) -> String {
    let outcome = match (&section.error, &section.success) {
        (Some(e), _) => notice(Some(&Notice::Error(e.clone()))),
        (None, Some(s)) => notice(Some(&Notice::Success(s.clone()))),
        _ => String::new(),
    };

    let already_reviewed = session
        .user
        .as_ref()
        .is_some_and(|u| section.has_reviewed(&u.id));
    let form = if session.user.is_some() && !already_reviewed {
        format!(
            r#"<form method="post" action="/meals/{}/reviews"><label for="rating">Rating</label><select id="rating" name="rating">{}</select>
<label for="comment">Comment</label><textarea id="comment" name="comment"></textarea><button type="submit">Submit review</button></form>"#,
            escape(meal_id),
            rating_options(5)
        )
    } else if session.user.is_none() {
        r#"<p><a href="/login">Login</a> to write a review.</p>"#.to_string()
    } else {
        String::new()
    };

    let list = if section.reviews.is_empty() {
        empty_state("No reviews yet. Be the first to review!")
    } else {
        section
            .reviews
            .iter()
            .map(|r| review_item(session, meal_id, r))
            .collect()
    };

    format!(
        r#"<section id="reviews"><h2>Reviews ({})</h2>{outcome}{form}<div class="reviews">{list}</div></section>"#,
        section.reviews.len()
    )
}

pub fn meal_detail(
    session: &SessionContext,
    meal: &Meal,
    form: &OrderForm,
    reviews: &ReviewSection,
) -> Html<String> {
    let category = meal
        .category
        .as_ref()
        .map(|c| format!(r#"<span class="badge">{}</span>"#, escape(&c.name)))
        .unwrap_or_default();
    let provider = match (meal.owning_provider_id(), meal.provider.as_ref()) {
        (Some(id), Some(p)) => format!(
            r#"<p>by <a href="/providers/{}">{}</a></p>"#,
            escape(id),
            escape(p.restaurant_name.as_deref().unwrap_or("Restaurant"))
        ),
        _ => String::new(),
    };

    let body = format!(
        r#"<p><a href="/meals">&larr; Back to meals</a></p><div class="card"><img src="{}" alt="{}"><h1>{}</h1>{}{}<p>{}</p><p><strong>{}</strong></p></div>{}{}"#,
        escape(meal.image_url()),
        escape(&meal.name),
        escape(&meal.name),
        category,
        provider,
        escape(&meal.description),
        money(meal.price),
        order_form(session, meal, form),
        review_section(session, &meal.id, reviews)
    );
    page(&meal.name, session, &body)
}

pub fn categories_list(session: &SessionContext, result: &ServiceResult<Vec<Category>>) -> Html<String> {
    let body = match result {
        Ok(list) if list.is_empty() => format!("<h1>Categories</h1>{}", empty_state("No categories yet.")),
        Ok(list) => format!(
            r#"<h1>Categories</h1><div class="grid">{}</div>"#,
            list.iter().map(category_card).collect::<String>()
        ),
        Err(e) => format!("<h1>Categories</h1>{}", error_state("Could not load categories", &e.message())),
    };
    page("Categories", session, &body)
}

pub fn category_detail(session: &SessionContext, category: &Category) -> Html<String> {
    let body = format!(
        r#"<p><a href="/categories">&larr; All categories</a></p><h1>{}</h1>{}"#,
        escape(&category.name),
        meal_grid(&category.meals, "No meals in this category yet.")
    );
    page(&category.name, session, &body)
}

fn provider_filters(filter: &ProviderFilter, action: &str) -> String {
    let search = filter.search.as_deref().unwrap_or("");
    let option = |value: &str, label: &str| {
        let selected = if filter.is_open.as_deref().unwrap_or("") == value { " selected" } else { "" };
        format!(r#"<option value="{value}"{selected}>{label}</option>"#)
    };
    format!(
        r#"<form method="get" action="{action}" class="card"><label for="search">Search</label><input id="search" name="search" value="{}">
<label for="isOpen">Status</label><select id="isOpen" name="isOpen">{}{}{}</select><button type="submit">Filter</button></form>"#,
        escape(search),
        option("", "All"),
        option("true", "Open"),
        option("false", "Closed")
    )
}

/// Query pairs that pagination links must carry to keep the filter.
pub fn provider_filter_pairs(filter: &ProviderFilter) -> Vec<(&'static str, String)> {
    vec![
        ("search", filter.search.clone().unwrap_or_default()),
        ("isOpen", filter.is_open.clone().unwrap_or_default()),
    ]
}

pub fn providers_list(
    session: &SessionContext,
    result: &ServiceResult<Paginated<Provider>>,
    filter: &ProviderFilter,
) -> Html<String> {
    let list = match result {
        Ok(list) if list.data.is_empty() => empty_state("No restaurants match your filters."),
        Ok(list) => format!(
            r#"<div class="grid">{}</div>{}"#,
            list.data.iter().map(provider_card).collect::<String>(),
            pagination(&list.meta, "/providers", &provider_filter_pairs(filter))
        ),
        Err(e) => error_state("Could not load restaurants", &e.message()),
    };
    let body = format!("<h1>Restaurants</h1>{}{}", provider_filters(filter, "/providers"), list);
    page("Providers", session, &body)
}

pub fn provider_detail(session: &SessionContext, provider: &Provider) -> Html<String> {
    let open = if provider.is_open { "Open now" } else { "Closed" };
    let body = format!(
        r#"<p><a href="/providers">&larr; All restaurants</a></p><div class="card"><h1>{}</h1><span class="badge">{}</span><p>{}</p><p>{}</p><p>{}</p></div><h2>Menu</h2>{}"#,
        escape(provider.display_name()),
        open,
        escape(provider.description.as_deref().unwrap_or("")),
        escape(provider.address.as_deref().unwrap_or("")),
        escape(provider.phone.as_deref().unwrap_or("")),
        meal_grid(&provider.meals, "This restaurant has no meals yet.")
    );
    page(provider.display_name(), session, &body)
}

/// Filter form shared with the admin provider listing.
pub fn admin_provider_filters(filter: &ProviderFilter) -> String {
    provider_filters(filter, "/admin-dashboard/providers")
}

pub fn provider_rows(providers: &[Provider]) -> String {
    providers
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(p.display_name()),
                escape(p.address.as_deref().unwrap_or("")),
                escape(p.phone.as_deref().unwrap_or("")),
                if p.is_open { "Open" } else { "Closed" },
                date(p.created_at)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::ReviewAuthor;

    #[test]
    fn stars_fill_up_to_rating() {
        assert_eq!(stars(Some(3)), "★★★☆☆");
        assert_eq!(stars(None), "☆☆☆☆☆");
        assert_eq!(stars(Some(9)), "★★★★★");
    }

    #[test]
    fn review_markup_escapes_comments() {
        let review = Review {
            id: "r1".into(),
            rating: Some(5),
            comment: Some("<script>".into()),
            created_at: None,
            customer: Some(ReviewAuthor { id: "c1".into(), name: Some("Ana".into()) }),
        };
        let html = review_item(&SessionContext::default(), "m1", &review);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("Delete"));
    }
}
