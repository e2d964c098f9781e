// src/views/dashboard.rs

use axum::response::Html;

use crate::{
    common::error::ServiceResult,
    middleware::SessionContext,
    models::{
        auth::{Profile, ProviderProfile, User},
        catalog::{Category, Meal, MealPayload, Provider, ProviderFilter},
        order::{Order, OrderDraft, OrderStatus},
        pagination::Paginated,
    },
    views::{
        catalog::{admin_provider_filters, provider_filter_pairs, provider_rows},
        dashboard_page, date, empty_state, error_state, escape, money, notice, pagination, Notice,
    },
};

// ---
// Overview
// ---

pub fn overview(
    session: &SessionContext,
    title: &str,
    stats: &[(&str, String)],
    links: &[(&str, &str)],
    recent: &ServiceResult<Paginated<Order>>,
) -> Html<String> {
    let name = session.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
    let stats: String = stats
        .iter()
        .map(|(label, value)| format!(r#"<div class="card"><p>{}</p><h2>{}</h2></div>"#, label, escape(value)))
        .collect();
    let links: String = links
        .iter()
        .map(|(label, href)| format!(r#"<a class="card" href="{href}">{label}</a>"#))
        .collect();
    let recent = match recent {
        Ok(page) if page.data.is_empty() => empty_state("No orders yet."),
        Ok(page) => order_summary_table(&page.data[..page.data.len().min(5)]),
        Err(e) => error_state("Could not load orders", &e.message()),
    };
    let body = format!(
        r#"<h1>{}</h1><p>Welcome back, {}.</p><div class="grid">{stats}</div><div class="grid">{links}</div><h2>Recent orders</h2>{recent}"#,
        escape(title),
        escape(name)
    );
    dashboard_page(title, session, &body)
}

// ---
// Orders
// ---

fn status_badge(status: OrderStatus) -> String {
    format!(r#"<span class="badge">{}</span>"#, status.label())
}

fn order_summary_table(orders: &[Order]) -> String {
    let rows: String = orders
        .iter()
        .map(|o| {
            format!(
                "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(o.short_id()),
                escape(&o.items_summary()),
                money(o.total_price),
                status_badge(o.status),
                date(o.created_at)
            )
        })
        .collect();
    format!(
        "<table><thead><tr><th>Order</th><th>Items</th><th>Total</th><th>Status</th><th>Placed</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

pub fn customer_orders(
    session: &SessionContext,
    result: &ServiceResult<Paginated<Order>>,
) -> Html<String> {
    let body = match result {
        Ok(page) if page.data.is_empty() => {
            format!(r#"<h1>My orders</h1>{}<p><a href="/meals">Browse meals</a></p>"#, empty_state("You have not ordered anything yet."))
        }
        Ok(page) => {
            let rows: String = page
                .data
                .iter()
                .map(|o| {
                    let restaurant = o
                        .provider
                        .as_ref()
                        .and_then(|p| p.restaurant_name.as_deref())
                        .unwrap_or("-");
                    format!(
                        "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape(o.short_id()),
                        escape(restaurant),
                        escape(&o.items_summary()),
                        escape(&o.delivery_address),
                        money(o.total_price),
                        status_badge(o.status),
                        date(o.created_at)
                    )
                })
                .collect();
            format!(
                "<h1>My orders</h1><table><thead><tr><th>Order</th><th>Restaurant</th><th>Items</th><th>Address</th><th>Total</th><th>Status</th><th>Placed</th></tr></thead><tbody>{rows}</tbody></table>{}",
                pagination(&page.meta, "/dashboard/orders", &[])
            )
        }
        Err(e) => format!("<h1>My orders</h1>{}", error_state("Could not load orders", &e.message())),
    };
    dashboard_page("My orders", session, &body)
}

/// How a management table lets its viewer edit orders.
pub struct OrderTable<'a> {
    pub base: &'a str,
    /// Page the table shows; every form posts it back so the same page is re-rendered.
    pub page: u32,
    pub edit_quantities: bool,
    pub allow_delete: bool,
    /// Draft of the order currently being edited, if any.
    pub editing: Option<(&'a str, &'a OrderDraft)>,
}

fn page_field(page: u32) -> String {
    format!(r#"<input type="hidden" name="page" value="{page}">"#)
}

fn status_form(base: &str, page: u32, order: &Order) -> String {
    let options: String = OrderStatus::ALL
        .iter()
        .map(|s| {
            let selected = if *s == order.status { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, s.as_str(), selected, s.label())
        })
        .collect();
    format!(
        r#"<form class="inline" method="post" action="{}/{}/status">{}<select name="status">{}</select><button type="submit">Update</button></form>"#,
        base,
        escape(&order.id),
        page_field(page),
        options
    )
}

fn quantity_editor(base: &str, page: u32, order: &Order, draft: &OrderDraft) -> String {
    let encoded = escape(&draft.encode());
    let page = page_field(page);
    let order_id = escape(&order.id);
    let lines: String = draft
        .lines
        .iter()
        .map(|line| {
            let name = order
                .items
                .iter()
                .find(|i| i.meal_id == line.meal_id)
                .map(|i| i.meal_name())
                .unwrap_or("Item");
            let button = |delta: i64, label: &str| {
                format!(
                    r#"<form class="inline" method="post" action="{base}/{order_id}/quantity">{page}<input type="hidden" name="draft" value="{encoded}"><input type="hidden" name="meal_id" value="{}"><input type="hidden" name="delta" value="{delta}"><button type="submit">{label}</button></form>"#,
                    escape(&line.meal_id)
                )
            };
            format!(
                "<div>{} {} <strong>{}</strong> {} x {}</div>",
                escape(name),
                button(-1, "-"),
                line.quantity,
                button(1, "+"),
                money(line.unit_price)
            )
        })
        .collect();
    format!(
        r#"{lines}<p>Estimated total: {}</p><form method="post" action="{base}/{order_id}/items">{page}<input type="hidden" name="draft" value="{encoded}"><button type="submit">Save quantities</button></form>"#,
        money(draft.estimated_total())
    )
}

pub fn managed_orders(
    session: &SessionContext,
    title: &str,
    result: &ServiceResult<Paginated<Order>>,
    table: &OrderTable<'_>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let content = match result {
        Ok(page) if page.data.is_empty() => empty_state("No orders found."),
        Ok(page) => {
            let rows: String = page
                .data
                .iter()
                .map(|o| {
                    let customer = o
                        .customer
                        .as_ref()
                        .and_then(|c| c.name.as_deref().or(c.email.as_deref()))
                        .unwrap_or("-");
                    let items = if table.edit_quantities {
                        let draft = match table.editing {
                            Some((id, draft)) if id == o.id => draft.clone(),
                            _ => OrderDraft::from_order(o),
                        };
                        quantity_editor(table.base, table.page, o, &draft)
                    } else {
                        escape(&o.items_summary())
                    };
                    let delete = if table.allow_delete {
                        format!(
                            r#"<form class="inline" method="post" action="{}/{}/delete">{}<button type="submit">Delete</button></form>"#,
                            table.base,
                            escape(&o.id),
                            page_field(table.page)
                        )
                    } else {
                        String::new()
                    };
                    format!(
                        "<tr><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}{}</td></tr>",
                        escape(o.short_id()),
                        escape(customer),
                        items,
                        escape(&o.delivery_address),
                        money(o.total_price),
                        date(o.created_at),
                        status_form(table.base, table.page, o),
                        delete
                    )
                })
                .collect();
            format!(
                "<table><thead><tr><th>Order</th><th>Customer</th><th>Items</th><th>Address</th><th>Total</th><th>Placed</th><th>Status</th></tr></thead><tbody>{rows}</tbody></table>{}",
                pagination(&page.meta, table.base, &[])
            )
        }
        Err(e) => error_state("Could not load orders", &e.message()),
    };
    let body = format!("<h1>{}</h1>{}{}", escape(title), notice(outcome), content);
    dashboard_page(title, session, &body)
}

// ---
// Provider meals
// ---

#[derive(Debug, Clone)]
pub struct MealFormValues {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub image: String,
    pub is_available: bool,
}

impl Default for MealFormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category_id: String::new(),
            image: String::new(),
            is_available: true,
        }
    }
}

impl From<&Meal> for MealFormValues {
    fn from(meal: &Meal) -> Self {
        Self {
            name: meal.name.clone(),
            description: meal.description.clone(),
            price: meal.price.to_string(),
            category_id: meal
                .category_id
                .clone()
                .or_else(|| meal.category.as_ref().and_then(|c| c.id.clone()))
                .unwrap_or_default(),
            image: meal.image.clone().unwrap_or_default(),
            is_available: meal.is_available,
        }
    }
}

impl From<&MealPayload> for MealFormValues {
    fn from(payload: &MealPayload) -> Self {
        Self {
            name: payload.name.clone(),
            description: payload.description.clone(),
            price: payload.price.clone(),
            category_id: payload.category_id.clone(),
            image: payload.image.clone(),
            is_available: payload.is_available.is_some(),
        }
    }
}

fn meal_form(action: &str, heading: &str, values: &MealFormValues, categories: &[Category]) -> String {
    let options: String = categories
        .iter()
        .map(|c| {
            let selected = if c.id == values.category_id { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, escape(&c.id), selected, escape(&c.name))
        })
        .collect();
    let checked = if values.is_available { " checked" } else { "" };
    format!(
        r#"<div class="card"><h2>{heading}</h2><form method="post" action="{action}">
<label for="name">Name</label><input id="name" name="name" value="{}">
<label for="description">Description</label><textarea id="description" name="description">{}</textarea>
<label for="price">Price</label><input id="price" name="price" type="number" step="0.01" min="0" value="{}">
<label for="category_id">Category</label><select id="category_id" name="category_id"><option value="">Select a category</option>{options}</select>
<label for="image">Image URL</label><input id="image" name="image" value="{}">
<label><input type="checkbox" name="is_available" value="on"{checked}> Available</label>
<button type="submit">Save</button></form></div>"#,
        escape(&values.name),
        escape(&values.description),
        escape(&values.price),
        escape(&values.image)
    )
}

/// Meal being created or edited on the provider meals page.
pub enum MealEditor<'a> {
    Create(MealFormValues),
    Edit(&'a str, MealFormValues),
}

pub fn provider_meals(
    session: &SessionContext,
    meals: &ServiceResult<Paginated<Meal>>,
    categories: &[Category],
    editor: &MealEditor<'_>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let list = match meals {
        Ok(page) if page.data.is_empty() => empty_state("You have not added any meals yet."),
        Ok(page) => {
            let rows: String = page
                .data
                .iter()
                .map(|m| {
                    format!(
                        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="/provider-dashboard/meals?edit={}">Edit</a> <form class="inline" method="post" action="/provider-dashboard/meals/{}/delete"><button type="submit">Delete</button></form></td></tr>"#,
                        escape(&m.name),
                        escape(m.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-")),
                        money(m.price),
                        if m.is_available { "Available" } else { "Unavailable" },
                        escape(&m.id),
                        escape(&m.id)
                    )
                })
                .collect();
            format!(
                "<table><thead><tr><th>Name</th><th>Category</th><th>Price</th><th>Status</th><th></th></tr></thead><tbody>{rows}</tbody></table>{}",
                pagination(&page.meta, "/provider-dashboard/meals", &[])
            )
        }
        Err(e) => error_state("Could not load meals", &e.message()),
    };
    let form = match editor {
        MealEditor::Create(values) => meal_form("/provider-dashboard/meals", "Add a meal", values, categories),
        MealEditor::Edit(id, values) => meal_form(
            &format!("/provider-dashboard/meals/{}", escape(id)),
            "Edit meal",
            values,
            categories,
        ),
    };
    let body = format!("<h1>My meals</h1>{}{}{}", notice(outcome), form, list);
    dashboard_page("My meals", session, &body)
}

// ---
// Restaurant profile
// ---

pub fn restaurant_page(
    session: &SessionContext,
    restaurant: Option<&ProviderProfile>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let field = |value: Option<&String>| escape(value.map(String::as_str).unwrap_or(""));
    let (heading, name, description, address, phone, open) = match restaurant {
        Some(p) => (
            "Edit your restaurant",
            field(p.restaurant_name.as_ref()),
            field(p.description.as_ref()),
            field(p.address.as_ref()),
            field(p.phone.as_ref()),
            p.is_open,
        ),
        None => (
            "Set up your restaurant",
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            true,
        ),
    };
    let checked = if open { " checked" } else { "" };
    let body = format!(
        r#"<h1>My restaurant</h1>{}<div class="card"><h2>{heading}</h2><form method="post" action="/provider-dashboard/restaurant">
<label for="restaurant_name">Restaurant name</label><input id="restaurant_name" name="restaurant_name" value="{name}">
<label for="description">Description</label><textarea id="description" name="description">{description}</textarea>
<label for="address">Address</label><input id="address" name="address" value="{address}">
<label for="phone">Phone</label><input id="phone" name="phone" value="{phone}">
<label><input type="checkbox" name="is_open" value="on"{checked}> Open for orders</label>
<button type="submit">Save</button></form></div>"#,
        notice(outcome)
    );
    dashboard_page("My restaurant", session, &body)
}

// ---
// Profile
// ---

pub fn profile_page(
    session: &SessionContext,
    action: &str,
    profile: &ServiceResult<Profile>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let content = match profile {
        Ok(p) => format!(
            r#"<div class="card"><p>Email: {}</p><p>Role: {}</p><p>Email verified: {}</p><form method="post" action="{action}">
<label for="name">Name</label><input id="name" name="name" value="{}">
<label for="phone">Phone</label><input id="phone" name="phone" value="{}">
<button type="submit">Save changes</button></form></div>"#,
            escape(&p.email),
            p.role.as_str(),
            if p.email_verified { "yes" } else { "no" },
            escape(&p.name),
            escape(p.phone.as_deref().unwrap_or(""))
        ),
        Err(e) => error_state("Could not load your profile", &e.message()),
    };
    let body = format!("<h1>My profile</h1>{}{}", notice(outcome), content);
    dashboard_page("My profile", session, &body)
}

// ---
// Admin
// ---

pub fn users_page(
    session: &SessionContext,
    users: &ServiceResult<Vec<User>>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let current = session.user.as_ref().map(|u| u.id.as_str()).unwrap_or("");
    let content = match users {
        Ok(list) if list.is_empty() => empty_state("No users found."),
        Ok(list) => {
            let rows: String = list
                .iter()
                .map(|u| {
                    let action = if u.id == current {
                        "<em>You</em>".to_string()
                    } else {
                        format!(
                            r#"<form class="inline" method="post" action="/admin-dashboard/users/{}/delete"><button type="submit">Delete</button></form>"#,
                            escape(&u.id)
                        )
                    };
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape(u.name.as_deref().unwrap_or("-")),
                        escape(&u.email),
                        u.role.map(|r| r.as_str()).unwrap_or("-"),
                        escape(u.phone.as_deref().unwrap_or("-")),
                        date(u.created_at),
                        action
                    )
                })
                .collect();
            format!(
                "<p>Total users: {}</p><table><thead><tr><th>Name</th><th>Email</th><th>Role</th><th>Phone</th><th>Joined</th><th></th></tr></thead><tbody>{rows}</tbody></table>",
                list.len()
            )
        }
        Err(e) => error_state("Error loading users", &e.message()),
    };
    let body = format!("<h1>Users management</h1>{}{}", notice(outcome), content);
    dashboard_page("Users", session, &body)
}

pub fn admin_categories(
    session: &SessionContext,
    categories: &ServiceResult<Vec<Category>>,
    editing: Option<&Category>,
    outcome: Option<&Notice>,
) -> Html<String> {
    let form = match editing {
        Some(c) => format!(
            r#"<div class="card"><h2>Edit category</h2><form method="post" action="/admin-dashboard/categories/{}"><label for="name">Name</label><input id="name" name="name" value="{}"><button type="submit">Save</button> <a href="/admin-dashboard/categories">Cancel</a></form></div>"#,
            escape(&c.id),
            escape(&c.name)
        ),
        None => r#"<div class="card"><h2>New category</h2><form method="post" action="/admin-dashboard/categories"><label for="name">Name</label><input id="name" name="name"><button type="submit">Create</button></form></div>"#.to_string(),
    };
    let list = match categories {
        Ok(list) if list.is_empty() => empty_state("No categories yet."),
        Ok(list) => {
            let rows: String = list
                .iter()
                .map(|c| {
                    format!(
                        r#"<tr><td>{}</td><td><a href="/admin-dashboard/categories?edit={}">Edit</a></td></tr>"#,
                        escape(&c.name),
                        escape(&c.id)
                    )
                })
                .collect();
            format!("<table><thead><tr><th>Name</th><th></th></tr></thead><tbody>{rows}</tbody></table>")
        }
        Err(e) => error_state("Could not load categories", &e.message()),
    };
    let body = format!("<h1>Categories</h1>{}{}{}", notice(outcome), form, list);
    dashboard_page("Categories", session, &body)
}

pub fn admin_providers(
    session: &SessionContext,
    result: &ServiceResult<Paginated<Provider>>,
    filter: &ProviderFilter,
) -> Html<String> {
    let content = match result {
        Ok(page) if page.data.is_empty() => empty_state("No providers match your filters."),
        Ok(page) => format!(
            "<p>Total providers: {}</p><table><thead><tr><th>Restaurant</th><th>Address</th><th>Phone</th><th>Status</th><th>Joined</th></tr></thead><tbody>{}</tbody></table>{}",
            page.meta.total,
            provider_rows(&page.data),
            pagination(&page.meta, "/admin-dashboard/providers", &provider_filter_pairs(filter))
        ),
        Err(e) => error_state("Could not load providers", &e.message()),
    };
    let body = format!("<h1>Providers</h1>{}{}", admin_provider_filters(filter), content);
    dashboard_page("Providers", session, &body)
}
