// src/views.rs

pub mod auth;
pub mod catalog;
pub mod dashboard;

use axum::{http::StatusCode, response::Html};
use chrono::{DateTime, Utc};
use reqwest::Url;
use rust_decimal::Decimal;

use crate::{
    common::error::ServiceResult,
    middleware::{role_gate::area_for, SessionContext},
    models::pagination::PageMeta,
};

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#1f2937;background:#f9fafb}\
nav{display:flex;gap:1rem;align-items:center;padding:.75rem 1.5rem;background:#fff;border-bottom:1px solid #e5e7eb}\
nav .spacer{flex:1}main{max-width:72rem;margin:0 auto;padding:1.5rem}\
.layout{display:flex}.sidebar{width:14rem;padding:1rem;background:#fff;border-right:1px solid #e5e7eb;min-height:100vh}\
.sidebar a{display:block;padding:.35rem 0}.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(16rem,1fr));gap:1rem}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;padding:1rem}.card img{width:100%;height:10rem;object-fit:cover;border-radius:.25rem}\
table{width:100%;border-collapse:collapse;background:#fff}th,td{padding:.5rem;border-bottom:1px solid #e5e7eb;text-align:left}\
.notice{padding:.75rem 1rem;border-radius:.375rem;margin-bottom:1rem}.notice.success{background:#ecfdf5;color:#065f46}\
.notice.error{background:#fef2f2;color:#991b1b}.empty{padding:2rem;text-align:center;color:#6b7280}\
.pagination{display:flex;gap:.5rem;margin-top:1rem}.pagination .current{font-weight:bold}\
.badge{padding:.1rem .5rem;border-radius:999px;background:#e5e7eb;font-size:.8rem}form.inline{display:inline}\
label{display:block;margin:.5rem 0 .25rem}input,textarea,select{padding:.4rem;width:100%;box-sizing:border-box}\
input[type=checkbox]{width:auto}button{padding:.4rem .9rem;cursor:pointer}";

/// Disables a form's submit buttons once it is sent and drops repeat submits until
/// the answer replaces the page. Buttons come back when the page is restored from history.
const SUBMIT_ONCE: &str = r#"document.addEventListener("submit",function(e){var f=e.target;if(f.dataset.busy){e.preventDefault();return;}f.dataset.busy="1";setTimeout(function(){f.querySelectorAll("button[type=submit]").forEach(function(b){b.disabled=true;});},0);});window.addEventListener("pageshow",function(){document.querySelectorAll("form[data-busy]").forEach(function(f){delete f.dataset.busy;f.querySelectorAll("button[type=submit]").forEach(function(b){b.disabled=false;});});});"#;

// ---
// Formatting helpers
// ---

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `?key=value&...` with form encoding; pairs with empty values are dropped.
pub fn query_string(pairs: &[(&str, String)]) -> String {
    let kept: Vec<_> = pairs.iter().filter(|(_, v)| !v.is_empty()).collect();
    if kept.is_empty() {
        return String::new();
    }
    Url::parse_with_params("http://localhost/", kept.iter().map(|(k, v)| (*k, v.as_str())))
        .ok()
        .and_then(|url| url.query().map(|q| format!("?{q}")))
        .unwrap_or_default()
}

// ---
// Notices (result of the last submit)
// ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn from_result<T>(result: &ServiceResult<T>, success: &str) -> Self {
        match result {
            Ok(_) => Notice::Success(success.to_string()),
            Err(e) => Notice::Error(e.message()),
        }
    }

    pub fn errors(messages: Vec<String>) -> Self {
        Notice::Error(messages.join(" "))
    }
}

pub fn notice(value: Option<&Notice>) -> String {
    match value {
        Some(Notice::Success(msg)) => format!(r#"<div class="notice success">{}</div>"#, escape(msg)),
        Some(Notice::Error(msg)) => format!(r#"<div class="notice error">{}</div>"#, escape(msg)),
        None => String::new(),
    }
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, escape(message))
}

pub fn error_state(title: &str, message: &str) -> String {
    format!(
        r#"<div class="notice error"><strong>{}</strong><p>{}</p></div>"#,
        escape(title),
        escape(message)
    )
}

// ---
// Pagination
// ---

/// Previous/next and numbered links. Every link stays within `1..=total_pages`.
pub fn pagination(meta: &PageMeta, base: &str, extra: &[(&str, String)]) -> String {
    if meta.total_pages <= 1 {
        return String::new();
    }

    let href = |page: u32| {
        let mut pairs = extra.to_vec();
        pairs.push(("page", page.to_string()));
        format!("{}{}", base, query_string(&pairs))
    };

    let mut out = String::from(r#"<nav class="pagination">"#);
    if meta.can_go_previous() {
        out.push_str(&format!(r#"<a href="{}">Previous</a>"#, escape(&href(meta.page - 1))));
    }
    for page in meta.window(5) {
        if page == meta.page {
            out.push_str(&format!(r#"<span class="current">{page}</span>"#));
        } else {
            out.push_str(&format!(r#"<a href="{}">{page}</a>"#, escape(&href(page))));
        }
    }
    if meta.can_go_next() {
        out.push_str(&format!(r#"<a href="{}">Next</a>"#, escape(&href(meta.page + 1))));
    }
    out.push_str("</nav>");
    out
}

// ---
// Layouts
// ---

fn navbar(session: &SessionContext) -> String {
    let account = match &session.user {
        Some(user) => format!(
            r#"<a href="{}">Dashboard</a><span>{}</span><a href="/logout">Logout</a>"#,
            area_for(user.role).root,
            escape(&user.name)
        ),
        None => r#"<a href="/login">Login</a><a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<nav><a href="/"><strong>FoodHub</strong></a><a href="/meals">Meals</a><a href="/categories">Categories</a><a href="/providers">Providers</a><span class="spacer"></span>{account}</nav>"#
    )
}

fn document(title: &str, inner: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{} | FoodHub</title><style>{STYLE}</style><script>{SUBMIT_ONCE}</script></head><body>{inner}</body></html>"#,
        escape(title)
    ))
}

/// Public storefront layout.
pub fn page(title: &str, session: &SessionContext, body: &str) -> Html<String> {
    document(title, &format!("{}<main>{}</main>", navbar(session), body))
}

/// Dashboard layout with the sidebar of the visitor's role.
pub fn dashboard_page(title: &str, session: &SessionContext, body: &str) -> Html<String> {
    let sidebar = session
        .role()
        .map(|role| {
            let area = area_for(role);
            let links: String = area
                .sections
                .iter()
                .map(|s| format!(r#"<a href="{}">{}</a>"#, s.href, s.label))
                .collect();
            format!(r#"<aside class="sidebar"><h3>{}</h3>{}</aside>"#, area.title, links)
        })
        .unwrap_or_default();

    document(
        title,
        &format!(
            r#"{}<div class="layout">{}<main>{}</main></div>"#,
            navbar(session),
            sidebar,
            body
        ),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = status.canonical_reason().unwrap_or("Error");
    document(
        heading,
        &format!(
            r#"{}<main><h1>{} {}</h1><p>{}</p><a href="/">Back to home</a></main>"#,
            navbar(&SessionContext::default()),
            status.as_u16(),
            escape(heading),
            escape(message)
        ),
    )
}
