// src/views/auth.rs

use axum::response::Html;

use crate::{
    middleware::{role_gate::area_for, SessionContext},
    views::{escape, notice, page, Notice},
};

pub fn login_page(session: &SessionContext, email: &str, outcome: Option<&Notice>) -> Html<String> {
    let body = format!(
        r#"<div class="card"><h1>Login</h1>{}<form method="post" action="/login">
<label for="email">Email</label><input id="email" name="email" type="email" value="{}" required>
<label for="password">Password</label><input id="password" name="password" type="password" minlength="8" required>
<button type="submit">Login</button></form><p>No account? <a href="/register">Register</a></p></div>"#,
        notice(outcome),
        escape(email)
    );
    page("Login", session, &body)
}

pub struct RegisterForm<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

pub fn register_page(session: &SessionContext, form: &RegisterForm<'_>, outcome: Option<&Notice>) -> Html<String> {
    let role_option = |value: &str, label: &str| {
        let selected = if form.role.eq_ignore_ascii_case(value) { " selected" } else { "" };
        format!(r#"<option value="{value}"{selected}>{label}</option>"#)
    };
    let body = format!(
        r#"<div class="card"><h1>Create an account</h1>{}<form method="post" action="/register">
<label for="name">Name</label><input id="name" name="name" value="{}" required>
<label for="email">Email</label><input id="email" name="email" type="email" value="{}" required>
<label for="password">Password</label><input id="password" name="password" type="password" minlength="8" required>
<label for="role">I am a</label><select id="role" name="role">{}{}</select>
<button type="submit">Register</button></form><p>Already registered? <a href="/login">Login</a></p></div>"#,
        notice(outcome),
        escape(form.name),
        escape(form.email),
        role_option("CUSTOMER", "Customer"),
        role_option("PROVIDER", "Restaurant provider")
    );
    page("Register", session, &body)
}

pub fn unauthorized_page(session: &SessionContext) -> Html<String> {
    let back = session
        .role()
        .map(|role| format!(r#"<a href="{}">Go to your dashboard</a>"#, area_for(role).root))
        .unwrap_or_else(|| r#"<a href="/login">Login</a>"#.to_string());
    let body = format!(
        r#"<div class="card"><h1>Unauthorized</h1><p>You do not have permission to view this page.</p><p>{back} or <a href="/">go home</a>.</p></div>"#
    );
    page("Unauthorized", session, &body)
}
