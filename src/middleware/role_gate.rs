// src/middleware/role_gate.rs

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    middleware::session::SessionContext,
    models::auth::{Role, SessionUser},
};

pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// Dashboard area owned by one role: its root path and sidebar.
pub struct RoleArea {
    pub role: Role,
    pub root: &'static str,
    pub title: &'static str,
    pub sections: &'static [NavItem],
}

pub const ROLE_TABLE: [RoleArea; 3] = [
    RoleArea {
        role: Role::Admin,
        root: "/admin-dashboard",
        title: "Admin Management",
        sections: &[
            NavItem { label: "Overview", href: "/admin-dashboard" },
            NavItem { label: "Users", href: "/admin-dashboard/users" },
            NavItem { label: "Categories", href: "/admin-dashboard/categories" },
            NavItem { label: "Orders", href: "/admin-dashboard/orders" },
            NavItem { label: "Providers", href: "/admin-dashboard/providers" },
        ],
    },
    RoleArea {
        role: Role::Provider,
        root: "/provider-dashboard",
        title: "Provider Management",
        sections: &[
            NavItem { label: "Overview", href: "/provider-dashboard" },
            NavItem { label: "Orders", href: "/provider-dashboard/orders" },
            NavItem { label: "Meals", href: "/provider-dashboard/meals" },
            NavItem { label: "Restaurant", href: "/provider-dashboard/restaurant" },
            NavItem { label: "Profile", href: "/provider-dashboard/profile" },
        ],
    },
    RoleArea {
        role: Role::Customer,
        root: "/dashboard",
        title: "Customer Management",
        sections: &[
            NavItem { label: "Overview", href: "/dashboard" },
            NavItem { label: "My Orders", href: "/dashboard/orders" },
            NavItem { label: "Profile", href: "/dashboard/profile" },
        ],
    },
];

pub fn area_for(role: Role) -> &'static RoleArea {
    ROLE_TABLE
        .iter()
        .find(|area| area.role == role)
        .unwrap_or(&ROLE_TABLE[2])
}

/// The role that owns `path`, or `None` for public pages.
pub fn required_role(path: &str) -> Option<Role> {
    ROLE_TABLE
        .iter()
        .find(|area| {
            path == area.root
                || path
                    .strip_prefix(area.root)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(|area| area.role)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Render,
    RedirectLogin,
    RedirectUnauthorized,
}

pub fn gate(user: Option<&SessionUser>, path: &str) -> GateOutcome {
    match (required_role(path), user) {
        (None, _) => GateOutcome::Render,
        (Some(_), None) => GateOutcome::RedirectLogin,
        (Some(role), Some(user)) if user.role == role => GateOutcome::Render,
        (Some(_), Some(_)) => GateOutcome::RedirectUnauthorized,
    }
}

/// Runs after `session_loader`; dashboard pages never render for the wrong visitor.
pub async fn role_gate(request: Request, next: Next) -> Response {
    let session = request
        .extensions()
        .get::<SessionContext>()
        .cloned()
        .unwrap_or_default();
    let path = request.uri().path().to_string();

    match gate(session.user.as_ref(), &path) {
        GateOutcome::Render => next.run(request).await,
        GateOutcome::RedirectLogin => Redirect::to("/login").into_response(),
        GateOutcome::RedirectUnauthorized => {
            tracing::info!("Blocked {} for role {:?}", path, session.role());
            Redirect::to("/unauthorized").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: "u1".into(),
            name: "Test".into(),
            email: "t@example.com".into(),
            role,
            email_verified: true,
            image: None,
        }
    }

    #[test]
    fn paths_map_to_their_owner() {
        assert_eq!(required_role("/dashboard"), Some(Role::Customer));
        assert_eq!(required_role("/dashboard/orders"), Some(Role::Customer));
        assert_eq!(required_role("/admin-dashboard/users"), Some(Role::Admin));
        assert_eq!(required_role("/provider-dashboard"), Some(Role::Provider));
        assert_eq!(required_role("/dashboards"), None);
        assert_eq!(required_role("/meals"), None);
    }

    #[test]
    fn wrong_role_never_renders() {
        let roles = [Role::Admin, Role::Provider, Role::Customer];
        for area in &ROLE_TABLE {
            for section in area.sections {
                assert_eq!(gate(None, section.href), GateOutcome::RedirectLogin);
                for role in roles {
                    let expected = if role == area.role {
                        GateOutcome::Render
                    } else {
                        GateOutcome::RedirectUnauthorized
                    };
                    assert_eq!(gate(Some(&user(role)), section.href), expected, "{role:?} {}", section.href);
                }
            }
        }
    }

    #[test]
    fn public_pages_render_for_everyone() {
        assert_eq!(gate(None, "/"), GateOutcome::Render);
        assert_eq!(gate(Some(&user(Role::Admin)), "/meals/1"), GateOutcome::Render);
    }
}
