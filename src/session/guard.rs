use crate::models::session::Role;
use crate::session::manager::SessionStatus;
use tokio::sync::watch;

pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(String),
}

/// Decide whether `path` is reachable for the current session
///
/// Authenticated users are bounced from `/login` and `/` to their dashboard;
/// a role mismatch sends the user back to `/login`.
pub fn resolve_route(path: &str, status: &SessionStatus) -> RouteDecision {
    let path = normalize(path);
    let role = status.role().filter(|_| status.is_authenticated());

    let home = || match role {
        Some(role) => RouteDecision::Redirect(role.home_route()),
        None => RouteDecision::Redirect(LOGIN_ROUTE.to_string()),
    };

    let require = |needed: Role| {
        if role == Some(needed) {
            RouteDecision::Render
        } else {
            RouteDecision::Redirect(LOGIN_ROUTE.to_string())
        }
    };

    match path {
        LOGIN_ROUTE => match role {
            Some(_) => home(),
            None => RouteDecision::Render,
        },
        "/" => home(),
        "/courses" | "/faculty" | "/rooms" => require(Role::Admin),
        "/timetable" => match role {
            Some(_) => RouteDecision::Render,
            None => RouteDecision::Redirect(LOGIN_ROUTE.to_string()),
        },
        _ if is_under(path, "/admin") => require(Role::Admin),
        _ if is_under(path, "/teacher") => require(Role::Teacher),
        _ if is_under(path, "/student") => require(Role::Student),
        _ => home(),
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Subscriber that follows session changes and answers routing questions
pub struct RouteGuard {
    status: watch::Receiver<SessionStatus>,
}

impl RouteGuard {
    pub fn new(status: watch::Receiver<SessionStatus>) -> Self {
        Self { status }
    }

    pub fn decide(&self, path: &str) -> RouteDecision {
        resolve_route(path, &self.status.borrow())
    }

    /// Resolves once the session stops being authenticated, yielding the
    /// route to navigate to. `None` when the session manager is gone.
    pub async fn signed_out(&mut self) -> Option<String> {
        self.status
            .wait_for(|status| !status.is_authenticated())
            .await
            .ok()
            .map(|_| LOGIN_ROUTE.to_string())
    }
}
