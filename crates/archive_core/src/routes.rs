//! Client-side routes and the session guard in front of the storage view.

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Register,
    Cloud,
    NotFound,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Cloud => "/cloud",
            Self::NotFound => "/404",
        }
    }

    /// Maps a location path to a route. Trailing slashes and query/hash suffixes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/cloud" => Self::Cloud,
            _ => Self::NotFound,
        }
    }

    pub fn requires_session(self) -> bool {
        matches!(self, Self::Cloud)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Decides whether `route` may render for the current session.
pub fn guard(route: Route, session: &SessionState) -> RouteDecision {
    if route.requires_session() && !session.is_logged_in() {
        RouteDecision::Redirect(Route::Login)
    } else {
        RouteDecision::Allow
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the landing page's "start working" button does.
pub enum LandingAction {
    Navigate(Route),
    OpenLoginDialog,
}

pub fn landing_action(session: &SessionState) -> LandingAction {
    if session.is_logged_in() {
        LandingAction::Navigate(Route::Cloud)
    } else {
        LandingAction::OpenLoginDialog
    }
}
