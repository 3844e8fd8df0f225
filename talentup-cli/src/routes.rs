// Application routes and their role gate

use crate::auth::{guard, GuardDecision, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Webinars,
    WebinarDetail(String),
    Calendar,
    Trainees,
    Reports,
    Unauthorized,
    NotFound(String),
}

impl Route {
    /// Match a path; query strings and trailing slashes are ignored
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["webinaires"] => Route::Webinars,
            ["webinaire", id] => Route::WebinarDetail(id.to_string()),
            ["calendrier"] => Route::Calendar,
            ["stagiaires"] => Route::Trainees,
            ["rapports"] => Route::Reports,
            ["unauthorized"] => Route::Unauthorized,
            _ => {
                tracing::warn!("404 Error: User attempted to access non-existent route: {}", path);
                Route::NotFound(path.to_string())
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Webinars => "/webinaires".to_string(),
            Route::WebinarDetail(id) => format!("/webinaire/{}", id),
            Route::Calendar => "/calendrier".to_string(),
            Route::Trainees => "/stagiaires".to_string(),
            Route::Reports => "/rapports".to_string(),
            Route::Unauthorized => "/unauthorized".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Unauthorized | Route::NotFound(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Webinars => "Webinars",
            Route::WebinarDetail(_) => "Webinar",
            Route::Calendar => "Calendar",
            Route::Trainees => "Trainees",
            Route::Reports => "Reports",
            Route::Unauthorized => "Unauthorized",
            Route::NotFound(_) => "Not found",
        }
    }
}

/// What to show for a requested path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(Route),
    LoginRequired,
    Redirect(Route),
}

/// Role gate shared by every protected route
#[derive(Debug, Clone)]
pub struct Router {
    required_roles: Vec<String>,
}

impl Router {
    pub fn new(required_roles: Vec<String>) -> Self {
        Self { required_roles }
    }

    pub fn required_roles(&self) -> &[String] {
        &self.required_roles
    }

    pub fn resolve(&self, path: &str, session: &Session) -> Outcome {
        self.enter(Route::parse(path), session)
    }

    pub fn enter(&self, route: Route, session: &Session) -> Outcome {
        if !route.is_protected() {
            return Outcome::Render(route);
        }

        match guard(&self.required_roles, session) {
            GuardDecision::Allow => Outcome::Render(route),
            GuardDecision::RedirectToLogin(_) => Outcome::LoginRequired,
            GuardDecision::RedirectUnauthorized(target) => Outcome::Redirect(Route::parse(&target)),
        }
    }
}
