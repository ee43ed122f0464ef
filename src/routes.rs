//! Views of the admin panel and the navigation history between them.

/// A view reachable from the sidebar, plus the login view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Clients,
    Professionals,
    Services,
    Payments,
    Quotes,
    Settings,
    Login,
}

impl Route {
    /// Sidebar entries in display order
    pub const SIDEBAR: [Route; 7] = [
        Route::Dashboard,
        Route::Clients,
        Route::Professionals,
        Route::Services,
        Route::Payments,
        Route::Quotes,
        Route::Settings,
    ];

    /// View shown right after a successful login
    pub const DEFAULT: Route = Route::Dashboard;

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Clients => "/client",
            Route::Professionals => "/professional",
            Route::Services => "/services",
            Route::Payments => "/payments",
            Route::Quotes => "/quotes",
            Route::Settings => "/settings",
            Route::Login => "/login",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Clients => "Clientes",
            Route::Professionals => "Profissionais",
            Route::Services => "Serviços",
            Route::Payments => "Pagamentos",
            Route::Quotes => "Orçamentos",
            Route::Settings => "Configurações",
            Route::Login => "Login",
        }
    }

    /// Resolves a path, ignoring a trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        Self::SIDEBAR
            .into_iter()
            .chain(std::iter::once(Route::Login))
            .find(|route| route.path() == normalized)
    }

    /// Every view except login requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Current view and the views visited before it.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Routes navigated away from, oldest first.
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    /// Moves to `route`; navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::debug!(from = %self.current, to = %route, "Navigating");
        self.history.push(self.current);
        self.current = route;
    }
}
