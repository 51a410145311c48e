use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::ai::AiService;
use crate::config::Config;
use crate::events::{EventSink, UiEvent};
use crate::pages::{JuniorSession, StarterSession, TeenSession, TraderSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Starter,
    Junior,
    Teen,
    Trader,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Starter => "/",
            Route::Junior => "/alpha-junior",
            Route::Teen => "/alpha-teen",
            Route::Trader => "/alpha-trader",
        }
    }

    /// Accepts the full path or the bare page name.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim().trim_start_matches('/') {
            "" | "home" | "starter" => Some(Route::Starter),
            "alpha-junior" | "junior" => Some(Route::Junior),
            "alpha-teen" | "teen" => Some(Route::Teen),
            "alpha-trader" | "trader" => Some(Route::Trader),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

pub enum Page {
    Starter(StarterSession),
    Junior(JuniorSession),
    Teen(TeenSession),
    Trader(TraderSession),
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::Starter(_) => Route::Starter,
            Page::Junior(_) => Route::Junior,
            Page::Teen(_) => Route::Teen,
            Page::Trader(_) => Route::Trader,
        }
    }
}

/// Owns the page currently on screen. Navigating drops the previous page's
/// session, which aborts its pending timers.
pub struct App {
    config: Config,
    ai: Arc<dyn AiService>,
    events: EventSink,
    page: Page,
}

impl App {
    pub fn new(config: Config, ai: Arc<dyn AiService>, events: EventSink) -> Self {
        info!("Alphin ready (AI backend: {})", ai.backend_name());
        Self {
            config,
            ai,
            events,
            page: Page::Starter(StarterSession::new()),
        }
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route() == route {
            return;
        }

        let ai = Arc::clone(&self.ai);
        let events = self.events.clone();
        self.page = match route {
            Route::Starter => Page::Starter(StarterSession::new()),
            Route::Junior => Page::Junior(JuniorSession::new(&self.config.junior, ai, events)),
            Route::Teen => Page::Teen(TeenSession::new(&self.config.teen, ai, events)),
            Route::Trader => Page::Trader(TraderSession::new(&self.config, ai, events)),
        };

        info!("Navigated to {}", route);
        self.events.emit(UiEvent::RouteChanged(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockAiService;
    use std::time::Duration;

    fn app(events: EventSink) -> App {
        App::new(Config::default(), Arc::new(MockAiService::new()), events)
    }

    #[test]
    fn test_route_paths() {
        for route in [Route::Starter, Route::Junior, Route::Teen, Route::Trader] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("teen"), Some(Route::Teen));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[tokio::test]
    async fn test_starts_on_cohort_selector() {
        let app = app(EventSink::detached());
        assert_eq!(app.route(), Route::Starter);
    }

    #[tokio::test]
    async fn test_navigation_resets_page_state() {
        let mut app = app(EventSink::detached());
        app.navigate(Route::Junior);

        if let Page::Junior(page) = app.page_mut() {
            page.select_mission(2).unwrap();
            assert_eq!(page.points(), 225);
        }

        app.navigate(Route::Starter);
        app.navigate(Route::Junior);
        match app.page() {
            Page::Junior(page) => assert_eq!(page.points(), 150),
            _ => panic!("expected junior page"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_page_cancels_advisory_timer() {
        let (sink, mut rx) = EventSink::channel(32);
        let mut app = app(sink);

        app.navigate(Route::Trader);
        if let Page::Trader(page) = app.page_mut() {
            page.set_order_amount(1.0);
            page.buy().unwrap();
        }
        app.navigate(Route::Teen);

        tokio::time::sleep(Duration::from_secs(10)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            seen.push(event);
        }
        assert!(seen.contains(&UiEvent::RouteChanged(Route::Teen)));
        assert!(!seen.contains(&UiEvent::AdvisoryHidden));
    }
}
