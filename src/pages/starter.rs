use regex::Regex;
use tracing::info;

use crate::ai::Cohort;
use crate::app::Route;
use crate::error::{AlphinError, AlphinResult};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthForm {
    Login,
    Signup,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortCard {
    pub cohort: Cohort,
    pub route: Route,
    pub title: &'static str,
    pub ages: &'static str,
    pub tagline: &'static str,
}

pub fn cohort_cards() -> Vec<CohortCard> {
    vec![
        CohortCard {
            cohort: Cohort::Junior,
            route: Route::Junior,
            title: "Alphin Junior",
            ages: "Ages 6-12",
            tagline: "Discover the Money Universe!",
        },
        CohortCard {
            cohort: Cohort::Teen,
            route: Route::Teen,
            title: "Alphin Teen",
            ages: "Ages 13-15",
            tagline: "Explore Financial Products!",
        },
        CohortCard {
            cohort: Cohort::Trader,
            route: Route::Trader,
            title: "Alphin Trader",
            ages: "Ages 16-17",
            tagline: "Master Real Trading!",
        },
    ]
}

/// Cohort selector with the login, sign-up and parent-hub dropdowns.
/// At most one dropdown is open at a time.
#[derive(Debug, Default)]
pub struct StarterSession {
    open_form: Option<AuthForm>,
}

impl StarterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, form: AuthForm) {
        self.open_form = if self.open_form == Some(form) {
            None
        } else {
            Some(form)
        };
    }

    pub fn open_form(&self) -> Option<AuthForm> {
        self.open_form
    }

    /// Record an auth attempt. Nothing is authenticated or stored; the
    /// attempt is only logged and all dropdowns close.
    pub fn submit(&mut self, form: AuthForm, email: &str) -> AlphinResult<Option<&'static str>> {
        let email = email.trim();
        let re = Regex::new(EMAIL_PATTERN)
            .map_err(|e| AlphinError::InvalidEmail(e.to_string()))?;
        if !re.is_match(email) {
            return Err(AlphinError::InvalidEmail(email.to_string()));
        }

        info!(?form, email, "Auth attempt");
        self.open_form = None;

        Ok(match form {
            AuthForm::Parent => Some("Parent Hub - Coming Soon!"),
            AuthForm::Login | AuthForm::Signup => None,
        })
    }
}
