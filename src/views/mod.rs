//! Views
//!
//! Page-level and reusable view models. Each view calls the API client,
//! keeps the latest response in its own state and renders that state as
//! text. Views hold no invariants beyond reflecting the latest response.

mod auth;
mod calendar;
mod dashboard;
mod meetings;
mod schedule;
mod settings;
mod stats_card;

pub use auth::{verify_session, AuthOutcome, LoginForm, SignupForm, TERMS_NOT_ACCEPTED};
pub use calendar::CalendarIntegration;
pub use dashboard::Dashboard;
pub use meetings::{EmailLogsView, MeetingsView};
pub use schedule::ScheduleForm;
pub use settings::{NotificationPreference, ProfilePanel, Settings, SettingsTab, Theme};
pub use stats_card::StatsCard;

use async_trait::async_trait;

use crate::api::ApiClient;

/// Where the user goes after signing in or out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Loading / error / success condition of a view
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A view that fetches its own data
#[async_trait]
pub trait View: Send {
    /// Fetch the data this view shows. Failures end up in the view's state.
    async fn load(&mut self, api: &ApiClient);

    /// Render the current state
    fn render(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(Route::Login.path(), "/login");
    }

    #[test]
    fn test_load_state_accessors() {
        let state: LoadState<u32> = LoadState::Loaded(3);
        assert_eq!(state.loaded(), Some(&3));
        assert!(state.error().is_none());

        let state: LoadState<u32> = LoadState::Failed("boom".into());
        assert_eq!(state.error(), Some("boom"));
        assert!(!LoadState::<u32>::default().is_loading());
    }
}
