//! # SmartMeet
//!
//! Client for the SmartMeet meeting scheduler: a typed gateway over the
//! SmartMeet REST API, an explicit login session, and the view models the
//! `smartmeet` binary renders.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client, response schemas and error classification
//! - [`session`]: session context and credential persistence
//! - [`views`]: auth forms, dashboard, scheduling, lists and settings
//! - [`config`]: file and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smartmeet::api::ApiClient;
//! use smartmeet::session::{FileCredentialStore, SessionContext};
//! use smartmeet::views::{AuthOutcome, LoginForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = SessionContext::open(FileCredentialStore::new("session.json"));
//!     let client = ApiClient::new("http://localhost:5000/api", session)?;
//!
//!     let mut form = LoginForm::new("user@x.com", "pw");
//!     match form.submit(&client).await {
//!         AuthOutcome::Redirect(route) => println!("Signed in, go to {}", route.path()),
//!         AuthOutcome::Stay => eprintln!("{}", form.error.unwrap_or_default()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, Stats, User};

pub use config::{Config, ConfigError, LoggingConfig};

pub use session::{
    Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore, SessionContext,
    SessionError,
};

pub use views::{AuthOutcome, Dashboard, LoadState, Route, Settings, SettingsTab, View};
