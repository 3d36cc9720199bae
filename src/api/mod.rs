//! SmartMeet API Gateway
//!
//! The only module that talks to the backend.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/signup` - Create an account
//! - `POST /auth/login` - Obtain a bearer token
//! - `GET /auth/me` - Current user
//!
//! ## Scheduling
//! - `POST /schedule` - Schedule a meeting from a free-text query
//! - `GET /meetings` - List meetings
//! - `GET /email-logs` - List sent invitations
//! - `GET /stats` - Dashboard statistics
//!
//! ## Calendar
//! - `GET /calendar/status` - Google Calendar connection status
//! - `GET /calendar/auth` - OAuth URL to connect a calendar
//! - `POST /calendar/disconnect` - Disconnect the calendar
//!
//! ## Health
//! - `GET /health` - Backend status
//!
//! # Example
//!
//! ```rust,no_run
//! use smartmeet::api::ApiClient;
//! use smartmeet::session::SessionContext;
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = SessionContext::in_memory();
//!     let client = ApiClient::new("http://localhost:5000/api", session).unwrap();
//!
//!     match client.get_stats().await {
//!         Ok(stats) => println!("{} meetings scheduled", stats.meetings_scheduled),
//!         Err(e) => eprintln!("{}", e.user_message()),
//!     }
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, REQUEST_TIMEOUT};
pub use dto::{
    AuthResponse, CalendarStatus, EmailLog, HealthStatus, Meeting, ScheduleResult, Stats, User,
};
pub use error::{backend_origin, ApiError, ApiResult};
