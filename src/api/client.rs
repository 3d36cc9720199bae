//! SmartMeet REST API Client
//!
//! Thin façade over the backend. Every call carries a fixed timeout and a
//! JSON content type, picks up the current bearer token from the session
//! context, and reports failures as [`ApiError`].

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    AuthResponse, CalendarAuth, CalendarStatus, CurrentUserPayload, EmailLog, EmailLogsPayload,
    ErrorBody, HealthStatus, LoginRequest, Meeting, MeetingsPayload, ScheduleRequest,
    ScheduleResult, SignupRequest, Stats, StatsPayload, User,
};
use super::error::{ApiError, ApiResult};
use crate::config::normalize_base_url;
use crate::session::SessionContext;

/// Fixed timeout applied to every outbound call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// SmartMeet REST API client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a client for `base_url` that authenticates with `session`
    pub fn new(base_url: &str, session: Arc<SessionContext>) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            session,
        })
    }

    /// The resolved base address
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    // ============ Authentication ============

    /// `POST /auth/signup`
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.send_json(
            Method::POST,
            "/auth/signup",
            Some(&SignupRequest {
                name,
                email,
                password,
            }),
        )
        .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.send_json(Method::POST, "/auth/login", Some(&LoginRequest { email, password }))
            .await
    }

    /// `GET /auth/me`
    pub async fn get_current_user(&self) -> ApiResult<User> {
        let payload: CurrentUserPayload = self.get("/auth/me").await?;
        Ok(payload.into())
    }

    // ============ Health ============

    /// `GET /health`
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.get("/health").await
    }

    // ============ Scheduling ============

    /// `POST /schedule`
    pub async fn schedule_meeting(&self, query: &str, emails: &[String]) -> ApiResult<ScheduleResult> {
        self.send_json(Method::POST, "/schedule", Some(&ScheduleRequest { query, emails }))
            .await
    }

    /// `GET /meetings`
    pub async fn get_meetings(&self) -> ApiResult<Vec<Meeting>> {
        let payload: MeetingsPayload = self.get("/meetings").await?;
        Ok(payload.into())
    }

    /// `GET /email-logs`
    pub async fn get_email_logs(&self) -> ApiResult<Vec<EmailLog>> {
        let payload: EmailLogsPayload = self.get("/email-logs").await?;
        Ok(payload.into())
    }

    /// `GET /stats`
    pub async fn get_stats(&self) -> ApiResult<Stats> {
        let payload: StatsPayload = self.get("/stats").await?;
        Ok(payload.into())
    }

    // ============ Calendar integration ============

    /// `GET /calendar/status`
    pub async fn calendar_status(&self) -> ApiResult<CalendarStatus> {
        self.get("/calendar/status").await
    }

    /// `GET /calendar/auth`, yielding the OAuth URL to open if the server sent one
    pub async fn calendar_auth_url(&self) -> ApiResult<Option<String>> {
        let auth: CalendarAuth = self.get("/calendar/auth").await?;
        Ok(auth.auth_url.filter(|url| !url.is_empty()))
    }

    /// `POST /calendar/disconnect`
    pub async fn disconnect_calendar(&self) -> ApiResult<()> {
        self.send(Method::POST, "/calendar/disconnect", None::<&()>)
            .await
            .map(|_| ())
    }

    // ============ Plumbing ============

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(Method::GET, path, None::<&()>).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(method, path, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(path, error = %e, "Response did not match schema");
            ApiError::Decode(e.to_string())
        })
    }

    /// Issue one request and return the body of a success response
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(request_id = %request_id, method = %method, path, "Sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("X-Request-Id", &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }
        let request = self.authorize(request);

        let response = request.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, path, error = %e, "Request failed");
            ApiError::from_transport(&self.base_url, e)
        })?;

        let status = response.status();
        // A response arrived; a broken body is not "no response"
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, path, error = %e, "Failed to read response body");
            ApiError::Request(e)
        })?;

        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), "Response received");
            return Ok(bytes.to_vec());
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::message);

        tracing::warn!(
            request_id = %request_id,
            method = %method,
            path,
            status = status.as_u16(),
            error_message = message.as_deref().unwrap_or("-"),
            "Server rejected request"
        );

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Attach the bearer token of the current session, if there is one
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}
