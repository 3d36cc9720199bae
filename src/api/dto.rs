//! Data Transfer Objects
//!
//! Request and response types for the SmartMeet endpoints. Every response is
//! decoded into one of these at the boundary; the defaulting rules for
//! missing or `null` fields live here and nowhere else.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================
// FIELD HELPERS
// ============================================

/// `null` decodes to the type's default, same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counters and rates: numbers or numeric strings; anything else is zero
fn lenient_number(value: Option<Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or_default()
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(Option::<Value>::deserialize(deserializer)?))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_number(Option::<Value>::deserialize(deserializer)?);
    Ok(if n > 0.0 { n as u64 } else { 0 })
}

/// Identifiers arrive as strings from some backends and numbers from others
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================
// AUTH DTOs
// ============================================

/// Signup request body
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// User record as returned by the auth endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Fields this client does not model, kept so the stored record matches the server's
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Name for display, falling back to the e-mail address
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Response of `POST /auth/login` and `POST /auth/signup`.
///
/// A response without a token is not an error; it just does not start a
/// session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /auth/me` answers either with the user or with `{ "user": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentUserPayload {
    Wrapped { user: User },
    Bare(User),
}

impl From<CurrentUserPayload> for User {
    fn from(payload: CurrentUserPayload) -> Self {
        match payload {
            CurrentUserPayload::Wrapped { user } => user,
            CurrentUserPayload::Bare(user) => user,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// `GET /health` status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================
// SCHEDULING DTOs
// ============================================

/// `POST /schedule` request body
#[derive(Debug, Serialize)]
pub struct ScheduleRequest<'a> {
    pub query: &'a str,
    pub emails: &'a [String],
}

/// `POST /schedule` result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meeting: Option<Meeting>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A scheduled meeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MeetingsPayload {
    Bare(Vec<Meeting>),
    Wrapped { meetings: Vec<Meeting> },
}

impl From<MeetingsPayload> for Vec<Meeting> {
    fn from(payload: MeetingsPayload) -> Self {
        match payload {
            MeetingsPayload::Bare(meetings) => meetings,
            MeetingsPayload::Wrapped { meetings } => meetings,
        }
    }
}

/// One outbound e-mail recorded by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailLog {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipient: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EmailLogsPayload {
    Bare(Vec<EmailLog>),
    Logs { logs: Vec<EmailLog> },
    EmailLogs { email_logs: Vec<EmailLog> },
}

impl From<EmailLogsPayload> for Vec<EmailLog> {
    fn from(payload: EmailLogsPayload) -> Self {
        match payload {
            EmailLogsPayload::Bare(logs) => logs,
            EmailLogsPayload::Logs { logs } => logs,
            EmailLogsPayload::EmailLogs { email_logs } => email_logs,
        }
    }
}

// ============================================
// STATS DTOs
// ============================================

/// Dashboard statistics. A field that is missing, `null` or not a number is
/// zero; the other fields keep their values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub meetings_scheduled: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub emails_sent: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub success_rate: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub active_participants: u64,
}

/// `GET /stats` answers with `{ "stats": {...} }` or with the stats object itself
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StatsPayload {
    Wrapped {
        #[serde(deserialize_with = "null_as_default")]
        stats: Stats,
    },
    Flat(Stats),
}

impl From<StatsPayload> for Stats {
    fn from(payload: StatsPayload) -> Self {
        match payload {
            StatsPayload::Wrapped { stats } => stats,
            StatsPayload::Flat(stats) => stats,
        }
    }
}

// ============================================
// CALENDAR DTOs
// ============================================

/// `GET /calendar/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connected: bool,
    #[serde(default)]
    pub email: Option<String>,
}

/// `GET /calendar/auth`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarAuth {
    #[serde(default, rename = "authUrl")]
    pub auth_url: Option<String>,
}

// ============================================
// ERROR BODY
// ============================================

/// Structured error body sent with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}

impl ErrorBody {
    /// The `error` field, when it is a non-empty string
    pub fn message(self) -> Option<String> {
        match self.error {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_missing_fields_are_zero() {
        let stats: Stats = serde_json::from_value::<StatsPayload>(json!({
            "stats": { "meetings_scheduled": 4, "emails_sent": null }
        }))
        .unwrap()
        .into();

        assert_eq!(stats.meetings_scheduled, 4);
        assert_eq!(stats.emails_sent, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.active_participants, 0);
    }

    #[test]
    fn test_stats_flat_and_null_envelope() {
        let flat: Stats = serde_json::from_value::<StatsPayload>(json!({
            "success_rate": 87.5
        }))
        .unwrap()
        .into();
        assert_eq!(flat.success_rate, 87.5);

        let empty: Stats = serde_json::from_value::<StatsPayload>(json!({ "stats": null }))
            .unwrap()
            .into();
        assert_eq!(empty, Stats::default());
    }

    #[test]
    fn test_stats_bad_field_does_not_zero_the_rest() {
        let stats: Stats = serde_json::from_value::<StatsPayload>(json!({
            "meetings_scheduled": 12,
            "success_rate": "95.5"
        }))
        .unwrap()
        .into();
        assert_eq!(stats.meetings_scheduled, 12);
        assert_eq!(stats.success_rate, 95.5);

        let stats: Stats = serde_json::from_value::<StatsPayload>(json!({
            "stats": {
                "meetings_scheduled": 3,
                "emails_sent": "many",
                "success_rate": [1],
                "active_participants": -4
            }
        }))
        .unwrap()
        .into();
        assert_eq!(stats.meetings_scheduled, 3);
        assert_eq!(stats.emails_sent, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.active_participants, 0);
    }

    #[test]
    fn test_user_keeps_only_sent_fields() {
        let user: User = serde_json::from_value(json!({ "name": "Jane Doe" })).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({ "name": "Jane Doe" }));

        let user: User =
            serde_json::from_value(json!({ "id": 42, "name": "Ann", "role": "admin" })).unwrap();
        assert_eq!(user.id.as_deref(), Some("42"));
        assert_eq!(user.extra["role"], "admin");
    }

    #[test]
    fn test_auth_response_without_token() {
        let response: AuthResponse =
            serde_json::from_value(json!({ "message": "check your inbox" })).unwrap();
        assert!(response.token.is_none());
        assert!(response.user.is_none());
    }

    #[test]
    fn test_list_envelopes() {
        let bare: Vec<Meeting> = serde_json::from_value::<MeetingsPayload>(json!([
            { "id": 1, "title": "Sync", "participants": ["a@x.com"] }
        ]))
        .unwrap()
        .into();
        assert_eq!(bare[0].id.as_deref(), Some("1"));

        let wrapped: Vec<Meeting> =
            serde_json::from_value::<MeetingsPayload>(json!({ "meetings": [{ "title": "1:1" }] }))
                .unwrap()
                .into();
        assert_eq!(wrapped[0].title, "1:1");
        assert!(wrapped[0].participants.is_empty());

        let logs: Vec<EmailLog> = serde_json::from_value::<EmailLogsPayload>(json!({
            "logs": [{ "recipient": "a@x.com", "subject": "Invite", "status": "sent" }]
        }))
        .unwrap()
        .into();
        assert_eq!(logs[0].recipient, "a@x.com");

        let logs: Vec<EmailLog> = serde_json::from_value::<EmailLogsPayload>(json!({
            "email_logs": [{ "id": "e-9", "recipient": "b@x.com", "subject": null }]
        }))
        .unwrap()
        .into();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id.as_deref(), Some("e-9"));
        assert_eq!(logs[0].recipient, "b@x.com");
        assert_eq!(logs[0].subject, "");
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_value(json!({ "error": "X" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("X"));

        let body: ErrorBody = serde_json::from_value(json!({ "detail": "X" })).unwrap();
        assert_eq!(body.message(), None);

        let body: ErrorBody = serde_json::from_value(json!({ "error": { "code": 1 } })).unwrap();
        assert_eq!(body.message(), None);
    }
}
