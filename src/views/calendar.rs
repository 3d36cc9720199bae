//! Google Calendar integration panel

use async_trait::async_trait;

use crate::api::{ApiClient, CalendarStatus};

use super::View;

pub const CONNECT_FAILED: &str =
    "Failed to connect Google Calendar. Please check your configuration.";
pub const DISCONNECT_FAILED: &str = "Failed to disconnect calendar";
pub const DISCONNECTED: &str = "Google Calendar disconnected successfully";

/// Connection state of the user's Google Calendar
#[derive(Debug, Clone, Default)]
pub struct CalendarIntegration {
    status: CalendarStatus,
    loading: bool,
}

impl CalendarIntegration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &CalendarStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Refresh the status; on failure the last known status is kept
    pub async fn check_status(&mut self, api: &ApiClient) {
        match api.calendar_status().await {
            Ok(status) => self.status = status,
            Err(e) => tracing::error!("Error checking calendar status: {}", e),
        }
    }

    /// Ask the backend where to send the user for OAuth consent.
    ///
    /// `Ok(None)` means the server answered without a URL.
    pub async fn connect(&mut self, api: &ApiClient) -> Result<Option<String>, String> {
        self.loading = true;
        let result = api.calendar_auth_url().await.map_err(|e| {
            tracing::error!("Error connecting calendar: {}", e);
            CONNECT_FAILED.to_string()
        });
        self.loading = false;
        result
    }

    pub async fn disconnect(&mut self, api: &ApiClient) -> Result<&'static str, String> {
        self.loading = true;
        let result = match api.disconnect_calendar().await {
            Ok(()) => {
                self.status = CalendarStatus::default();
                Ok(DISCONNECTED)
            }
            Err(e) => {
                tracing::error!("Error disconnecting calendar: {}", e);
                Err(DISCONNECT_FAILED.to_string())
            }
        };
        self.loading = false;
        result
    }
}

#[async_trait]
impl View for CalendarIntegration {
    async fn load(&mut self, api: &ApiClient) {
        self.check_status(api).await;
    }

    fn render(&self) -> String {
        let mut out = String::from("Connected Calendars\n");

        if self.status.connected {
            out.push_str("  Google Calendar ✓\n");
            out.push_str(&format!(
                "  {}\n",
                self.status.email.as_deref().unwrap_or("Connected")
            ));
            out.push_str("  Synced\n");
            out.push_str("  Run `smartmeet calendar disconnect` to disconnect.\n");
        } else {
            out.push_str("  Google Calendar\n");
            out.push_str("  Not connected\n");
            out.push_str("  Run `smartmeet calendar connect` to connect.\n");
        }

        out.push_str(
            "\nInfo: Connecting Google Calendar will automatically create calendar events \
             when you schedule meetings through SmartMeet.\n",
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_not_connected() {
        let panel = CalendarIntegration::new();
        let text = panel.render();
        assert!(text.contains("Not connected"));
        assert!(!text.contains("Synced"));
    }

    #[test]
    fn test_render_connected_without_email() {
        let panel = CalendarIntegration {
            status: CalendarStatus {
                connected: true,
                email: None,
            },
            loading: false,
        };
        let text = panel.render();
        assert!(text.contains("  Connected\n"));
        assert!(text.contains("Synced"));
    }
}
