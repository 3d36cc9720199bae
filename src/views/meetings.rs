//! Meeting and e-mail log lists

use async_trait::async_trait;

use crate::api::{ApiClient, EmailLog, Meeting};

use super::{LoadState, View};

/// All meetings known to the backend
#[derive(Debug, Clone, Default)]
pub struct MeetingsView {
    pub state: LoadState<Vec<Meeting>>,
}

#[async_trait]
impl View for MeetingsView {
    async fn load(&mut self, api: &ApiClient) {
        self.state = LoadState::Loading;
        self.state = match api.get_meetings().await {
            Ok(meetings) => LoadState::Loaded(meetings),
            Err(e) => LoadState::Failed(e.user_message()),
        };
    }

    fn render(&self) -> String {
        let meetings = match &self.state {
            LoadState::Idle => return String::new(),
            LoadState::Loading => return "Loading meetings...\n".to_string(),
            LoadState::Failed(message) => return format!("! {}\n", message),
            LoadState::Loaded(meetings) => meetings,
        };

        if meetings.is_empty() {
            return "No meetings scheduled yet.\n".to_string();
        }

        let mut out = format!("{:<28} {:<22} {:<10} {}\n", "Title", "Starts", "Status", "Participants");
        out.push_str(&"-".repeat(80));
        out.push('\n');
        for meeting in meetings {
            out.push_str(&format!(
                "{:<28} {:<22} {:<10} {}\n",
                or_dash(&meeting.title),
                meeting.start_time.as_deref().unwrap_or("-"),
                meeting.status.as_deref().unwrap_or("-"),
                meeting.participants.join(", ")
            ));
        }
        out
    }
}

/// Invitations the backend has sent
#[derive(Debug, Clone, Default)]
pub struct EmailLogsView {
    pub state: LoadState<Vec<EmailLog>>,
}

#[async_trait]
impl View for EmailLogsView {
    async fn load(&mut self, api: &ApiClient) {
        self.state = LoadState::Loading;
        self.state = match api.get_email_logs().await {
            Ok(logs) => LoadState::Loaded(logs),
            Err(e) => LoadState::Failed(e.user_message()),
        };
    }

    fn render(&self) -> String {
        let logs = match &self.state {
            LoadState::Idle => return String::new(),
            LoadState::Loading => return "Loading email logs...\n".to_string(),
            LoadState::Failed(message) => return format!("! {}\n", message),
            LoadState::Loaded(logs) => logs,
        };

        if logs.is_empty() {
            return "No emails sent yet.\n".to_string();
        }

        let mut out = format!("{:<22} {:<30} {:<10} {}\n", "Sent", "Recipient", "Status", "Subject");
        out.push_str(&"-".repeat(80));
        out.push('\n');
        for log in logs {
            out.push_str(&format!(
                "{:<22} {:<30} {:<10} {}\n",
                log.sent_at.as_deref().unwrap_or("-"),
                or_dash(&log.recipient),
                log.status.as_deref().unwrap_or("-"),
                log.subject
            ));
        }
        out
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
