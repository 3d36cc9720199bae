//! Meeting scheduling form

use crate::api::{ApiClient, ScheduleResult};

/// Free-text scheduling request plus the participants to invite
#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub query: String,
    pub emails: Vec<String>,
    pub loading: bool,
    pub result: Option<ScheduleResult>,
    pub error: Option<String>,
}

impl ScheduleForm {
    pub fn new(query: impl Into<String>, emails: Vec<String>) -> Self {
        Self {
            query: query.into(),
            emails,
            ..Default::default()
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) {
        self.error = None;
        self.result = None;
        self.loading = true;

        match api.schedule_meeting(&self.query, &self.emails).await {
            Ok(result) => self.result = Some(result),
            Err(e) => self.error = Some(e.user_message()),
        }

        self.loading = false;
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return format!("! {}\n", error);
        }

        let Some(result) = &self.result else {
            return if self.loading {
                "Scheduling...\n".to_string()
            } else {
                String::new()
            };
        };

        let mut out = String::new();
        out.push_str(result.message.as_deref().unwrap_or("Meeting scheduled"));
        out.push('\n');

        if let Some(meeting) = &result.meeting {
            if !meeting.title.is_empty() {
                out.push_str(&format!("  Title:        {}\n", meeting.title));
            }
            if let Some(start) = &meeting.start_time {
                out.push_str(&format!("  Starts:       {}\n", start));
            }
            if !meeting.participants.is_empty() {
                out.push_str(&format!("  Participants: {}\n", meeting.participants.join(", ")));
            }
        }
        out
    }
}
