//! Dashboard Page
//!
//! Headline statistics for the signed-in user.

use async_trait::async_trait;

use crate::api::{ApiClient, Stats};

use super::{StatsCard, View};

/// Dashboard view
#[derive(Debug, Clone)]
pub struct Dashboard {
    stats: Stats,
    loading: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            stats: Stats::default(),
            loading: true,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The four cards, in display order
    pub fn cards(&self) -> Vec<StatsCard> {
        vec![
            StatsCard::new(
                "Meetings Scheduled",
                self.stats.meetings_scheduled.to_string(),
                "+12%",
                true,
            ),
            StatsCard::new("Emails Sent", self.stats.emails_sent.to_string(), "+28%", true),
            StatsCard::new(
                "Active Participants",
                self.stats.active_participants.to_string(),
                "+6%",
                true,
            ),
            StatsCard::new(
                "Success Rate",
                format!("{}%", self.stats.success_rate),
                "+2%",
                true,
            ),
        ]
    }
}

#[async_trait]
impl View for Dashboard {
    async fn load(&mut self, api: &ApiClient) {
        self.loading = true;

        match api.get_stats().await {
            Ok(stats) => self.stats = stats,
            // Previous values stay on screen
            Err(e) => tracing::error!("Error loading stats: {}", e),
        }

        self.loading = false;
    }

    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Welcome to SmartMeet\n");
        out.push_str("Your AI-powered meeting scheduler for seamless collaboration\n\n");

        if self.loading {
            out.push_str("Loading statistics...\n");
            return out;
        }

        for card in self.cards() {
            out.push_str(&card.render());
            out.push('\n');
        }
        out
    }
}
