//! Stats Card Component
//!
//! Displays a single statistic with a change badge.

/// One dashboard statistic
#[derive(Debug, Clone, PartialEq)]
pub struct StatsCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub positive: bool,
}

impl StatsCard {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        change: impl Into<String>,
        positive: bool,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            change: change.into(),
            positive,
        }
    }

    /// Arrow shown next to the change badge
    pub fn marker(&self) -> &'static str {
        if self.positive {
            "▲"
        } else {
            "▼"
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{:<20} {:>8}  {} {}",
            self.title,
            self.value,
            self.marker(),
            self.change
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_positive() {
        let card = StatsCard::new("Emails Sent", "42", "+28%", true);
        let line = card.render();
        assert!(line.starts_with("Emails Sent"));
        assert!(line.contains("42"));
        assert!(line.ends_with("▲ +28%"));
    }

    #[test]
    fn test_render_negative() {
        let card = StatsCard::new("Success Rate", "80%", "-3%", false);
        assert_eq!(card.marker(), "▼");
        assert!(card.render().ends_with("▼ -3%"));
    }
}
