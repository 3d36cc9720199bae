//! Settings Page
//!
//! Five mutually exclusive panels selected by a single active tab. Switching
//! tabs keeps every panel's state.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::api::{ApiClient, User};
use crate::session::SessionContext;

use super::{CalendarIntegration, View};

/// Settings panels, in sidebar order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    Profile,
    Appearance,
    Notifications,
    Security,
    Integrations,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::Profile,
        SettingsTab::Appearance,
        SettingsTab::Notifications,
        SettingsTab::Security,
        SettingsTab::Integrations,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "profile",
            SettingsTab::Appearance => "appearance",
            SettingsTab::Notifications => "notifications",
            SettingsTab::Security => "security",
            SettingsTab::Integrations => "integrations",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Appearance => "Appearance",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Security => "Security",
            SettingsTab::Integrations => "Integrations",
        }
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SettingsTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingsTab::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown settings tab: {}. Use one of: profile, appearance, notifications, security, integrations",
                    s
                )
            })
    }
}

/// Colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => f.write_str("Dark"),
            Theme::Light => f.write_str("Light"),
        }
    }
}

/// Profile fields derived from the session's user record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePanel {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub full_name: String,
}

impl ProfilePanel {
    /// First word of the name is the first name, the rest is the last name
    pub fn from_user(user: &User) -> Self {
        let mut parts = user.name.split(' ');
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        Self {
            first_name,
            last_name,
            email: user.email.clone(),
            full_name: user.name.clone(),
        }
    }

    /// Avatar initials, `U` when nothing is known
    pub fn initials(&self) -> String {
        if !self.first_name.is_empty() && !self.last_name.is_empty() {
            return format!("{}{}", first_char(&self.first_name), first_char(&self.last_name))
                .to_uppercase();
        }

        if !self.full_name.is_empty() {
            let parts: Vec<&str> = self.full_name.split(' ').collect();
            if parts.len() >= 2 {
                return format!(
                    "{}{}",
                    first_char(parts[0]),
                    first_char(parts[parts.len() - 1])
                )
                .to_uppercase();
            }
            return first_char(&self.full_name).to_uppercase();
        }

        "U".to_string()
    }

    fn render(&self) -> String {
        let mut out = String::from("Profile Settings\n\n");
        out.push_str(&format!("  ({})\n\n", self.initials()));
        out.push_str(&format!("  First Name:    {}\n", self.first_name));
        out.push_str(&format!("  Last Name:     {}\n", self.last_name));
        out.push_str(&format!("  Email Address: {}\n", self.email));
        out
    }
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

/// One notification toggle
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPreference {
    pub label: &'static str,
    pub enabled: bool,
}

fn default_notifications() -> Vec<NotificationPreference> {
    ["Email Notifications", "Push Notifications", "Weekly Digest", "Meeting Reminders"]
        .into_iter()
        .enumerate()
        .map(|(i, label)| NotificationPreference {
            label,
            enabled: i < 2,
        })
        .collect()
}

/// Settings view
#[derive(Debug, Clone)]
pub struct Settings {
    active_tab: SettingsTab,
    profile: ProfilePanel,
    theme: Theme,
    notifications: Vec<NotificationPreference>,
    calendar: CalendarIntegration,
}

impl Settings {
    /// Build the panels from the signed-in identity
    pub fn new(session: &SessionContext, theme: Theme) -> Self {
        let profile = session
            .user()
            .map(|user| ProfilePanel::from_user(&user))
            .unwrap_or_default();

        Self {
            active_tab: SettingsTab::default(),
            profile,
            theme,
            notifications: default_notifications(),
            calendar: CalendarIntegration::new(),
        }
    }

    pub fn active_tab(&self) -> SettingsTab {
        self.active_tab
    }

    pub fn select(&mut self, tab: SettingsTab) {
        self.active_tab = tab;
    }

    pub fn profile(&self) -> &ProfilePanel {
        &self.profile
    }

    pub fn notifications(&self) -> &[NotificationPreference] {
        &self.notifications
    }

    pub fn calendar(&self) -> &CalendarIntegration {
        &self.calendar
    }

    fn render_tabs(&self) -> String {
        SettingsTab::ALL
            .iter()
            .map(|tab| {
                if *tab == self.active_tab {
                    format!("[{}]", tab.label())
                } else {
                    format!(" {} ", tab.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_appearance(&self) -> String {
        let mut out = String::from("Appearance Settings\n");
        out.push_str("Customize the visual appearance of your application\n\n");
        out.push_str(&format!("  Theme: {}\n", self.theme));
        out.push_str("  Choose your preferred color scheme with SMARTMEET_THEME=dark|light\n");
        out
    }

    fn render_notifications(&self) -> String {
        let mut out = String::from("Notification Preferences\n");
        out.push_str("Manage how you receive notifications\n\n");
        for pref in &self.notifications {
            out.push_str(&format!(
                "  [{}] {:<22} Receive {}\n",
                if pref.enabled { "x" } else { " " },
                pref.label,
                pref.label.to_lowercase()
            ));
        }
        out
    }

    fn render_security(&self) -> String {
        let mut out = String::from("Security Settings\n");
        out.push_str("Manage your account security preferences\n\n");
        for field in ["Current Password", "New Password", "Confirm New Password"] {
            out.push_str(&format!("  {}\n", field));
        }
        out
    }
}

#[async_trait]
impl View for Settings {
    /// Only the integrations panel talks to the backend
    async fn load(&mut self, api: &ApiClient) {
        if self.active_tab == SettingsTab::Integrations {
            self.calendar.load(api).await;
        }
    }

    fn render(&self) -> String {
        let mut out = String::from("Settings\n");
        out.push_str(&self.render_tabs());
        out.push_str("\n\n");

        let panel = match self.active_tab {
            SettingsTab::Profile => self.profile.render(),
            SettingsTab::Appearance => self.render_appearance(),
            SettingsTab::Notifications => self.render_notifications(),
            SettingsTab::Security => self.render_security(),
            SettingsTab::Integrations => format!(
                "Integration Settings\nManage your connected calendars and meeting platforms\n\n{}",
                self.calendar.render()
            ),
        };
        out.push_str(&panel);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            name: name.to_string(),
            email: "someone@x.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_split() {
        let profile = ProfilePanel::from_user(&user("Mary Ann Smith"));
        assert_eq!(profile.first_name, "Mary");
        assert_eq!(profile.last_name, "Ann Smith");
        assert_eq!(profile.initials(), "MA");
    }

    #[test]
    fn test_initials_fallbacks() {
        assert_eq!(ProfilePanel::from_user(&user("jane doe")).initials(), "JD");
        assert_eq!(ProfilePanel::from_user(&user("Cher")).initials(), "C");
        assert_eq!(ProfilePanel::from_user(&user("")).initials(), "U");
        assert_eq!(ProfilePanel::default().initials(), "U");
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("security".parse::<SettingsTab>(), Ok(SettingsTab::Security));
        assert_eq!("Integrations".parse::<SettingsTab>(), Ok(SettingsTab::Integrations));
        assert!("billing".parse::<SettingsTab>().is_err());
    }

    #[test]
    fn test_only_active_panel_renders() {
        let session = SessionContext::in_memory();
        session.sign_in("t", user("Jane Doe")).unwrap();

        let mut settings = Settings::new(&session, Theme::Light);
        let text = settings.render();
        assert!(text.contains("Profile Settings"));
        assert!(text.contains("(JD)"));
        assert!(text.contains("[Profile]"));
        assert!(!text.contains("Notification Preferences"));

        settings.select(SettingsTab::Appearance);
        let text = settings.render();
        assert!(text.contains("Theme: Light"));
        assert!(!text.contains("Profile Settings"));
    }

    #[test]
    fn test_notification_defaults() {
        let settings = Settings::new(&SessionContext::in_memory(), Theme::Dark);
        let enabled: Vec<bool> = settings.notifications().iter().map(|n| n.enabled).collect();
        assert_eq!(enabled, vec![true, true, false, false]);
        assert_eq!(settings.profile().initials(), "U");
    }
}
