use serde::{Deserialize, Serialize};

use crate::constants::UPCOMING_EVENTS_COUNT;

/// The signed-in alumnus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub initials: String,
    pub class: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Alumni User".to_string(),
            initials: "AL".to_string(),
            class: "2020".to_string(),
            email: String::new(),
            location: String::new(),
        }
    }
}

impl UserProfile {
    pub fn class_label(&self) -> String {
        format!("Class of {}", self.class)
    }
}

/// Headline numbers on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// One per alumni record in the directory
    pub connections: usize,
    pub upcoming_events: usize,
}

impl DashboardStats {
    pub fn new(directory_len: usize) -> Self {
        Self {
            connections: directory_len,
            upcoming_events: UPCOMING_EVENTS_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Connection,
    Event,
    Update,
    Message,
}

impl ActivityKind {
    pub fn icon(&self) -> &str {
        match self {
            Self::Connection => "🤝",
            Self::Event => "📅",
            Self::Update => "✏️",
            Self::Message => "✉️",
        }
    }
}

/// One line of the activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub text: String,
    pub time_ago: String,
}

impl ActivityItem {
    fn new(kind: ActivityKind, text: &str, time_ago: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            time_ago: time_ago.to_string(),
        }
    }
}

/// Recent activity, newest first
pub fn activity_feed() -> Vec<ActivityItem> {
    vec![
        ActivityItem::new(
            ActivityKind::Connection,
            "Sarah Johnson accepted your connection request",
            "2 hours ago",
        ),
        ActivityItem::new(
            ActivityKind::Event,
            "New networking event: Tech Alumni Meetup",
            "1 day ago",
        ),
        ActivityItem::new(
            ActivityKind::Update,
            "Michael Chen updated his profile",
            "2 days ago",
        ),
        ActivityItem::new(ActivityKind::Message, "You have 3 new messages", "3 days ago"),
    ]
}
