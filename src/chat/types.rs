use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::constants::CHAT_FAILURE_MESSAGE;

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One message in the transcript. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub is_error: bool,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Local::now(),
            is_error: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Local::now(),
            is_error: false,
        }
    }

    /// The fixed, non-technical error turn
    pub fn failure() -> Self {
        Self {
            text: CHAT_FAILURE_MESSAGE.to_string(),
            sender: Sender::Assistant,
            timestamp: Local::now(),
            is_error: true,
        }
    }

    /// `HH:MM`, as shown next to each message
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Controller state. `Idle` is both initial and resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChatStatus {
    #[default]
    Idle,
    Sending,
}

/// Why a submission was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyMessage,
    AlreadySending,
}

/// What happened to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Reply appended
    Replied,
    /// Error turn appended
    Failed,
    /// No-op: transcript untouched, no network call
    Rejected(RejectReason),
}
