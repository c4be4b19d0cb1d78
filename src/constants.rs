/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_ASSISTANT_ENDPOINT: &str = "https://connect.williams.edu/manage/database/gpt";
pub const SESSION_COOKIE_ENV: &str = "ALUMNI_PORTAL_SESSION_COOKIE";

// Timeouts
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 60;

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

// Chat copy
pub const CHAT_FAILURE_MESSAGE: &str =
    "Sorry, I encountered an error processing your request. Please try again.";
pub const EMPTY_REPLY_PLACEHOLDER: &str =
    "I received your message but couldn't generate a proper response.";
pub const INIT_FAILURE_MESSAGE: &str =
    "Failed to initialize the application. Please refresh and try again.";

// Dashboard
pub const UPCOMING_EVENTS_COUNT: usize = 3;

// Suggested prompts offered in the assistant section (F1-F4)
pub const CHAT_SUGGESTIONS: &[&str] = &[
    "Who in the directory works in technology?",
    "How can I reconnect with my graduating class?",
    "What alumni events are coming up?",
    "Help me write a networking message to an alumnus.",
];

// Files
pub const APP_NAME: &str = "alumni-portal";
pub const LOCAL_CONFIG_DIR: &str = ".alumni-portal";
pub const ENV_PREFIX: &str = "ALUMNI_PORTAL_";
pub const LOG_FILE_NAME: &str = "alumni-portal.log";
