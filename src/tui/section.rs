use ratatui::style::Color;

/// Top-level pages of the portal, cycled with Tab / Shift+Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Directory,
    Assistant,
    Profile,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Directory,
        Section::Assistant,
        Section::Profile,
    ];

    /// Cycle to the next section
    pub fn cycle(&self) -> Self {
        match self {
            Self::Dashboard => Self::Directory,
            Self::Directory => Self::Assistant,
            Self::Assistant => Self::Profile,
            Self::Profile => Self::Dashboard,
        }
    }

    /// Cycle to the previous section
    pub fn cycle_reverse(&self) -> Self {
        match self {
            Self::Dashboard => Self::Profile,
            Self::Profile => Self::Assistant,
            Self::Assistant => Self::Directory,
            Self::Directory => Self::Dashboard,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Directory => "Directory",
            Self::Assistant => "AI Assistant",
            Self::Profile => "Profile",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Dashboard => Color::Cyan,
            Self::Directory => Color::Yellow,
            Self::Assistant => Color::Green,
            Self::Profile => Color::Magenta,
        }
    }

    pub fn keyboard_hint(&self) -> &str {
        match self {
            Self::Dashboard => "d: directory  a: assistant  p: profile  q: quit",
            Self::Directory => {
                "type to search  F2/F3/F4: class/industry/location  ↑↓: select  Enter: profile  Ctrl+O: connect  Ctrl+R: reset"
            }
            Self::Assistant => "Enter: send  F1-F4: suggestions  PgUp/PgDn: scroll",
            Self::Profile => "q: quit",
        }
    }

    /// Parse a section name (CLI `--section`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" | "home" => Some(Self::Dashboard),
            "directory" | "alumni" => Some(Self::Directory),
            "assistant" | "ai-assistant" | "chat" => Some(Self::Assistant),
            "profile" => Some(Self::Profile),
            _ => None,
        }
    }
}
