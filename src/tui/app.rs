use std::time::{Duration, Instant};

use super::input::InputAction;
use super::section::Section;
use crate::app::UIConfig;
use crate::constants::{CHAT_SUGGESTIONS, UI_SCROLL_LINES};
use crate::directory::{AlumniRecord, DirectoryView, FacetField, FilterCriteria};
use crate::portal::Portal;

/// Work the event loop must hand to a background task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRequest {
    /// Submit this text, taken from the input when Enter was pressed
    Text(String),
    /// Submit one of the suggested prompts
    Suggestion(String),
}

/// Holds back search filtering until typing pauses
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    wait: Duration,
    dirty_since: Option<Instant>,
}

impl SearchDebounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            dirty_since: None,
        }
    }

    /// A keystroke restarts the quiet period
    pub fn touch(&mut self, now: Instant) {
        self.dirty_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// True once, when the quiet period has elapsed since the last keystroke
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.saturating_duration_since(since) >= self.wait => {
                self.dirty_since = None;
                true
            }
            _ => false,
        }
    }
}

/// Application state
pub struct App {
    pub portal: Portal,
    pub section: Section,
    /// Search box text; applied to the view after the debounce
    pub search_input: String,
    /// Selected option index per facet, `None` meaning "all"
    facet_choice: [Option<usize>; 3],
    criteria: FilterCriteria,
    view: DirectoryView,
    /// Highlighted row in the directory list
    pub selected: usize,
    debounce: SearchDebounce,
    /// Lines scrolled up from the bottom of the transcript
    pub chat_scroll: u16,
    pub status_message: Option<String>,
    /// Profile card overlay
    pub detail: Option<String>,
    pub show_activity: bool,
    pub running: bool,
}

fn slot(field: FacetField) -> usize {
    match field {
        FacetField::Class => 0,
        FacetField::Industry => 1,
        FacetField::Location => 2,
    }
}

impl App {
    pub fn new(portal: Portal, ui: &UIConfig) -> Self {
        let criteria = FilterCriteria::new();
        let view = portal.directory().view(&criteria);

        Self {
            portal,
            section: Section::default(),
            search_input: String::new(),
            facet_choice: [None; 3],
            criteria,
            view,
            selected: 0,
            debounce: SearchDebounce::new(Duration::from_millis(ui.search_debounce_ms)),
            chat_scroll: 0,
            status_message: None,
            detail: None,
            show_activity: ui.show_activity,
            running: true,
        }
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Currently selected option for `field`, if any
    pub fn facet_value(&self, field: FacetField) -> Option<&str> {
        let index = self.facet_choice[slot(field)]?;
        self.portal
            .directory()
            .facets()
            .options(field)
            .get(index)
            .map(String::as_str)
    }

    pub fn selected_record(&self) -> Option<&AlumniRecord> {
        self.view.records().get(self.selected)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    fn go_to(&mut self, section: Section) {
        self.section = section;
        self.detail = None;
        self.clear_status();
    }

    /// Periodic housekeeping from the event loop
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.ready(now) {
            self.refresh_view();
        }
    }

    /// Rebuild the criteria from the inputs and re-run the filter
    pub fn refresh_view(&mut self) {
        let mut criteria = FilterCriteria::new().with_search(self.search_input.clone());
        criteria.class = self.facet_value(FacetField::Class).map(str::to_string);
        criteria.industry = self.facet_value(FacetField::Industry).map(str::to_string);
        criteria.location = self.facet_value(FacetField::Location).map(str::to_string);

        self.view = self.portal.directory().view(&criteria);
        self.criteria = criteria;

        let shown = self.view.records().len();
        if self.selected >= shown {
            self.selected = shown.saturating_sub(1);
        }
    }

    /// Step a facet through "all" and then each option in order
    fn cycle_facet(&mut self, field: FacetField) {
        let options = self.portal.directory().facets().options(field).len();
        let choice = &mut self.facet_choice[slot(field)];
        *choice = match *choice {
            None if options > 0 => Some(0),
            Some(i) if i + 1 < options => Some(i + 1),
            _ => None,
        };

        // Select filters apply immediately
        self.refresh_view();
        let label = self.facet_value(field).unwrap_or("All").to_string();
        self.set_status(format!("{}: {}", field.label(), label));
    }

    fn reset_filters(&mut self) {
        self.search_input.clear();
        self.facet_choice = [None; 3];
        self.debounce = SearchDebounce::new(self.debounce.wait);
        self.refresh_view();
        self.set_status("Filters cleared");
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(amount);
    }

    /// Apply one input action. Chat submissions are returned rather than run
    /// so the caller can put them on a background task.
    pub fn apply(&mut self, action: InputAction, now: Instant) -> Option<ChatRequest> {
        match action {
            InputAction::Quit => self.quit(),
            InputAction::NextSection => self.go_to(self.section.cycle()),
            InputAction::PrevSection => self.go_to(self.section.cycle_reverse()),
            InputAction::Jump(section) => self.go_to(section),
            InputAction::Insert(c) => match self.section {
                Section::Directory => {
                    self.search_input.push(c);
                    self.debounce.touch(now);
                }
                Section::Assistant => self.portal.chat().push_input(c),
                _ => {}
            },
            InputAction::Delete => match self.section {
                Section::Directory => {
                    self.search_input.pop();
                    self.debounce.touch(now);
                }
                Section::Assistant => self.portal.chat().pop_input(),
                _ => {}
            },
            InputAction::Submit => {
                let chat = self.portal.chat();
                if chat.submit_enabled() {
                    self.chat_scroll = 0;
                    return Some(ChatRequest::Text(chat.take_input()));
                }
            }
            InputAction::Suggestion(index) => {
                if self.portal.chat().is_sending() {
                    self.set_status("Please wait for the current reply");
                } else if let Some(text) = CHAT_SUGGESTIONS.get(index) {
                    self.chat_scroll = 0;
                    return Some(ChatRequest::Suggestion((*text).to_string()));
                }
            }
            InputAction::ScrollUp => self.scroll_up(UI_SCROLL_LINES),
            InputAction::ScrollDown => self.scroll_down(UI_SCROLL_LINES),
            InputAction::SelectPrev => self.selected = self.selected.saturating_sub(1),
            InputAction::SelectNext => {
                if self.selected + 1 < self.view.records().len() {
                    self.selected += 1;
                }
            }
            InputAction::CycleFacet(field) => self.cycle_facet(field),
            InputAction::ResetFilters => self.reset_filters(),
            InputAction::OpenProfile => {
                if let Some(id) = self.selected_record().map(|r| r.id) {
                    self.detail = self.portal.profile_card(id);
                }
            }
            InputAction::Connect => {
                if let Some(id) = self.selected_record().map(|r| r.id) {
                    if let Some(message) = self.portal.connect(id) {
                        self.set_status(message);
                    }
                }
            }
            InputAction::Dismiss => {
                self.detail = None;
                self.clear_status();
            }
            InputAction::None => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::MockResponder;
    use crate::chat::ChatController;
    use crate::directory::StaticRecordSource;
    use crate::portal::UserProfile;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    async fn app() -> App {
        let chat = ChatController::new(Arc::new(MockResponder::new()));
        let portal = Portal::bootstrap(&StaticRecordSource, chat, UserProfile::default())
            .await
            .unwrap();
        App::new(portal, &UIConfig::default())
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.apply(InputAction::Insert(c), now);
        }
    }

    fn names(app: &App) -> Vec<&str> {
        app.view().records().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_debounce_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debounce = SearchDebounce::new(Duration::from_millis(300));
        assert!(!debounce.ready(start));

        debounce.touch(start);
        assert!(!debounce.ready(start + Duration::from_millis(100)));

        debounce.touch(start + Duration::from_millis(200));
        assert!(!debounce.ready(start + Duration::from_millis(400)));
        assert!(debounce.ready(start + Duration::from_millis(500)));
        assert!(!debounce.ready(start + Duration::from_millis(900)));
    }

    #[tokio::test]
    async fn test_search_applies_after_debounce() {
        let mut app = app().await;
        app.section = Section::Directory;
        let start = Instant::now();

        type_text(&mut app, "sarah", start);
        assert_eq!(app.view().records().len(), 5);
        assert!(app.search_pending());

        app.tick(start + Duration::from_millis(100));
        assert_eq!(app.view().records().len(), 5);

        app.tick(start + Duration::from_millis(300));
        assert_eq!(names(&app), vec!["Sarah Johnson"]);
        assert!(!app.search_pending());
    }

    #[tokio::test]
    async fn test_search_without_match_reports_no_matches() {
        let mut app = app().await;
        app.section = Section::Directory;
        let start = Instant::now();

        type_text(&mut app, "zzz", start);
        app.tick(start + Duration::from_secs(1));

        assert_eq!(app.view(), &DirectoryView::NoMatches);
        assert_eq!(app.selected, 0);
        assert!(app.selected_record().is_none());
    }

    #[tokio::test]
    async fn test_facet_cycles_through_options_and_back_to_all() {
        let mut app = app().await;
        app.section = Section::Directory;
        let now = Instant::now();
        let industries = app.portal.directory().facets().industries.clone();

        for expected in &industries {
            app.apply(InputAction::CycleFacet(FacetField::Industry), now);
            assert_eq!(app.facet_value(FacetField::Industry), Some(expected.as_str()));
            assert!(app
                .view()
                .records()
                .iter()
                .all(|r| &r.industry == expected));
        }

        app.apply(InputAction::CycleFacet(FacetField::Industry), now);
        assert_eq!(app.facet_value(FacetField::Industry), None);
        assert_eq!(app.view().records().len(), 5);
    }

    #[tokio::test]
    async fn test_reset_clears_search_and_facets() {
        let mut app = app().await;
        app.section = Section::Directory;
        let now = Instant::now();

        app.apply(InputAction::CycleFacet(FacetField::Class), now);
        type_text(&mut app, "zzz", now);
        app.apply(InputAction::ResetFilters, now);

        assert!(app.search_input.is_empty());
        assert!(app.criteria().is_empty());
        assert_eq!(app.view().records().len(), 5);
        assert!(!app.search_pending());
    }

    #[tokio::test]
    async fn test_connect_and_open_profile_use_selection() {
        let mut app = app().await;
        app.section = Section::Directory;
        let now = Instant::now();

        app.apply(InputAction::SelectNext, now);
        let name = app.selected_record().unwrap().name.clone();

        app.apply(InputAction::Connect, now);
        assert_eq!(
            app.status_message.as_deref(),
            Some(format!("Connection request sent to {}!", name).as_str())
        );

        app.apply(InputAction::OpenProfile, now);
        assert!(app
            .detail
            .as_deref()
            .unwrap()
            .starts_with(&format!("Viewing profile for {}", name)));

        app.apply(InputAction::Dismiss, now);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let mut app = app().await;
        let now = Instant::now();

        app.apply(InputAction::SelectPrev, now);
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            app.apply(InputAction::SelectNext, now);
        }
        assert_eq!(app.selected, 4);
    }

    #[tokio::test]
    async fn test_submit_requires_input() {
        let mut app = app().await;
        app.section = Section::Assistant;
        let now = Instant::now();

        assert_eq!(app.apply(InputAction::Submit, now), None);

        type_text(&mut app, "  ", now);
        assert_eq!(app.apply(InputAction::Submit, now), None);

        type_text(&mut app, "hi", now);
        assert_eq!(app.portal.chat().pending_input(), "  hi");
        assert_eq!(
            app.apply(InputAction::Submit, now),
            Some(ChatRequest::Text("  hi".to_string()))
        );
    }

    #[tokio::test]
    async fn test_message_is_fixed_when_enter_is_pressed() {
        let mut app = app().await;
        app.section = Section::Assistant;
        let now = Instant::now();

        type_text(&mut app, "Hello", now);
        let request = app.apply(InputAction::Submit, now);
        assert!(app.portal.chat().pending_input().is_empty());

        // Keys typed before the background task runs start the next draft
        type_text(&mut app, " again", now);
        assert_eq!(request, Some(ChatRequest::Text("Hello".to_string())));
        assert_eq!(app.portal.chat().pending_input(), " again");
    }

    #[tokio::test]
    async fn test_suggestion_keys_map_to_prompts() {
        let mut app = app().await;
        app.section = Section::Assistant;
        let now = Instant::now();

        assert_eq!(
            app.apply(InputAction::Suggestion(0), now),
            Some(ChatRequest::Suggestion(CHAT_SUGGESTIONS[0].to_string()))
        );
        assert_eq!(app.apply(InputAction::Suggestion(9), now), None);
    }

    #[tokio::test]
    async fn test_section_navigation() {
        let mut app = app().await;
        let now = Instant::now();

        app.apply(InputAction::NextSection, now);
        assert_eq!(app.section, Section::Directory);
        app.apply(InputAction::PrevSection, now);
        app.apply(InputAction::PrevSection, now);
        assert_eq!(app.section, Section::Profile);
        app.apply(InputAction::Jump(Section::Assistant), now);
        assert_eq!(app.section, Section::Assistant);

        app.apply(InputAction::Quit, now);
        assert!(!app.running);
    }
}
