use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::section::Section;
use crate::directory::FacetField;

/// What a key press means on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    NextSection,
    PrevSection,
    Jump(Section),
    Insert(char),
    Delete,
    Submit,
    Suggestion(usize),
    ScrollUp,
    ScrollDown,
    SelectPrev,
    SelectNext,
    CycleFacet(FacetField),
    ResetFilters,
    OpenProfile,
    Connect,
    Dismiss,
    None,
}

/// Translate a key event for the given page
pub fn map_key(key: KeyEvent, section: Section) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global shortcuts
    match key.code {
        KeyCode::Char('c') if ctrl => return InputAction::Quit,
        KeyCode::Char('a') if ctrl => return InputAction::Jump(Section::Assistant),
        KeyCode::BackTab => return InputAction::PrevSection,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            return InputAction::PrevSection
        }
        KeyCode::Tab => return InputAction::NextSection,
        _ => {}
    }

    match section {
        Section::Dashboard => match key.code {
            KeyCode::Char('d') => InputAction::Jump(Section::Directory),
            KeyCode::Char('a') => InputAction::Jump(Section::Assistant),
            KeyCode::Char('p') => InputAction::Jump(Section::Profile),
            KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
            _ => InputAction::None,
        },
        Section::Profile => match key.code {
            KeyCode::Char('q') => InputAction::Quit,
            KeyCode::Esc => InputAction::Jump(Section::Dashboard),
            _ => InputAction::None,
        },
        Section::Directory => match key.code {
            KeyCode::Char('o') if ctrl => InputAction::Connect,
            KeyCode::Char('r') if ctrl => InputAction::ResetFilters,
            KeyCode::Char(c) if !ctrl => InputAction::Insert(c),
            KeyCode::Backspace => InputAction::Delete,
            KeyCode::Up => InputAction::SelectPrev,
            KeyCode::Down => InputAction::SelectNext,
            KeyCode::Enter => InputAction::OpenProfile,
            KeyCode::F(2) => InputAction::CycleFacet(FacetField::Class),
            KeyCode::F(3) => InputAction::CycleFacet(FacetField::Industry),
            KeyCode::F(4) => InputAction::CycleFacet(FacetField::Location),
            KeyCode::Esc => InputAction::Dismiss,
            _ => InputAction::None,
        },
        Section::Assistant => match key.code {
            KeyCode::Char(c) if !ctrl => InputAction::Insert(c),
            KeyCode::Backspace => InputAction::Delete,
            KeyCode::Enter => InputAction::Submit,
            KeyCode::F(n @ 1..=4) => InputAction::Suggestion(usize::from(n - 1)),
            KeyCode::PageUp | KeyCode::Up => InputAction::ScrollUp,
            KeyCode::PageDown | KeyCode::Down => InputAction::ScrollDown,
            KeyCode::Esc => InputAction::Jump(Section::Dashboard),
            _ => InputAction::None,
        },
    }
}
