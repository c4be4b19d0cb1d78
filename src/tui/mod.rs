// Gateway module for TUI - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod app;
mod input;
mod markdown;
mod render;
mod section;
mod ui;

// Public re-exports - the ONLY way to access TUI functionality
pub use app::{App, ChatRequest, SearchDebounce};
pub use input::{map_key, InputAction};
pub use section::Section;
pub use ui::{run_notice, run_ui};
