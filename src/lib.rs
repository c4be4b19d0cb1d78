pub mod app;
pub mod assistant;
pub mod chat;
pub mod cli;
pub mod constants;
pub mod directory;
pub mod portal;
pub mod runtime;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use assistant::{HttpResponder, Responder};
pub use chat::{ChatController, ChatStatus, ChatTurn, SubmitOutcome};
pub use directory::{filter, AlumniRecord, Directory, DirectoryView, FilterCriteria};
pub use portal::Portal;
pub use tui::run_ui;
pub use utils::PortalError;
