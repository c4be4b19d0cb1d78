/// Chat session module - Gateway

mod controller;
mod types;

pub use controller::ChatController;
pub use types::{ChatStatus, ChatTurn, RejectReason, Sender, SubmitOutcome};
