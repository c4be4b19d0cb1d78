// Gateway module for the remote assistant - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;
mod traits;
mod types;

// Public re-exports - the ONLY way to access assistant functionality
pub use http::HttpResponder;
#[cfg(test)]
pub use traits::MockResponder;
pub use traits::Responder;
pub use types::{AssistantPayload, AssistantRequest};
