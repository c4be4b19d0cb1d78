/// Portal session module - Gateway

mod dashboard;
mod session;

pub use dashboard::{activity_feed, ActivityItem, ActivityKind, DashboardStats, UserProfile};
pub use session::Portal;
