// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ROOMS_CREATED: &str = "rooms.created";
pub const ROOMS_ACTIVE: &str = "rooms.active";
pub const MESSAGES_APPENDED: &str = "messages.appended";
pub const POLL_REQUESTS: &str = "poll.requests";
