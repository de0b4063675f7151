//! Ride requests.
//!
//! A user asks to join another user's journey; the journey owner approves
//! or denies. The requester can withdraw at any time. A requester holds at
//! most one request per journey.

mod error;
mod lifecycle;

pub use error::{RequestError, Role};
pub use lifecycle::{RequestManager, RequestView};
