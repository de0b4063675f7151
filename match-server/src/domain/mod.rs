//! Domain types for journey matching.
//!
//! Users, journeys and requests as read from the store, plus the
//! validated value types (times, messages) the matcher and the request
//! lifecycle rely on.

mod ids;
mod journey;
mod request;
mod time;
mod user;

pub use ids::{JourneyId, RequestId, UserId};
pub use journey::{Coordinates, Journey, Place};
pub use request::{
    Decision, MAX_MESSAGE_CHARS, Message, MessageError, NewRequest, Request, RequestStatus,
};
pub use time::{ClockTime, TimeError};
pub use user::{Gender, User};
