//! Ride requests between users.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{JourneyId, RequestId, UserId};

/// Maximum request message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 150;

/// Error returned when a request message is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message must not be empty")]
    Empty,

    #[error("message is {len} characters, maximum is {MAX_MESSAGE_CHARS}")]
    TooLong { len: usize },
}

/// A validated request message: non-blank and at most
/// [`MAX_MESSAGE_CHARS`] characters once surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use match_server::domain::Message;
///
/// assert!(Message::parse("Can I join you on Friday?").is_ok());
/// assert!(Message::parse("   ").is_err());
/// assert!(Message::parse(&"x".repeat(151)).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Message(String);

impl Message {
    /// Trim and validate. The trimmed text is what gets stored.
    pub fn parse(s: &str) -> Result<Self, MessageError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MessageError::Empty);
        }

        let len = s.chars().count();
        if len > MAX_MESSAGE_CHARS {
            return Err(MessageError::TooLong { len });
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Message {
    type Error = MessageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Message> for String {
    fn from(value: Message) -> Self {
        value.0
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message({:?})", self.0)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a request.
///
/// `Approved` and `Denied` are terminal. Cancelling removes the request
/// instead of recording a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Denied => "Denied",
        };
        f.write_str(s)
    }
}

/// A recipient's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    /// The status a pending request moves to.
    pub fn target_status(self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Deny => RequestStatus::Denied,
        }
    }
}

/// A request row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: RequestId,

    pub requester_id: UserId,

    /// Owner of the requested journey.
    pub recipient_id: UserId,

    pub journey_id: JourneyId,

    pub message: Message,

    pub status: RequestStatus,
}

/// A request that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub requester_id: UserId,
    pub recipient_id: UserId,
    pub journey_id: JourneyId,
    pub message: Message,
}

impl NewRequest {
    /// Attach the id assigned by the store. New requests start `Pending`.
    pub fn into_request(self, request_id: RequestId) -> Request {
        Request {
            request_id,
            requester_id: self.requester_id,
            recipient_id: self.recipient_id,
            journey_id: self.journey_id,
            message: self.message,
            status: RequestStatus::Pending,
        }
    }
}
