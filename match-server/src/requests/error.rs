//! Request lifecycle errors.

use crate::domain::{JourneyId, MessageError, RequestId, RequestStatus, UserId};
use crate::error::ErrorKind;
use crate::store::StoreError;

/// The party a transition is reserved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Requester,
    Recipient,
    Participant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Requester => "requester",
            Role::Recipient => "recipient",
            Role::Participant => "requester or recipient",
        };
        f.write_str(s)
    }
}

/// Error from a request operation.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request {0} not found")]
    NotFound(RequestId),

    #[error("journey {0} not found")]
    JourneyNotFound(JourneyId),

    #[error("invalid message: {0}")]
    InvalidMessage(#[from] MessageError),

    #[error("user {0} cannot request their own journey")]
    SelfRequest(UserId),

    #[error("user {user} is not the {required} of request {request}")]
    Forbidden {
        request: RequestId,
        user: UserId,
        required: Role,
    },

    #[error("request {request} is {current}, expected Pending")]
    InvalidState {
        request: RequestId,
        current: RequestStatus,
    },

    #[error("user {requester} already has request {existing} for journey {journey}")]
    Conflict {
        requester: UserId,
        journey: JourneyId,
        existing: RequestId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::NotFound(_) | RequestError::JourneyNotFound(_) => ErrorKind::NotFound,
            RequestError::InvalidMessage(_) | RequestError::SelfRequest(_) => {
                ErrorKind::Validation
            }
            RequestError::Forbidden { .. } => ErrorKind::Forbidden,
            RequestError::InvalidState { .. } => ErrorKind::InvalidState,
            RequestError::Conflict { .. } => ErrorKind::Conflict,
            RequestError::Store(_) => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RequestError::Forbidden {
            request: RequestId(3),
            user: UserId(9),
            required: Role::Recipient,
        };
        assert_eq!(err.to_string(), "user 9 is not the recipient of request 3");

        let err = RequestError::InvalidState {
            request: RequestId(3),
            current: RequestStatus::Denied,
        };
        assert_eq!(err.to_string(), "request 3 is Denied, expected Pending");

        let err = RequestError::from(MessageError::Empty);
        assert_eq!(err.to_string(), "invalid message: message must not be empty");
    }

    #[test]
    fn kinds() {
        assert_eq!(RequestError::NotFound(RequestId(1)).kind(), ErrorKind::NotFound);
        assert_eq!(RequestError::SelfRequest(UserId(1)).kind(), ErrorKind::Validation);
        assert_eq!(
            RequestError::Conflict {
                requester: UserId(1),
                journey: JourneyId(2),
                existing: RequestId(3),
            }
            .kind(),
            ErrorKind::Conflict
        );
    }
}
