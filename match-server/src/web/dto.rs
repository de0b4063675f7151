//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, Decision, Journey, JourneyId, RequestId, RequestStatus, UserId};
use crate::error::ErrorKind;
use crate::matching::Match;
use crate::requests::RequestView;

/// A journey as shown in listings.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    pub journey_id: JourneyId,

    /// Owning user
    pub user_id: UserId,

    /// Origin label as entered
    pub origin: String,

    /// Absent if the origin was typed rather than picked from suggestions
    pub origin_coordinates: Option<Coordinates>,

    /// Destination label as entered
    pub destination: String,

    pub destination_coordinates: Option<Coordinates>,

    pub date: NaiveDate,

    /// Departure time in HH:MM format
    pub departing_at: String,

    /// Latest arrival time in HH:MM format
    pub must_arrive_at: String,

    /// Status label kept by the journey screens
    pub status: String,
}

/// A match in search results.
#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub journey: JourneyResult,

    /// First name of the journey's owner
    pub owner_first_name: String,

    /// Kilometres between the two origins
    pub origin_distance_km: f64,

    /// Kilometres between the two destinations
    pub destination_distance_km: f64,
}

/// Response for match search.
#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    /// Matches, closest origin first
    pub matches: Vec<MatchResult>,
}

/// Body of a new request.
#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    /// Note to the journey owner. A missing message is validated as empty.
    #[serde(default)]
    pub message: String,
}

/// Response for a created request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRequestResponse {
    pub request_id: RequestId,
}

/// Body of a response to a request.
#[derive(Debug, Deserialize)]
pub struct RespondBody {
    pub decision: Decision,
}

/// A request with both parties and the journey.
#[derive(Debug, Serialize)]
pub struct RequestResult {
    pub request_id: RequestId,

    pub status: RequestStatus,

    pub message: String,

    pub requester_id: UserId,

    pub requester_first_name: Option<String>,

    pub recipient_id: UserId,

    pub recipient_first_name: Option<String>,

    pub journey_id: JourneyId,

    /// Absent if the journey has since been deleted
    pub journey: Option<JourneyResult>,
}

/// Response for inbox and outbox listings.
#[derive(Debug, Serialize)]
pub struct RequestListResponse {
    /// Requests, newest first
    pub requests: Vec<RequestResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Error category, absent for authentication failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            journey_id: journey.journey_id,
            user_id: journey.user_id,
            origin: journey.origin.label.clone(),
            origin_coordinates: journey.origin.coordinates,
            destination: journey.destination.label.clone(),
            destination_coordinates: journey.destination.coordinates,
            date: journey.date,
            departing_at: journey.departing_at.clone(),
            must_arrive_at: journey.must_arrive_at.clone(),
            status: journey.status.clone(),
        }
    }
}

impl MatchResult {
    /// Create from a ranked match.
    pub fn from_match(m: &Match) -> Self {
        Self {
            journey: JourneyResult::from_journey(&m.journey),
            owner_first_name: m.owner_first_name.clone(),
            origin_distance_km: m.origin_distance_km,
            destination_distance_km: m.destination_distance_km,
        }
    }
}

impl RequestResult {
    /// Create from a request view.
    pub fn from_view(view: &RequestView) -> Self {
        let request = &view.request;
        Self {
            request_id: request.request_id,
            status: request.status,
            message: request.message.as_str().to_string(),
            requester_id: request.requester_id,
            requester_first_name: view.requester_first_name.clone(),
            recipient_id: request.recipient_id,
            recipient_first_name: view.recipient_first_name.clone(),
            journey_id: request.journey_id,
            journey: view.journey.as_ref().map(JourneyResult::from_journey),
        }
    }
}
