//! Seed data for the in-memory store.
//!
//! A seed file is a JSON document with one array per table:
//!
//! ```json
//! { "users": [...], "journeys": [...], "requests": [...] }
//! ```
//!
//! This is useful for development and demos without a real database.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Journey, Request, User};

use super::error::StoreError;

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub journeys: Vec<Journey>,

    #[serde(default)]
    pub requests: Vec<Request>,
}

impl Seed {
    /// Load seed data from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the constraints the tables rely on.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut user_ids = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.user_id) {
                return Err(invalid(format!("duplicate user {}", user.user_id)));
            }
        }

        let mut journey_owners = HashMap::new();
        for journey in &self.journeys {
            if !user_ids.contains(&journey.user_id) {
                return Err(invalid(format!(
                    "journey {} belongs to unknown user {}",
                    journey.journey_id, journey.user_id
                )));
            }
            if journey_owners
                .insert(journey.journey_id, journey.user_id)
                .is_some()
            {
                return Err(invalid(format!("duplicate journey {}", journey.journey_id)));
            }
        }

        let mut request_ids = HashSet::new();
        let mut pairs = HashSet::new();
        for request in &self.requests {
            let id = request.request_id;
            if !request_ids.insert(id) {
                return Err(invalid(format!("duplicate request {id}")));
            }

            let Some(owner) = journey_owners.get(&request.journey_id) else {
                return Err(invalid(format!(
                    "request {id} targets unknown journey {}",
                    request.journey_id
                )));
            };
            if *owner != request.recipient_id {
                return Err(invalid(format!(
                    "request {id} recipient {} does not own journey {}",
                    request.recipient_id, request.journey_id
                )));
            }
            if !user_ids.contains(&request.requester_id) {
                return Err(invalid(format!(
                    "request {id} sent by unknown user {}",
                    request.requester_id
                )));
            }
            if request.requester_id == request.recipient_id {
                return Err(invalid(format!("request {id} is addressed to its sender")));
            }
            if !pairs.insert((request.requester_id, request.journey_id)) {
                return Err(invalid(format!(
                    "request {id} duplicates an earlier request for journey {}",
                    request.journey_id
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> StoreError {
    StoreError::InvalidSeed(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JourneyId, UserId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED: &str = r#"{
        "users": [
            { "user_id": 1, "first_name": "Aoife", "can_drive": true,
              "prefers_same_gender": false, "smoking_allowed": false, "gender": "Female" },
            { "user_id": 2, "first_name": "Ciaran", "can_drive": true,
              "prefers_same_gender": false, "smoking_allowed": false, "gender": "Male" }
        ],
        "journeys": [
            { "journey_id": 10, "user_id": 2,
              "origin": { "label": "Derry", "coordinates": { "latitude": 54.99, "longitude": -7.30 } },
              "destination": { "label": "Letterkenny", "coordinates": { "latitude": 54.95, "longitude": -7.73 } },
              "date": "2025-03-14", "departing_at": "08:00", "must_arrive_at": "09:00",
              "status": "Active" }
        ],
        "requests": [
            { "request_id": 4, "requester_id": 1, "recipient_id": 2, "journey_id": 10,
              "message": "Can I join?", "status": "Pending" }
        ]
    }"#;

    fn write_seed(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_seed_file() {
        let file = write_seed(SEED);
        let seed = Seed::load(file.path()).unwrap();

        assert_eq!(seed.users.len(), 2);
        assert_eq!(seed.journeys[0].journey_id, JourneyId(10));
        assert_eq!(seed.requests[0].requester_id, UserId(1));
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let file = write_seed("{}");
        let seed = Seed::load(file.path()).unwrap();
        assert!(seed.users.is_empty());
        assert!(seed.requests.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Seed::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_seed("{ \"users\": [ ");
        let err = Seed::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn overlong_message_is_rejected_on_load() {
        let long = "x".repeat(151);
        let file = write_seed(&SEED.replace("Can I join?", &long));
        assert!(matches!(
            Seed::load(file.path()).unwrap_err(),
            StoreError::Parse { .. }
        ));
    }

    #[test]
    fn validate_rejects_wrong_recipient() {
        let mut seed: Seed = serde_json::from_str(SEED).unwrap();
        seed.requests[0].recipient_id = UserId(1);
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("does not own journey 10"));
    }

    #[test]
    fn validate_rejects_duplicate_pair() {
        let mut seed: Seed = serde_json::from_str(SEED).unwrap();
        let mut copy = seed.requests[0].clone();
        copy.request_id = crate::domain::RequestId(5);
        seed.requests.push(copy);
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("duplicates an earlier request"));
    }

    #[test]
    fn validate_rejects_orphan_journey() {
        let mut seed: Seed = serde_json::from_str(SEED).unwrap();
        seed.journeys[0].user_id = UserId(99);
        assert!(seed.validate().is_err());
    }
}
