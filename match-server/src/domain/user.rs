//! Users as seen by the matcher.
//!
//! Users are owned by the identity store. The matcher only reads the
//! preference flags that decide who can ride with whom.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Self-declared gender, used by the same-gender preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,

    /// Shown to the other party on matches and requests.
    pub first_name: String,

    /// Whether this user offers to drive on their journeys.
    pub can_drive: bool,

    /// Only ride with users of the same gender.
    pub prefers_same_gender: bool,

    pub smoking_allowed: bool,

    pub gender: Gender,
}
