//! Journey matching.
//!
//! Given a source journey and the user asking, finds other users' journeys
//! that could be shared: same date, departing within the time window,
//! starting and ending near the source, owned by a driver whose
//! preferences agree with the acting user's, and not already requested.
//!
//! Matching runs in two stages. The store narrows candidates with cheap
//! bounding-box checks, then the filter re-checks every rule and the ranker
//! computes exact great-circle distances.

mod config;
mod filter;
mod matcher;
mod rank;

pub use config::MatchConfig;
pub use filter::{CandidateFilter, Rejection};
pub use matcher::{MatchError, Matcher};
pub use rank::{Candidate, Match, rank_candidates};
