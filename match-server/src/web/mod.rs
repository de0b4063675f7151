//! Web layer for journey matching.
//!
//! A JSON API over the engine. Every route except `/health` requires the
//! `X-User-Id` header naming the acting user.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{ActingUser, ApiJson, ApiPath, AppError, USER_ID_HEADER, create_router, status_for};
pub use state::AppState;
