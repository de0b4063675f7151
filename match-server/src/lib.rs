//! Journey matching server.
//!
//! Finds other users' journeys that a rider could share, and manages the
//! requests riders send to journey owners.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod geo;
pub mod matching;
pub mod requests;
pub mod store;
pub mod web;
