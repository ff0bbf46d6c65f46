//! Fetches a player's recent ranked matches from the Riot API and aggregates
//! them into a performance report: scalar summary, champion and role
//! breakdowns, and short-window trend classification.
//!
//! The API client is rate-limited (100 ms minimum spacing plus a
//! 100-requests-per-2-minutes window ceiling) and tolerates individual match
//! fetch failures. The analyzer is a pure function over the fetched batch.

pub mod analysis;
pub mod api;
pub mod cancel;
pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod rate_limit;
