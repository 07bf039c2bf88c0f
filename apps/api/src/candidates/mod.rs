//! Candidate list, detail, creation, and the append-only note log.

pub mod handlers;
pub mod models;
pub mod repository;
