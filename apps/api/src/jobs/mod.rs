//! Job listings: filtered search and detail.

pub mod handlers;
pub mod models;
pub mod repository;
