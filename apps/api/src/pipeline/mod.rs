//! Pipeline board: applications grouped into one column per stage.
//!
//! Any stage may move to any other stage (including back out of `hired` or
//! `rejected`); the stage update touches only the stage and its timestamp.

pub mod board;
pub mod handlers;
pub mod models;
pub mod repository;
