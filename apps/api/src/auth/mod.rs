//! Credential sign-in and bearer-token authentication.
//!
//! - [`password`] -- Argon2id hashing and verification of agent passwords.
//! - [`jwt`] -- session token issuance and validation.
//! - [`extractor`] -- the [`extractor::AuthAgent`] request guard.
//! - [`repository`] -- agent lookups used by sign-in and `/me`.

pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repository;
