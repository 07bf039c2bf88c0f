use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The pool is the only shared mutable resource; repositories receive it as
/// `&PgPool` per call rather than reaching for a global.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}
