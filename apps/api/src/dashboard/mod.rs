//! Aggregate snapshot for the dashboard: KPIs, funnel, and recent activity.

pub mod handlers;
pub mod models;
pub mod repository;
