pub mod agent;
pub mod application;
pub mod candidate;
pub mod dashboard;
pub mod enums;
pub mod job;
