//! Real-estate investment solvency simulator.
//!
//! [`engine::simulate`] maps six inputs (all in 万円) to equity, debt ratio,
//! solvency and annual cash flow. [`report`] renders the result and
//! [`session`] drives the line-oriented interactive mode of the CLI.

pub mod engine;
pub mod report;
pub mod session;

pub use engine::{simulate, InputField, SimulationInput, SimulationOutput, SliderRange};
pub use session::InputError;
