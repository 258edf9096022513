//! Data models for the defect reporting application.
//!
//! These models match the mobile client's JSON contract.

mod report;
mod status;

pub use report::*;
pub use status::*;
