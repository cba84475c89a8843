//! Data models for the simulated Woofy handler.
//!
//! This module groups two submodules:
//! - `scenario`: the synthetic request description fed to the classifier.
//! - `response`: the Lambda-style response the classifier produces.
//!
//! The decision table that turns one into the other lives in `crate::classifier`.

pub mod response;
pub mod scenario;

pub use response::HandlerResponse;
pub use scenario::ScenarioInput;
