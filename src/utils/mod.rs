//! Utility module

mod error;
mod position;
pub mod report;

pub use error::{Error, Result};
pub use position::{Location, Position};
pub use report::Report;
