//! Core domain types for the monitoring backend.

pub mod status;
pub mod tier;
pub mod time;


pub use status::*;
pub use tier::*;
pub use time::*;
