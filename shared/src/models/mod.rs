//! Domain models for growing-recs

mod conditions;
mod crop;
mod report;

pub use conditions::*;
pub use crop::*;
pub use report::*;
