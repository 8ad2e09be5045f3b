//! growing-recs - most common growing conditions for a crop, from Growstuff
//!
//! Normalizes a crop name, fetches the crop's plantings from the Growstuff
//! API, and reports which propagation method and sun exposure gardeners used
//! most often.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod external;

pub use config::Config;
pub use driver::{Driver, Outcome, OutputFormat};
pub use error::{AppError, AppResult, FetchError};
pub use external::{CropSource, GrowstuffClient};
