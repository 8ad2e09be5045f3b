//! External API integrations

use async_trait::async_trait;
use shared::CropRecord;

use crate::error::FetchError;

pub mod growstuff;

pub use growstuff::GrowstuffClient;

/// Anything that can look up a crop record by slug
#[async_trait]
pub trait CropSource {
    async fn fetch_crop(&self, slug: &str) -> Result<CropRecord, FetchError>;
}
