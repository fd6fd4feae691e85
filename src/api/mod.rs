//! Client side of the palette service HTTP API.

pub mod client;
pub mod models;

pub use client::PaletteClient;
pub use models::{Analysis, AnalysisMethod, GalleryEntry, GalleryListing, PaletteId, Stats};

use models::HealthStatus;

/// Calls the rest of the crate makes against the palette service.
#[async_trait::async_trait]
pub trait PaletteApi: Send + Sync {
    async fn health(&self) -> anyhow::Result<HealthStatus>;
    async fn analyze(&self, text: &str, method: AnalysisMethod) -> anyhow::Result<Analysis>;
    async fn gallery(&self, limit: Option<u32>) -> anyhow::Result<GalleryListing>;
    async fn delete_palette(&self, id: &PaletteId) -> anyhow::Result<()>;
    async fn stats(&self) -> anyhow::Result<Stats>;
}
