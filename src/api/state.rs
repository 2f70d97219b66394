use std::sync::Arc;

use crate::services::{images::ImageUrlMapper, providers::VideoPlatform, search::SearchEngine};

/// Shared application state
///
/// Everything in here is immutable after startup; concurrent search requests
/// share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub platform: Arc<dyn VideoPlatform>,
    pub images: ImageUrlMapper,
}

impl AppState {
    pub fn new(
        engine: Arc<SearchEngine>,
        platform: Arc<dyn VideoPlatform>,
        images: ImageUrlMapper,
    ) -> Self {
        Self {
            engine,
            platform,
            images,
        }
    }
}
