//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{CachePolicy, RedirectService, ShortenService};
use crate::domain::entities::BaseUrl;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn UrlRepository>>,
    pub redirect_service: Arc<RedirectService<dyn UrlRepository>>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Deadlines also applied to the health probes.
    pub policy: CachePolicy,
}

impl AppState {
    /// Wires both services to the same store and cache.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        base_url: BaseUrl,
        policy: CachePolicy,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(
            repository.clone(),
            base_url,
            policy.store_timeout,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            repository.clone(),
            cache.clone(),
            policy,
        ));

        Self {
            shorten_service,
            redirect_service,
            repository,
            cache,
            policy,
        }
    }
}
