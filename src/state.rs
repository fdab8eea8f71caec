use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::cache::{CacheKey, ContentCache};
use crate::carousel::{CarouselController, AUTO_ADVANCE_INTERVAL};
use crate::config::AppConfig;
use crate::session::Session;
use crate::status::StatusBanner;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub cache: Arc<ContentCache>,
    pub session: Arc<Session>,
    pub carousel: Arc<CarouselController>,
    pub banner: Arc<StatusBanner>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let api = ApiClient::new(&config)?;
        let cache = Arc::new(ContentCache::default());
        let session = Arc::new(Session::new(api.clone(), cache.clone()));
        let carousel = Arc::new(CarouselController::new(AUTO_ADVANCE_INTERVAL));
        let banner = Arc::new(StatusBanner::default());
        Ok(Self {
            config,
            api,
            cache,
            session,
            carousel,
            banner,
        })
    }

    /// Read through the cache; a miss fetches and populates, a fetch error
    /// degrades to `None` after a warning.
    pub async fn cached<T, Fut>(&self, key: CacheKey, fetch: Fut) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache.get::<T>(key).await {
            return Some(hit);
        }
        match fetch.await {
            Ok(value) => Some(self.cache.put(key, value).await),
            Err(err) => {
                log::warn!("content read degraded: {err}");
                None
            }
        }
    }

    /// Same as [`AppState::cached`] for list collections, handing back an
    /// owned (possibly empty) vector for rendering.
    pub async fn cached_list<T, Fut>(&self, key: CacheKey, fetch: Fut) -> Vec<T>
    where
        T: Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        self.cached(key, fetch)
            .await
            .map(|list| (*list).clone())
            .unwrap_or_default()
    }
}
