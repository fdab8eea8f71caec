use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// One key per content collection or singleton. Mutating a collection
/// invalidates its key; readers between the invalidation and the next
/// fetch simply miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Hero,
    HeroSlides,
    ProcessSteps,
    WhyChooseUs,
    SiteSettings,
    Services,
    Projects,
    Testimonials,
    Partners,
    Pages,
    NavbarMenu,
    Users,
    Team,
    TeamCategories,
    Theme,
}

/// Keyed in-memory cache over the content backend. No TTL: entries live
/// until the key is invalidated by a mutation or the whole cache is
/// cleared on logout.
#[derive(Default)]
pub struct ContentCache {
    entries: RwLock<HashMap<CacheKey, Arc<dyn Any + Send + Sync>>>,
}

impl ContentCache {
    pub async fn get<T: Send + Sync + 'static>(&self, key: CacheKey) -> Option<Arc<T>> {
        let entries = self.entries.read().await;
        entries.get(&key).cloned()?.downcast::<T>().ok()
    }

    pub async fn put<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries
            .write()
            .await
            .insert(key, value.clone() as Arc<dyn Any + Send + Sync>);
        value
    }

    pub async fn invalidate(&self, key: CacheKey) {
        self.entries.write().await.remove(&key);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalidate_forces_a_miss() {
        let cache = ContentCache::default();
        cache.put(CacheKey::Services, vec!["web".to_string()]).await;
        assert!(cache.get::<Vec<String>>(CacheKey::Services).await.is_some());

        cache.invalidate(CacheKey::Services).await;
        assert!(cache.get::<Vec<String>>(CacheKey::Services).await.is_none());
    }

    #[tokio::test]
    async fn invalidation_is_per_key() {
        let cache = ContentCache::default();
        cache.put(CacheKey::Services, vec![1_i64]).await;
        cache.put(CacheKey::Projects, vec![2_i64]).await;

        cache.invalidate(CacheKey::Services).await;
        assert!(cache.get::<Vec<i64>>(CacheKey::Services).await.is_none());
        assert_eq!(
            cache.get::<Vec<i64>>(CacheKey::Projects).await.as_deref(),
            Some(&vec![2_i64])
        );
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = ContentCache::default();
        cache.put(CacheKey::Users, vec![1_i64]).await;
        cache.put(CacheKey::Theme, "dark".to_string()).await;

        cache.clear().await;
        assert!(cache.get::<Vec<i64>>(CacheKey::Users).await.is_none());
        assert!(cache.get::<String>(CacheKey::Theme).await.is_none());
    }

    #[tokio::test]
    async fn mismatched_type_reads_as_miss() {
        let cache = ContentCache::default();
        cache.put(CacheKey::Pages, vec![1_i64]).await;
        assert!(cache.get::<String>(CacheKey::Pages).await.is_none());
    }
}
