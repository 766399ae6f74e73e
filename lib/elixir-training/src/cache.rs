use crate::config::StoreConfig;
use crate::error::BuildError;
use crate::service::QueryService;
use crate::store::DataStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

/// Lazily builds a [`DataStore`] and hands out services over the current snapshot.
///
/// The first call to [`StoreCache::service`] triggers the build. Callers arriving while the build
/// is running wait for it instead of starting another one. A [rebuild](StoreCache::rebuild)
/// replaces the snapshot atomically, services obtained earlier keep reading the old one.
///
/// Builds run in their own task, so a build whose caller is cancelled still publishes its
/// snapshot.
#[derive(Debug)]
pub struct StoreCache {
    config: Arc<StoreConfig>,
    published: Arc<Published>,
    /// Serializes builds. Held by the build task until the snapshot is published.
    build_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Default)]
struct Published {
    current: RwLock<Option<Arc<DataStore>>>,
    builds: AtomicUsize,
}

impl StoreCache {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: Arc::new(config),
            published: Arc::new(Published::default()),
            build_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns a service over the current snapshot, building it first if necessary.
    ///
    /// A failed build publishes nothing, the next call tries again.
    pub async fn service(&self) -> Result<QueryService, BuildError> {
        if let Some(store) = self.current().await {
            debug!("Serving cached data store");
            return Ok(QueryService::new(store));
        }

        let build = Arc::clone(&self.build_lock).lock_owned().await;
        // The build may have completed while waiting for the lock.
        if let Some(store) = self.current().await {
            debug!("Serving data store built by a concurrent caller");
            return Ok(QueryService::new(store));
        }
        let store = self.build(build).await?;
        info!(builds = self.build_count(), "Published data store");
        Ok(QueryService::new(store))
    }

    /// Builds a fresh snapshot from the sources and swaps it in.
    ///
    /// If the build fails, the previous snapshot stays in place.
    pub async fn rebuild(&self) -> Result<QueryService, BuildError> {
        let build = Arc::clone(&self.build_lock).lock_owned().await;
        let store = self.build(build).await?;
        info!(builds = self.build_count(), "Replaced data store");
        Ok(QueryService::new(store))
    }

    /// The current snapshot, if one has been built.
    pub async fn current(&self) -> Option<Arc<DataStore>> {
        self.published.current.read().await.clone()
    }

    /// Number of builds that completed successfully.
    pub fn build_count(&self) -> usize {
        self.published.builds.load(Ordering::Acquire)
    }

    /// Builds a snapshot on the blocking pool and publishes it.
    ///
    /// The build task owns `build` and releases it only after publishing.
    async fn build(&self, build: OwnedMutexGuard<()>) -> Result<Arc<DataStore>, BuildError> {
        let config = Arc::clone(&self.config);
        let published = Arc::clone(&self.published);
        let task = tokio::spawn(async move {
            let store = tokio::task::spawn_blocking(move || DataStore::load(&config)).await??;
            let store = Arc::new(store);
            *published.current.write().await = Some(Arc::clone(&store));
            published.builds.fetch_add(1, Ordering::AcqRel);
            drop(build);
            Ok::<_, BuildError>(store)
        });
        task.await?
    }
}
