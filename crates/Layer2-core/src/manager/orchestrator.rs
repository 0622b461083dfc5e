//! Load Orchestrator
//!
//! 임포터 호출은 백그라운드 태스크에서, 결과 반영은 코디네이터 스레드에서.
//!
//! ```text
//! coordinator                      tokio runtime
//! ───────────                      ─────────────
//! dispatch() ──── spawn ─────────▶ resolve importer
//!                                  prepare (cached per path)
//!                                  load(options)
//! pump() ◀──── Completion ──────── send
//!   └─ publish(): entry.ready / entry.failed / discard
//! ```

use crate::cache::{CacheKey, CacheState};
use crate::event::{EventSink, ResourceEvent};
use crate::importer::{resolve, ImportSource, ImporterCache, ImporterType};
use crate::kind::ResourceKind;
use futures::FutureExt;
use gate_foundation::{FileSystem, ResourceError};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

type Outcome<K> = Result<Result<<K as ResourceKind>::Raw, ResourceError>, Box<dyn Any + Send>>;

// ============================================================================
// Completion - 코디네이터로 돌아오는 결과
// ============================================================================

/// A finished background load, applied on the coordinating thread
pub(crate) struct Completion {
    apply: Box<dyn FnOnce(&mut CacheState, &EventSink) + Send>,
}

impl Completion {
    fn new<K: ResourceKind>(key: CacheKey<K::Options>, outcome: Outcome<K>, is_first_load: bool) -> Self {
        Self {
            apply: Box::new(move |state, events| publish::<K>(state, events, key, outcome, is_first_load)),
        }
    }

    pub fn apply(self, state: &mut CacheState, events: &EventSink) {
        (self.apply)(state, events)
    }
}

// ============================================================================
// Dispatcher - 백그라운드 로드 시작
// ============================================================================

/// Spawns importer work on the runtime and routes results back
pub(crate) struct Dispatcher {
    runtime: Handle,
    sender: mpsc::UnboundedSender<Completion>,
    fs: Arc<dyn FileSystem>,
    importer_cache: Arc<ImporterCache>,
}

impl Dispatcher {
    pub fn new(
        runtime: Handle,
        sender: mpsc::UnboundedSender<Completion>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            runtime,
            sender,
            fs,
            importer_cache: Arc::new(ImporterCache::new()),
        }
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn importer_cache(&self) -> &ImporterCache {
        &self.importer_cache
    }

    pub fn dispatch<K: ResourceKind>(
        &self,
        key: CacheKey<K::Options>,
        importers: Vec<ImporterType<K>>,
        is_first_load: bool,
    ) {
        let request = key.clone();
        let fs = Arc::clone(&self.fs);
        let cache = Arc::clone(&self.importer_cache);
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            let outcome = AssertUnwindSafe(import::<K>(request, importers, cache, fs))
                .catch_unwind()
                .await;
            if sender.send(Completion::new::<K>(key, outcome, is_first_load)).is_err() {
                debug!("Resource manager was dropped before a {} load finished", K::NAME);
            }
        });
    }
}

/// 백그라운드: 임포터를 찾아서 Raw 리소스를 만든다
async fn import<K: ResourceKind>(
    key: CacheKey<K::Options>,
    importers: Vec<ImporterType<K>>,
    cache: Arc<ImporterCache>,
    fs: Arc<dyn FileSystem>,
) -> Result<K::Raw, ResourceError> {
    let path = key.requested_path();
    let importer_type = resolve(&importers, path).ok_or_else(|| {
        ResourceError::failed_to_locate(format!(
            "No {} importer could be found for \"{}\"",
            K::NAME,
            path
        ))
    })?;
    let importer = importer_type
        .instantiate(cache, ImportSource::new(path, fs))
        .await?;
    importer.load(key.options()).await
}

/// 코디네이터: 결과를 엔트리에 반영
fn publish<K: ResourceKind>(
    state: &mut CacheState,
    events: &EventSink,
    key: CacheKey<K::Options>,
    outcome: Outcome<K>,
    is_first_load: bool,
) {
    state.loading.remove(key.requested_path());

    let result = match outcome {
        Ok(result) => result,
        Err(panic) => {
            error!("Importer panicked while loading {} {}", K::NAME, key);
            std::panic::resume_unwind(panic)
        }
    };

    let Some(entry) = state.entry_mut::<K>(&key) else {
        warn!(
            "Resource \"{}\" was deallocated before being {}.",
            key,
            if is_first_load { "loaded" } else { "re-loaded" }
        );
        events.emit(ResourceEvent::Discarded {
            kind: K::NAME,
            path: key.requested_path().to_string(),
        });
        return;
    };
    entry.in_flight = false;

    let path = key.requested_path().to_string();
    let previous = match result {
        Ok(raw) => {
            let previous = entry.publish(K::make_backend(raw, key.options()));
            let receipt = entry.receipt;
            if is_first_load {
                info!("Loaded {} {}", K::NAME, key);
                events.emit(ResourceEvent::Loaded { kind: K::NAME, path, receipt });
            } else {
                info!("Reloaded {} {}", K::NAME, key);
                events.emit(ResourceEvent::Reloaded { kind: K::NAME, path, receipt });
            }
            previous
        }
        Err(error) => {
            warn!(
                "Failed to {} {} {}: {}",
                if is_first_load { "load" } else { "re-load" },
                K::NAME,
                key,
                error
            );
            events.emit(ResourceEvent::Failed {
                kind: K::NAME,
                path,
                error: error.to_string(),
            });
            entry.fail(error)
        }
    };

    if let Some(previous) = previous {
        state.garbage.push(Box::new(previous));
    }
}
