//! Resource Manager - 캐시 컨텍스트
//!
//! 종류별 테이블, 임포터 목록, 로딩 추적, 이벤트를 소유하는 단일 스레드
//! 컨텍스트. 클론은 같은 캐시를 공유한다.
//!
//! - `builder.rs`: 설정, 파일 시스템, 런타임 주입
//! - `orchestrator.rs`: 백그라운드 로드 + 결과 반영
//! - `reference.rs`: 참조 카운트
//! - `eviction.rs`: 스윕, 게임 루프 타이머
//! - `hot_reload.rs`: 파일 변경 감지

mod builder;
mod eviction;
mod hot_reload;
mod orchestrator;
mod reference;

pub use builder::ResourceManagerBuilder;

pub(crate) use hot_reload::needs_reload;
pub(crate) use orchestrator::{Completion, Dispatcher};

use crate::cache::{CacheEntry, CacheKey, CacheState};
use crate::event::{EventSink, ResourceEvent};
use crate::handle::Resource;
use crate::importer::{Importer, ImporterType};
use crate::kind::ResourceKind;
use crate::stats::CacheStats;
use gate_foundation::{CacheHint, IdGenerator, ResourceConfig, ResourceError, ResourceState, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

/// The resource cache
///
/// All table mutation (reference counting, publishing loads, sweeps, hot
/// reload checks) happens on the thread that owns the manager; the manager
/// and its handles are deliberately `!Send`. Importers run on the tokio
/// runtime given to the builder and hand their results back through a
/// channel that [`pump`](Self::pump), [`next_completion`](Self::next_completion)
/// or [`settle`](Self::settle) drain.
#[derive(Clone)]
pub struct ResourceManager {
    inner: Rc<Inner>,
}

struct Inner {
    state: RefCell<CacheState>,
    completions: RefCell<mpsc::UnboundedReceiver<Completion>>,
    dispatcher: Dispatcher,
    events: EventSink,
    config: ResourceConfig,
    ids: IdGenerator,
    clock: Cell<Clock>,
}

/// `update()`에서 누적한 시간
#[derive(Debug, Clone, Copy, Default)]
struct Clock {
    since_sweep: Duration,
    since_poll: Duration,
}

fn default_cache_hint<K: ResourceKind>(config: &ResourceConfig) -> CacheHint {
    config
        .cache_hint_for(K::NAME)
        .unwrap_or_else(K::default_cache_hint)
}

impl ResourceManager {
    pub fn builder() -> ResourceManagerBuilder {
        ResourceManagerBuilder::new()
    }

    /// 기본 설정 + 현재 tokio 런타임
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    fn from_parts(
        config: ResourceConfig,
        dispatcher: Dispatcher,
        completions: mpsc::UnboundedReceiver<Completion>,
    ) -> Self {
        let events = EventSink::new(config.event_capacity);
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(CacheState::default()),
                completions: RefCell::new(completions),
                dispatcher,
                events,
                config,
                ids: IdGenerator::new(),
                clock: Cell::new(Clock::default()),
            }),
        }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.inner.config
    }

    /// 상태를 빌려서 작업하고, 빌림이 끝난 뒤 버려진 값들을 drop
    fn with_state<R>(&self, f: impl FnOnce(&mut CacheState, &Inner) -> R) -> R {
        let (result, garbage) = {
            let mut state = self.inner.state.borrow_mut();
            let result = f(&mut state, &self.inner);
            (result, std::mem::take(&mut state.garbage))
        };
        drop(garbage);
        result
    }

    fn read_state<R>(&self, f: impl FnOnce(&CacheState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    // ========================================================================
    // Handles
    // ========================================================================

    /// 파일 리소스 핸들. 처음 보는 키면 백그라운드 로드가 시작된다
    pub fn load<K: ResourceKind>(&self, path: impl Into<String>, options: K::Options) -> Resource<K> {
        let key = self.cache_key::<K>(path, options);
        self.increment_reference::<K>(&key);
        Resource::from_key(key, self.clone())
    }

    /// 메모리에서 만든 리소스 (기본 옵션)
    pub fn insert_generated<K: ResourceKind>(&self, raw: K::Raw) -> Resource<K> {
        self.insert_generated_with::<K>(raw, K::Options::default())
    }

    /// 메모리에서 만든 리소스. 즉시 `Ready`, 키는 `$<id>`
    pub fn insert_generated_with<K: ResourceKind>(&self, raw: K::Raw, options: K::Options) -> Resource<K> {
        let key = CacheKey::generated(self.inner.ids.generate_id(), options);
        self.with_state(|state, inner| {
            let (slot, _, _) = state.slot_or_insert::<K>(|| default_cache_hint::<K>(&inner.config));
            let backend = K::make_backend(raw, key.options());
            slot.table
                .insert(key.clone(), CacheEntry::ready(backend, K::generated_cache_hint()));
        });
        debug!("Inserted generated {} {}", K::NAME, key.requested_path());
        self.increment_reference::<K>(&key);
        Resource::from_key(key, self.clone())
    }

    /// Returns the key for `(path, options)`, creating a pending entry and
    /// dispatching its load on first sight. Takes no reference.
    pub fn cache_key<K: ResourceKind>(&self, path: impl Into<String>, options: K::Options) -> CacheKey<K::Options> {
        let key = CacheKey::new(path, options);
        self.with_state(|state, inner| {
            let (slot, loading, _) = state.slot_or_insert::<K>(|| default_cache_hint::<K>(&inner.config));
            if slot.table.contains_key(&key) {
                return;
            }

            if key.is_generated() {
                let error = ResourceError::failed_to_locate(format!(
                    "Generated {} \"{}\" does not exist",
                    K::NAME,
                    key.requested_path()
                ));
                warn!("{}", error);
                inner.events.emit(ResourceEvent::Failed {
                    kind: K::NAME,
                    path: key.requested_path().to_string(),
                    error: error.to_string(),
                });
                slot.table
                    .insert(key.clone(), CacheEntry::failed(error, K::generated_cache_hint()));
                return;
            }

            slot.table
                .insert(key.clone(), CacheEntry::pending(slot.default_cache_hint));
            slot.dispatch(&key, &inner.dispatcher, loading, true);
        });
        key
    }

    // ========================================================================
    // Entry Queries
    // ========================================================================

    pub fn contains<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> bool {
        self.read_state(|state| state.entry::<K>(key).is_some())
    }

    pub fn state<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<ResourceState> {
        self.read_state(|state| state.entry::<K>(key).map(|entry| entry.state.clone()))
    }

    pub fn reference_count<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<u32> {
        self.read_state(|state| state.entry::<K>(key).map(|entry| entry.reference_count))
    }

    pub fn effective_cache_hint<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<CacheHint> {
        self.read_state(|state| state.entry::<K>(key).map(|entry| entry.effective_cache_hint()))
    }

    pub fn receipt<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<u8> {
        self.read_state(|state| state.entry::<K>(key).map(|entry| entry.receipt))
    }

    /// 로드된 백엔드 (`Ready`일 때만)
    pub fn backend<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<Rc<K::Backend>> {
        self.read_state(|state| state.entry::<K>(key).and_then(|entry| entry.backend.clone()))
    }

    pub fn entry_count<K: ResourceKind>(&self) -> usize {
        self.read_state(|state| state.slot::<K>().map_or(0, |slot| slot.table.len()))
    }

    /// 캐시 정책 변경. `minutes_dead`도 초기화된다
    pub fn change_cache_hint<K: ResourceKind>(&self, hint: CacheHint, key: &CacheKey<K::Options>) -> bool {
        self.with_state(|state, _| match state.entry_mut::<K>(key) {
            Some(entry) => {
                entry.set_cache_hint(hint);
                debug!("Cache hint for {} {} set to {}", K::NAME, key, hint);
                true
            }
            None => false,
        })
    }

    /// Rebuilds the backend from a new raw value in place, bumping the receipt.
    pub fn replace_raw<K: ResourceKind>(&self, key: &CacheKey<K::Options>, raw: K::Raw) -> bool {
        self.with_state(|state, inner| {
            let Some(entry) = state.entry_mut::<K>(key) else {
                return false;
            };
            let previous = entry.publish(K::make_backend(raw, key.options()));
            inner.events.emit(ResourceEvent::Reloaded {
                kind: K::NAME,
                path: key.requested_path().to_string(),
                receipt: entry.receipt,
            });
            if let Some(previous) = previous {
                state.garbage.push(Box::new(previous));
            }
            true
        })
    }

    // ========================================================================
    // Importers
    // ========================================================================

    /// 임포터 등록. 기본은 맨 앞 (기본 임포터보다 우선)
    pub fn add_importer<K, I>(&self, at_end: bool) -> bool
    where
        K: ResourceKind,
        I: Importer<K> + Default,
    {
        self.with_state(|state, inner| {
            let (slot, _, _) = state.slot_or_insert::<K>(|| default_cache_hint::<K>(&inner.config));
            slot.importers.add(ImporterType::of::<I>(), at_end)
        })
    }

    pub fn importer_names<K: ResourceKind>(&self) -> Vec<&'static str> {
        self.with_state(|state, inner| {
            let (slot, _, _) = state.slot_or_insert::<K>(|| default_cache_hint::<K>(&inner.config));
            slot.importers.names()
        })
    }

    // ========================================================================
    // Completions
    // ========================================================================

    fn apply(&self, completion: Completion) {
        self.with_state(|state, inner| completion.apply(state, &inner.events));
    }

    /// 끝난 로드를 모두 반영 (블로킹 없음). 반영한 수 반환
    pub fn pump(&self) -> usize {
        let mut applied = 0;
        loop {
            let completion = match self.inner.completions.borrow_mut().try_recv() {
                Ok(completion) => completion,
                Err(_) => break,
            };
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// 다음 로드 완료를 기다려서 반영
    pub async fn next_completion(&self) -> bool {
        let completion =
            std::future::poll_fn(|cx| self.inner.completions.borrow_mut().poll_recv(cx)).await;
        match completion {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// 진행 중인 로드가 없을 때까지 반영
    pub async fn settle(&self) {
        while self.loading_count() > 0 {
            if !self.next_completion().await {
                break;
            }
        }
    }

    // ========================================================================
    // Progress / Events / Stats
    // ========================================================================

    /// 로딩 중인 경로 (UI 표시용)
    pub fn currently_loading(&self) -> HashSet<String> {
        self.read_state(|state| state.loading.paths())
    }

    pub fn is_loading(&self, path: &str) -> bool {
        self.read_state(|state| state.loading.contains(path))
    }

    pub fn loading_count(&self) -> usize {
        self.read_state(|state| state.loading.in_flight())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.inner.events.subscribe()
    }

    pub fn stats(&self) -> CacheStats {
        let kinds = self.read_state(|state| state.stats());
        CacheStats {
            kinds,
            loading: self.loading_count(),
            importer_instances: self.inner.dispatcher.importer_cache().len(),
        }
    }

    /// 테이블이 만들어진 리소스 종류 이름
    pub fn kinds(&self) -> Vec<&'static str> {
        self.read_state(|state| state.kind_names())
    }
}

impl fmt::Debug for ResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceManager")
            .field("kinds", &self.kinds())
            .field("loading", &self.loading_count())
            .finish()
    }
}
