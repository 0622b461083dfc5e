//! Cache Tables
//!
//! 종류마다 `KindSlot<K>` 하나 (테이블 + 임포터 목록). 스윕, 핫 리로드, 통계는
//! 종류를 모른 채 `ErasedSlot`을 통해 모든 슬롯을 순회한다.

use super::entry::CacheEntry;
use super::key::CacheKey;
use crate::event::{EventSink, EvictionReason, ResourceEvent};
use crate::importer::ImporterRegistry;
use crate::kind::ResourceKind;
use crate::manager::{needs_reload, Dispatcher};
use crate::stats::KindStats;
use gate_foundation::{CacheHint, ResourceState};
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 빌림이 끝난 뒤에 drop할 값들 (백엔드 drop이 매니저를 다시 부를 수 있음)
pub(crate) type Garbage = Vec<Box<dyn Any>>;

// ============================================================================
// LoadingTracker - 로딩 중인 경로
// ============================================================================

/// Multiset of paths with a load in flight
#[derive(Debug, Default)]
pub(crate) struct LoadingTracker {
    paths: HashMap<String, usize>,
}

impl LoadingTracker {
    pub fn insert(&mut self, path: &str) {
        *self.paths.entry(path.to_string()).or_insert(0) += 1;
    }

    pub fn remove(&mut self, path: &str) {
        if let Some(count) = self.paths.get_mut(path) {
            *count -= 1;
            if *count == 0 {
                self.paths.remove(path);
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn paths(&self) -> HashSet<String> {
        self.paths.keys().cloned().collect()
    }

    /// 진행 중인 로드 수 (같은 경로의 중복 로드 포함)
    pub fn in_flight(&self) -> usize {
        self.paths.values().sum()
    }
}

// ============================================================================
// KindSlot - 종류 하나의 테이블
// ============================================================================

pub(crate) struct KindSlot<K: ResourceKind> {
    pub table: HashMap<CacheKey<K::Options>, CacheEntry<K>>,
    pub importers: ImporterRegistry<K>,
    pub default_cache_hint: CacheHint,
}

impl<K: ResourceKind> KindSlot<K> {
    pub fn new(default_cache_hint: CacheHint) -> Self {
        Self {
            table: HashMap::new(),
            importers: ImporterRegistry::with_builtins(),
            default_cache_hint,
        }
    }

    /// 로드 오케스트레이터 시작
    pub fn dispatch(
        &mut self,
        key: &CacheKey<K::Options>,
        dispatcher: &Dispatcher,
        loading: &mut LoadingTracker,
        is_first_load: bool,
    ) {
        if let Some(entry) = self.table.get_mut(key) {
            entry.in_flight = true;
        }
        loading.insert(key.requested_path());
        if !is_first_load {
            dispatcher.importer_cache().invalidate(key.requested_path());
        }
        dispatcher.dispatch::<K>(key.clone(), self.importers.snapshot(), is_first_load);
    }
}

// ============================================================================
// ErasedSlot - 종류를 지운 슬롯 인터페이스
// ============================================================================

pub(crate) trait ErasedSlot {
    fn kind_name(&self) -> &'static str;

    /// 스윕 한 번. 제거된 엔트리 수 반환
    fn sweep(&mut self, garbage: &mut Garbage, events: &EventSink) -> usize;

    /// 변경된 파일의 리로드 시작. 시작한 리로드 수 반환
    fn check_for_changes(&mut self, dispatcher: &Dispatcher, loading: &mut LoadingTracker) -> usize;

    fn stats(&self) -> KindStats;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: ResourceKind> ErasedSlot for KindSlot<K> {
    fn kind_name(&self) -> &'static str {
        K::NAME
    }

    fn sweep(&mut self, garbage: &mut Garbage, events: &EventSink) -> usize {
        let mut expired = Vec::new();
        for (key, entry) in self.table.iter_mut() {
            if entry.is_referenced() {
                entry.minutes_dead = 0;
                continue;
            }
            match entry.effective_cache_hint() {
                CacheHint::Forever => {}
                // hint changed after the last handle went away
                CacheHint::WhileReferenced => expired.push((key.clone(), EvictionReason::Unreferenced)),
                CacheHint::Until { minutes } => {
                    entry.minutes_dead += 1;
                    if entry.minutes_dead >= minutes {
                        expired.push((key.clone(), EvictionReason::Expired));
                    }
                }
            }
        }

        let removed = expired.len();
        for (key, reason) in expired {
            if let Some(entry) = self.table.remove(&key) {
                debug!("Removing {} {} from cache", K::NAME, key);
                events.emit(ResourceEvent::Evicted {
                    kind: K::NAME,
                    path: key.requested_path().to_string(),
                    reason,
                });
                garbage.push(Box::new(entry));
            }
        }
        removed
    }

    fn check_for_changes(&mut self, dispatcher: &Dispatcher, loading: &mut LoadingTracker) -> usize {
        let stale: Vec<CacheKey<K::Options>> = self
            .table
            .iter()
            .filter(|(key, entry)| needs_reload(key, entry, dispatcher.file_system()))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            debug!("Reloading {} {}: file changed", K::NAME, key);
            self.dispatch(key, dispatcher, loading, false);
        }
        stale.len()
    }

    fn stats(&self) -> KindStats {
        let mut stats = KindStats {
            kind: K::NAME,
            entries: self.table.len(),
            importers: self.importers.len(),
            ..Default::default()
        };
        for entry in self.table.values() {
            match entry.state {
                ResourceState::Pending => stats.pending += 1,
                ResourceState::Ready => stats.ready += 1,
                ResourceState::Failed(_) => stats.failed += 1,
            }
            stats.references += u64::from(entry.reference_count);
            if !entry.is_referenced() {
                stats.unreferenced += 1;
            }
        }
        stats
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ============================================================================
// CacheState - 코디네이터 소유 상태
// ============================================================================

/// Everything mutated on the coordinating thread
#[derive(Default)]
pub(crate) struct CacheState {
    slots: HashMap<TypeId, Box<dyn ErasedSlot>>,
    pub loading: LoadingTracker,
    pub garbage: Garbage,
}

impl CacheState {
    pub fn slot<K: ResourceKind>(&self) -> Option<&KindSlot<K>> {
        self.slots
            .get(&TypeId::of::<K>())
            .and_then(|slot| slot.as_any().downcast_ref())
    }

    pub fn slot_mut<K: ResourceKind>(&mut self) -> Option<&mut KindSlot<K>> {
        self.slots
            .get_mut(&TypeId::of::<K>())
            .and_then(|slot| slot.as_any_mut().downcast_mut())
    }

    /// 슬롯과 로딩 추적기를 함께 빌린다
    pub fn slot_with_loading<K: ResourceKind>(
        &mut self,
    ) -> Option<(&mut KindSlot<K>, &mut LoadingTracker)> {
        let slot = self
            .slots
            .get_mut(&TypeId::of::<K>())
            .and_then(|slot| slot.as_any_mut().downcast_mut::<KindSlot<K>>())?;
        Some((slot, &mut self.loading))
    }

    /// 슬롯을 (없으면 만들어서) 반환하고, 로딩 추적기도 함께 빌려준다
    pub fn slot_or_insert<K: ResourceKind>(
        &mut self,
        default_cache_hint: impl FnOnce() -> CacheHint,
    ) -> (&mut KindSlot<K>, &mut LoadingTracker, &mut Garbage) {
        let slot = self
            .slots
            .entry(TypeId::of::<K>())
            .or_insert_with(|| Box::new(KindSlot::<K>::new(default_cache_hint())));
        match slot.as_any_mut().downcast_mut::<KindSlot<K>>() {
            Some(slot) => (slot, &mut self.loading, &mut self.garbage),
            None => unreachable!("{} slot registered under a foreign type", K::NAME),
        }
    }

    pub fn entry<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> Option<&CacheEntry<K>> {
        self.slot::<K>()?.table.get(key)
    }

    pub fn entry_mut<K: ResourceKind>(
        &mut self,
        key: &CacheKey<K::Options>,
    ) -> Option<&mut CacheEntry<K>> {
        self.slot_mut::<K>()?.table.get_mut(key)
    }

    pub fn sweep(&mut self, events: &EventSink) -> usize {
        let garbage = &mut self.garbage;
        self.slots
            .values_mut()
            .map(|slot| slot.sweep(garbage, events))
            .sum()
    }

    pub fn check_for_changes(&mut self, dispatcher: &Dispatcher) -> usize {
        let loading = &mut self.loading;
        self.slots
            .values_mut()
            .map(|slot| slot.check_for_changes(dispatcher, loading))
            .sum()
    }

    pub fn stats(&self) -> Vec<KindStats> {
        let mut kinds: Vec<KindStats> = self.slots.values().map(|slot| slot.stats()).collect();
        kinds.sort_by(|a, b| a.kind.cmp(b.kind));
        kinds
    }

    pub fn kind_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.values().map(|slot| slot.kind_name()).collect();
        names.sort_unstable();
        names
    }
}
