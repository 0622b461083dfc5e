//! Cache Entry - 키 하나에 대한 가변 레코드

use crate::kind::ResourceKind;
use chrono::{DateTime, Utc};
use gate_foundation::{CacheHint, ResourceError, ResourceState};
use std::rc::Rc;

/// Per-key cache record
///
/// `backend` is `Some` exactly when `state` is [`ResourceState::Ready`].
pub(crate) struct CacheEntry<K: ResourceKind> {
    pub backend: Option<Rc<K::Backend>>,
    pub state: ResourceState,
    pub reference_count: u32,
    pub cache_hint: Option<CacheHint>,
    pub default_cache_hint: CacheHint,
    /// 마지막 로드 시도 시각 (핫 리로드 비교 기준)
    pub last_loaded: DateTime<Utc>,
    pub minutes_dead: u32,
    /// 이 키의 로드가 진행 중 (키당 하나만)
    pub in_flight: bool,
    /// 백엔드가 교체될 때마다 증가 (wrapping)
    pub receipt: u8,
}

impl<K: ResourceKind> CacheEntry<K> {
    pub fn pending(default_cache_hint: CacheHint) -> Self {
        Self {
            backend: None,
            state: ResourceState::Pending,
            reference_count: 0,
            cache_hint: None,
            default_cache_hint,
            last_loaded: Utc::now(),
            minutes_dead: 0,
            in_flight: false,
            receipt: 0,
        }
    }

    pub fn ready(backend: K::Backend, default_cache_hint: CacheHint) -> Self {
        let mut entry = Self::pending(default_cache_hint);
        entry.backend = Some(Rc::new(backend));
        entry.state = ResourceState::Ready;
        entry
    }

    pub fn failed(error: ResourceError, default_cache_hint: CacheHint) -> Self {
        let mut entry = Self::pending(default_cache_hint);
        entry.state = ResourceState::Failed(error);
        entry
    }

    pub fn effective_cache_hint(&self) -> CacheHint {
        self.cache_hint.unwrap_or(self.default_cache_hint)
    }

    pub fn set_cache_hint(&mut self, hint: CacheHint) {
        self.cache_hint = Some(hint);
        self.minutes_dead = 0;
    }

    /// Swaps in a new backend and returns the previous one.
    pub fn publish(&mut self, backend: K::Backend) -> Option<Rc<K::Backend>> {
        let previous = self.backend.replace(Rc::new(backend));
        self.state = ResourceState::Ready;
        self.last_loaded = Utc::now();
        self.receipt = self.receipt.wrapping_add(1);
        previous
    }

    /// Marks the entry failed, dropping any backend it held.
    pub fn fail(&mut self, error: ResourceError) -> Option<Rc<K::Backend>> {
        self.state = ResourceState::Failed(error);
        self.last_loaded = Utc::now();
        self.backend.take()
    }

    pub fn is_referenced(&self) -> bool {
        self.reference_count > 0
    }
}
