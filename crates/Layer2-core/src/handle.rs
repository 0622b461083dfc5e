//! Resource Handle
//!
//! 핸들 하나 = 참조 카운트 하나. 생성/`Clone` 시 증가, `Drop` 시 감소.

use crate::cache::CacheKey;
use crate::kind::ResourceKind;
use crate::manager::ResourceManager;
use gate_foundation::{CacheHint, ResourceError, ResourceState};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Reference-counted front end for one cache entry
///
/// Handles with equal keys are interchangeable. The backend is only
/// available once [`state`](Self::state) is `Ready`; until then
/// [`backend`](Self::backend) returns `None`.
pub struct Resource<K: ResourceKind> {
    key: CacheKey<K::Options>,
    manager: ResourceManager,
}

impl<K: ResourceKind> Resource<K> {
    /// 참조는 호출 측에서 이미 증가시킨 상태
    pub(crate) fn from_key(key: CacheKey<K::Options>, manager: ResourceManager) -> Self {
        Self { key, manager }
    }

    pub fn key(&self) -> &CacheKey<K::Options> {
        &self.key
    }

    pub fn path(&self) -> &str {
        self.key.requested_path()
    }

    pub fn options(&self) -> &K::Options {
        self.key.options()
    }

    pub fn is_generated(&self) -> bool {
        self.key.is_generated()
    }

    pub fn manager(&self) -> &ResourceManager {
        &self.manager
    }

    pub fn state(&self) -> ResourceState {
        self.manager.state::<K>(&self.key).unwrap_or_else(|| {
            ResourceState::Failed(ResourceError::failed_to_locate(format!(
                "{} \"{}\" is no longer cached",
                K::NAME,
                self.key
            )))
        })
    }

    pub fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    pub fn backend(&self) -> Option<Rc<K::Backend>> {
        self.manager.backend::<K>(&self.key)
    }

    /// 백엔드가 교체될 때마다 바뀌는 값
    pub fn receipt(&self) -> u8 {
        self.manager.receipt::<K>(&self.key).unwrap_or(0)
    }

    pub fn cache_hint(&self) -> CacheHint {
        self.manager
            .effective_cache_hint::<K>(&self.key)
            .unwrap_or_else(K::default_cache_hint)
    }

    pub fn set_cache_hint(&self, hint: CacheHint) {
        self.manager.change_cache_hint::<K>(hint, &self.key);
    }

    pub fn reload_if_needed(&self) -> bool {
        self.manager.reload_if_needed::<K>(&self.key)
    }

    /// 새 Raw 값으로 백엔드를 교체 (receipt 증가)
    pub fn replace_raw(&self, raw: K::Raw) {
        self.manager.replace_raw::<K>(&self.key, raw);
    }
}

impl<K: ResourceKind> Clone for Resource<K> {
    fn clone(&self) -> Self {
        self.manager.increment_reference::<K>(&self.key);
        Self::from_key(self.key.clone(), self.manager.clone())
    }
}

impl<K: ResourceKind> Drop for Resource<K> {
    fn drop(&mut self) {
        self.manager.decrement_reference::<K>(&self.key);
    }
}

impl<K: ResourceKind> PartialEq for Resource<K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: ResourceKind> Eq for Resource<K> {}

impl<K: ResourceKind> Hash for Resource<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<K: ResourceKind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::NAME)
            .field("path", &self.key.requested_path())
            .field("options", self.key.options())
            .finish()
    }
}
