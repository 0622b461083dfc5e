//! Hot Reload - 파일 변경 감지
//!
//! 참조 중인 파일 리소스의 수정 시각이 마지막 로드보다 (초 단위로) 새로우면
//! 같은 키로 다시 로드한다. 엔트리는 그대로 두고 백엔드만 교체되므로 기존
//! 핸들이 새 내용을 보게 된다. 로드가 진행 중인 키는 결과가 반영될 때까지
//! 건너뛴다.

use super::ResourceManager;
use crate::cache::{CacheEntry, CacheKey};
use crate::kind::ResourceKind;
use gate_foundation::FileSystem;
use tracing::debug;

/// 엔트리를 다시 로드해야 하는지
#[cfg(feature = "hot-reload")]
pub(crate) fn needs_reload<K: ResourceKind>(
    key: &CacheKey<K::Options>,
    entry: &CacheEntry<K>,
    fs: &dyn FileSystem,
) -> bool {
    if key.is_generated() || !entry.is_referenced() || entry.in_flight {
        return false;
    }
    let path = key.requested_path();
    if !fs.item_exists(path) {
        return false;
    }
    match fs.attributes_of_item(path) {
        Ok(attributes) => attributes
            .changed_at()
            .is_some_and(|changed| changed.timestamp() > entry.last_loaded.timestamp()),
        Err(e) => {
            tracing::error!("Failed to read attributes of \"{}\": {}", path, e);
            false
        }
    }
}

#[cfg(not(feature = "hot-reload"))]
pub(crate) fn needs_reload<K: ResourceKind>(
    _key: &CacheKey<K::Options>,
    _entry: &CacheEntry<K>,
    _fs: &dyn FileSystem,
) -> bool {
    false
}

impl ResourceManager {
    /// 설정과 빌드 플래그 모두 켜져 있는지
    pub fn hot_reload_enabled(&self) -> bool {
        cfg!(feature = "hot-reload") && self.inner.config.hot_reload.enabled
    }

    /// Checks every table for changed files. Returns the number of reloads started.
    pub fn check_for_changes(&self) -> usize {
        let started = self.with_state(|state, inner| state.check_for_changes(&inner.dispatcher));
        if started > 0 {
            debug!("Hot reload started {} load(s)", started);
        }
        started
    }

    /// Reloads one entry if its file changed since it was last loaded.
    pub fn reload_if_needed<K: ResourceKind>(&self, key: &CacheKey<K::Options>) -> bool {
        self.with_state(|state, inner| {
            let Some((slot, loading)) = state.slot_with_loading::<K>() else {
                return false;
            };
            let Some(entry) = slot.table.get(key) else {
                return false;
            };
            if !needs_reload(key, entry, inner.dispatcher.file_system()) {
                return false;
            }
            debug!("Reloading {} {}: file changed", K::NAME, key);
            slot.dispatch(key, &inner.dispatcher, loading, false);
            true
        })
    }
}
