//! Reference Counting

use super::ResourceManager;
use crate::cache::CacheKey;
use crate::event::{EvictionReason, ResourceEvent};
use crate::kind::ResourceKind;
use gate_foundation::CacheHint;
use tracing::{debug, error};

impl ResourceManager {
    /// 핸들 생성/복제 시
    pub(crate) fn increment_reference<K: ResourceKind>(&self, key: &CacheKey<K::Options>) {
        self.with_state(|state, _| match state.entry_mut::<K>(key) {
            Some(entry) => {
                entry.reference_count += 1;
                entry.minutes_dead = 0;
            }
            None => error!("Cannot reference {} {}: not in cache", K::NAME, key),
        });
    }

    /// 핸들 drop 시. `WhileReferenced` 엔트리는 마지막 참조가 사라지면 바로 제거
    pub(crate) fn decrement_reference<K: ResourceKind>(&self, key: &CacheKey<K::Options>) {
        self.with_state(|state, inner| {
            let Some(slot) = state.slot_mut::<K>() else {
                error!("Cannot release {} {}: no {} table", K::NAME, key, K::NAME);
                return;
            };
            let Some(entry) = slot.table.get_mut(key) else {
                error!("Cannot release {} {}: not in cache", K::NAME, key);
                return;
            };
            if entry.reference_count == 0 {
                error!("Reference count underflow for {} {}", K::NAME, key);
                return;
            }

            entry.reference_count -= 1;
            if entry.reference_count > 0 || entry.effective_cache_hint() != CacheHint::WhileReferenced {
                return;
            }

            if let Some(entry) = slot.table.remove(key) {
                debug!("Removing {} {} from cache", K::NAME, key);
                inner.events.emit(ResourceEvent::Evicted {
                    kind: K::NAME,
                    path: key.requested_path().to_string(),
                    reason: EvictionReason::Unreferenced,
                });
                state.garbage.push(Box::new(entry));
            }
        });
    }
}
