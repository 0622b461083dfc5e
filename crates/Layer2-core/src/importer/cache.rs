//! Importer Instance Cache
//!
//! 같은 파일을 여러 종류가 읽을 때 한 번만 파싱하도록 준비된 임포터를
//! (임포터 타입, 경로) 기준으로 보관한다. 준비 이후 파일이 바뀌었으면 새로
//! 준비한다.

use super::traits::{ImportSource, ResourceImporter};
use chrono::{DateTime, Utc};
use gate_foundation::ResourceError;
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

type Instance = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceCell<Prepared>>;

/// 준비된 인스턴스 + 준비 시점의 파일 변경 시각
struct Prepared {
    instance: Instance,
    changed_at: Option<DateTime<Utc>>,
}

/// Prepared importer instances keyed by (importer type, path)
///
/// Concurrent requests for the same key wait on one `prepare` call. A failed
/// `prepare` leaves the slot empty so the next request tries again. An
/// instance prepared before the file's latest change is replaced.
#[derive(Default)]
pub struct ImporterCache {
    slots: Mutex<HashMap<(TypeId, String), Slot>>,
}

impl ImporterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 캐시된 인스턴스를 반환하거나 새로 만들어 `prepare` 한다
    pub async fn get_or_prepare<I>(&self, source: &ImportSource) -> Result<Arc<I>, ResourceError>
    where
        I: ResourceImporter + Default,
    {
        let path = source.path();
        let changed_at = source
            .file_system()
            .attributes_of_item(path)
            .ok()
            .and_then(|attributes| attributes.changed_at());

        let slot = {
            let mut slots = self.slots.lock();
            let slot = slots.entry((TypeId::of::<I>(), path.to_string())).or_default();
            let outdated = slot
                .get()
                .is_some_and(|prepared| prepared.changed_at < changed_at);
            if outdated {
                debug!("Prepared importer for \"{}\" is older than the file", path);
                *slot = Slot::default();
            }
            slot.clone()
        };

        let prepared = slot
            .get_or_try_init(|| async {
                let mut importer = I::default();
                importer.prepare(source).await?;
                Ok::<Prepared, ResourceError>(Prepared {
                    instance: Arc::new(importer),
                    changed_at,
                })
            })
            .await?;

        Arc::clone(&prepared.instance).downcast::<I>().map_err(|_| {
            ResourceError::failed_to_load(format!(
                "Importer cache slot for \"{}\" holds a different type",
                source.path()
            ))
        })
    }

    /// 경로 하나의 인스턴스 제거 (핫 리로드 시)
    pub fn invalidate(&self, path: &str) {
        self.slots.lock().retain(|(_, cached), _| cached != path);
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ImporterCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterCache")
            .field("instances", &self.len())
            .finish()
    }
}
