//! Resource Events - 캐시 상태 변경 알림
//!
//! `ResourceManager::subscribe()`로 받는다. 진행 표시, 텔레메트리, CLI 출력용이며
//! 캐시 불변식에는 관여하지 않는다.

use serde::Serialize;
use std::fmt;
use tokio::sync::broadcast;

/// 엔트리가 테이블에서 제거된 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EvictionReason {
    /// `WhileReferenced` 엔트리의 마지막 핸들이 사라짐
    Unreferenced,
    /// `Until` 정책의 시간이 다 됨
    Expired,
}

/// 리소스 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResourceEvent {
    /// 첫 로드 완료
    Loaded {
        kind: &'static str,
        path: String,
        receipt: u8,
    },

    /// 핫 리로드 또는 in-place 교체 완료
    Reloaded {
        kind: &'static str,
        path: String,
        receipt: u8,
    },

    /// 로드 실패
    Failed {
        kind: &'static str,
        path: String,
        error: String,
    },

    /// 캐시에서 제거됨
    Evicted {
        kind: &'static str,
        path: String,
        reason: EvictionReason,
    },

    /// 로드 완료 전에 엔트리가 제거되어 결과를 버림
    Discarded { kind: &'static str, path: String },
}

impl ResourceEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Loaded { kind, .. }
            | Self::Reloaded { kind, .. }
            | Self::Failed { kind, .. }
            | Self::Evicted { kind, .. }
            | Self::Discarded { kind, .. } => kind,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Loaded { path, .. }
            | Self::Reloaded { path, .. }
            | Self::Failed { path, .. }
            | Self::Evicted { path, .. }
            | Self::Discarded { path, .. } => path,
        }
    }
}

impl fmt::Display for ResourceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { kind, path, .. } => write!(f, "loaded {} \"{}\"", kind, path),
            Self::Reloaded { kind, path, receipt } => {
                write!(f, "reloaded {} \"{}\" (receipt {})", kind, path, receipt)
            }
            Self::Failed { kind, path, error } => {
                write!(f, "failed {} \"{}\": {}", kind, path, error)
            }
            Self::Evicted { kind, path, reason } => {
                write!(f, "evicted {} \"{}\" ({:?})", kind, path, reason)
            }
            Self::Discarded { kind, path } => write!(f, "discarded {} \"{}\"", kind, path),
        }
    }
}

/// 이벤트 발행기 (구독자가 없으면 조용히 버림)
#[derive(Debug, Clone)]
pub(crate) struct EventSink {
    sender: broadcast::Sender<ResourceEvent>,
}

impl EventSink {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn emit(&self, event: ResourceEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.sender.subscribe()
    }
}
