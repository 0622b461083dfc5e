//! Core Types - 공용 타입 정의

use crate::error::ResourceError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CacheHint - 캐시 유지 정책
// ============================================================================

/// How long an unreferenced resource survives before eviction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheHint {
    /// The resource stays in memory until the hint is changed to something else
    Forever,
    /// The resource is evicted as soon as nothing references it
    WhileReferenced,
    /// The resource stays cached for `minutes` sweep ticks of not being referenced
    Until { minutes: u32 },
}

impl CacheHint {
    pub fn until(minutes: u32) -> Self {
        CacheHint::Until { minutes }
    }

    /// 시간 제한이 있는 정책인지
    pub fn is_time_bounded(&self) -> bool {
        matches!(self, CacheHint::Until { .. })
    }
}

impl fmt::Display for CacheHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheHint::Forever => write!(f, "forever"),
            CacheHint::WhileReferenced => write!(f, "while-referenced"),
            CacheHint::Until { minutes } => write!(f, "until({} min)", minutes),
        }
    }
}

// ============================================================================
// ResourceState - 리소스 상태
// ============================================================================

/// The load state of a cached resource
///
/// It is a programming error to use a resource's backend while its state is
/// anything other than [`ResourceState::Ready`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Not usable yet, may still become `Ready` or `Failed`
    Pending,
    /// Usable, the backend can be read
    Ready,
    /// Loading failed; the error is kept for debugging
    Failed(ResourceError),
}

impl ResourceState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ResourceState::Ready)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResourceState::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResourceState::Failed(_))
    }

    pub fn error(&self) -> Option<&ResourceError> {
        match self {
            ResourceState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceState::Pending => write!(f, "pending"),
            ResourceState::Ready => write!(f, "ready"),
            ResourceState::Failed(error) => write!(f, "failed ({})", error),
        }
    }
}
