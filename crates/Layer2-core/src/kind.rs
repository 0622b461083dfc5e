//! Resource Kind - 리소스 종류 정의
//!
//! 리소스 종류 하나당 캐시 테이블 하나, 임포터 목록 하나를 가진다.

use crate::importer::ImporterType;
use gate_foundation::CacheHint;
use std::fmt::Debug;
use std::hash::Hash;

/// One kind of cached resource (texture, geometry, tile map, ...)
///
/// The manager keeps a separate table and importer list per kind.
pub trait ResourceKind: Sized + 'static {
    /// 로그, 이벤트, 통계, 설정(`cacheHints`)에서 쓰는 이름
    const NAME: &'static str;

    /// Kind-specific import options; part of the cache key.
    type Options: Clone + Eq + Hash + Debug + Default + Send + Sync + 'static;

    /// Decoded value produced by importers off the coordinating thread.
    type Raw: Send + 'static;

    /// Ready-to-use representation stored in the cache entry.
    type Backend: 'static;

    /// Builds the backend from a decoded raw value.
    ///
    /// Runs on the coordinating thread when a load is published, so it must be
    /// cheap and must not fail.
    fn make_backend(raw: Self::Raw, options: &Self::Options) -> Self::Backend;

    /// Hint used for file-backed entries without an explicit hint
    fn default_cache_hint() -> CacheHint {
        CacheHint::until(5)
    }

    /// Hint used for generated (in-memory) entries
    fn generated_cache_hint() -> CacheHint {
        CacheHint::WhileReferenced
    }

    /// 기본 등록 임포터 (우선순위 순)
    fn builtin_importers() -> Vec<ImporterType<Self>> {
        Vec::new()
    }
}
