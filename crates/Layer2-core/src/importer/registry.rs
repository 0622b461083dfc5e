//! Importer Registry - 종류별 임포터 목록
//!
//! 앞에서부터 `can_process_file`을 확인해서 처음 맞는 임포터를 사용한다.
//! 새로 등록한 임포터는 기본적으로 맨 앞에 들어가서 기본 임포터보다 우선한다.

use super::cache::ImporterCache;
use super::traits::{ImportSource, Importer};
use crate::kind::ResourceKind;
use futures::future::BoxFuture;
use gate_foundation::ResourceError;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type Instantiate<K> =
    fn(Arc<ImporterCache>, ImportSource) -> BoxFuture<'static, Result<Arc<dyn Importer<K>>, ResourceError>>;

// ============================================================================
// ImporterType - 등록 단위
// ============================================================================

/// A registered importer type for kind `K`
///
/// Holds no instance; instances are created (and cached) per path when a load
/// resolves to this type.
pub struct ImporterType<K: ResourceKind> {
    type_id: TypeId,
    name: &'static str,
    can_process: fn(&str) -> bool,
    instantiate: Instantiate<K>,
}

impl<K: ResourceKind> ImporterType<K> {
    pub fn of<I>() -> Self
    where
        I: Importer<K> + Default,
    {
        let full = std::any::type_name::<I>();
        Self {
            type_id: TypeId::of::<I>(),
            name: full.rsplit("::").next().unwrap_or(full),
            can_process: I::can_process_file,
            instantiate: instantiate::<K, I>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn can_process_file(&self, path: &str) -> bool {
        (self.can_process)(path)
    }

    /// 준비된 인스턴스 (캐시 재사용)
    pub async fn instantiate(
        &self,
        cache: Arc<ImporterCache>,
        source: ImportSource,
    ) -> Result<Arc<dyn Importer<K>>, ResourceError> {
        (self.instantiate)(cache, source).await
    }
}

fn instantiate<K, I>(
    cache: Arc<ImporterCache>,
    source: ImportSource,
) -> BoxFuture<'static, Result<Arc<dyn Importer<K>>, ResourceError>>
where
    K: ResourceKind,
    I: Importer<K> + Default,
{
    Box::pin(async move {
        let importer: Arc<I> = cache.get_or_prepare::<I>(&source).await?;
        Ok(importer as Arc<dyn Importer<K>>)
    })
}

impl<K: ResourceKind> Clone for ImporterType<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ResourceKind> Copy for ImporterType<K> {}

impl<K: ResourceKind> fmt::Debug for ImporterType<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImporterType")
            .field("kind", &K::NAME)
            .field("name", &self.name)
            .finish()
    }
}

// ============================================================================
// ImporterRegistry - 우선순위 목록
// ============================================================================

/// Ordered importer list for one kind
pub struct ImporterRegistry<K: ResourceKind> {
    types: Vec<ImporterType<K>>,
}

impl<K: ResourceKind> ImporterRegistry<K> {
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// 기본 임포터가 등록된 목록
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for importer in K::builtin_importers() {
            registry.add(importer, true);
        }
        registry
    }

    /// 임포터 추가. 이미 등록된 타입이면 무시하고 `false` 반환
    pub fn add(&mut self, importer: ImporterType<K>, at_end: bool) -> bool {
        if self.contains(importer.type_id) {
            return false;
        }
        debug!(
            "Registered {} importer {} ({})",
            K::NAME,
            importer.name,
            if at_end { "last" } else { "first" }
        );
        if at_end {
            self.types.push(importer);
        } else {
            self.types.insert(0, importer);
        }
        true
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.iter().any(|t| t.type_id == type_id)
    }

    /// 경로를 처리할 첫 번째 임포터
    pub fn resolve(&self, path: &str) -> Option<ImporterType<K>> {
        resolve(&self.types, path)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.name).collect()
    }

    /// 백그라운드 로드에 넘길 복사본
    pub fn snapshot(&self) -> Vec<ImporterType<K>> {
        self.types.clone()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: ResourceKind> Default for ImporterRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// 목록 순서대로 확인
pub(crate) fn resolve<K: ResourceKind>(
    types: &[ImporterType<K>],
    path: &str,
) -> Option<ImporterType<K>> {
    types.iter().find(|t| t.can_process_file(path)).copied()
}
