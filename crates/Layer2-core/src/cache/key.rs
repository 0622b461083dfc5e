//! Cache Key - 리소스 식별자

use std::fmt;

/// 생성 리소스 경로의 접두 문자
pub const GENERATED_PREFIX: char = '$';

/// Identity of a requested resource
///
/// Two requests with the same path and options share one cache entry. Paths
/// starting with [`GENERATED_PREFIX`] name in-memory resources; those are never
/// hot-reloaded and never go through importer lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey<O> {
    requested_path: String,
    options: O,
}

impl<O> CacheKey<O> {
    pub fn new(requested_path: impl Into<String>, options: O) -> Self {
        Self {
            requested_path: requested_path.into(),
            options,
        }
    }

    /// 생성 리소스 키 (`$<id>`)
    pub fn generated(id: u64, options: O) -> Self {
        Self::new(format!("{}{}", GENERATED_PREFIX, id), options)
    }

    pub fn requested_path(&self) -> &str {
        &self.requested_path
    }

    pub fn options(&self) -> &O {
        &self.options
    }

    pub fn is_generated(&self) -> bool {
        self.requested_path.starts_with(GENERATED_PREFIX)
    }
}

impl<O> fmt::Display for CacheKey<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_generated() {
            write!(f, "(Generated)")
        } else {
            write!(f, "{}", self.requested_path)
        }
    }
}
