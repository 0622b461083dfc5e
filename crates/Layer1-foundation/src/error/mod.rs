//! Error types for Gate
//!
//! 모든 에러를 중앙에서 관리
//!
//! - [`ResourceError`]: 리소스 로드 실패 (캐시 엔트리의 `failed` 상태에 저장됨)
//! - [`Error`]: 설정 파일과 파일 속성 조회 에러

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// ResourceError
// ============================================================================

/// 리소스 로드 에러
///
/// Importer와 로드 파이프라인이 반환하는 에러 분류. 실패한 리소스의 상태에
/// 그대로 저장되므로 `Clone`/`PartialEq`를 구현한다.
///
/// The message exists for debugging only; do not compare against it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No importer matched the path, or the file does not exist
    #[error("Failed to locate: {0}")]
    FailedToLocate(String),

    /// The importer could not parse the file contents
    #[error("Failed to decode: {0}")]
    FailedToDecode(String),

    /// I/O failure while reading the resource
    #[error("Failed to load: {0}")]
    FailedToLoad(String),
}

impl ResourceError {
    pub fn failed_to_locate(message: impl Into<String>) -> Self {
        ResourceError::FailedToLocate(message.into())
    }

    pub fn failed_to_decode(message: impl Into<String>) -> Self {
        ResourceError::FailedToDecode(message.into())
    }

    pub fn failed_to_load(message: impl Into<String>) -> Self {
        ResourceError::FailedToLoad(message.into())
    }

    /// 사람이 읽을 수 있는 메시지
    pub fn message(&self) -> &str {
        match self {
            ResourceError::FailedToLocate(m)
            | ResourceError::FailedToDecode(m)
            | ResourceError::FailedToLoad(m) => m,
        }
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(e: serde_json::Error) -> Self {
        ResourceError::FailedToDecode(e.to_string())
    }
}

impl From<std::io::Error> for ResourceError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::FailedToLocate(e.to_string()),
            _ => ResourceError::FailedToLoad(e.to_string()),
        }
    }
}

// ============================================================================
// Error
// ============================================================================

/// Gate 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 리소스 관련
    // ========================================================================
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Not found: {0}")]
    NotFound(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
