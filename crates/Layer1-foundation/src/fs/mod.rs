//! Filesystem - 리소스 파일 접근
//!
//! 캐시는 파일 시스템을 직접 건드리지 않고 [`FileSystem`] trait을 통해서만 접근한다.
//!
//! - [`NativeFileSystem`]: 검색 경로 기반 실제 파일 시스템
//! - [`MemoryFileSystem`]: 메모리 파일 (테스트, 툴링)

mod memory;
mod native;

pub use memory::MemoryFileSystem;
pub use native::NativeFileSystem;

use crate::error::ResourceError;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 파일 속성
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileAttributes {
    pub modification_date: Option<DateTime<Utc>>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl FileAttributes {
    /// 마지막 변경 시각 (수정 시각, 없으면 생성 시각)
    pub fn changed_at(&self) -> Option<DateTime<Utc>> {
        self.modification_date.or(self.creation_date)
    }
}

/// Platform filesystem collaborator
///
/// `item_exists`/`attributes_of_item` are synchronous and only used by the
/// hot-reload checker; `read` is what importers use to fetch file contents.
#[async_trait]
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// 요청 경로가 실제 파일로 해석되는지
    fn item_exists(&self, path: &str) -> bool;

    /// 파일 속성 조회
    fn attributes_of_item(&self, path: &str) -> Result<FileAttributes>;

    /// 파일 전체 읽기
    async fn read(&self, path: &str) -> std::result::Result<Vec<u8>, ResourceError>;
}
