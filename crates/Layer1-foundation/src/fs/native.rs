//! Native filesystem

use super::{FileAttributes, FileSystem};
use crate::error::ResourceError;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// 검색 경로 기반 파일 시스템
///
/// 요청 경로가 절대 경로면 그대로, 아니면 검색 경로를 순서대로 붙여서
/// 처음 존재하는 파일을 사용한다. 검색 경로가 비어 있으면 현재 디렉토리 기준.
#[derive(Debug, Clone, Default)]
pub struct NativeFileSystem {
    search_paths: Vec<PathBuf>,
}

impl NativeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// 요청 경로를 실제 파일 경로로 해석
    pub fn locate(&self, path: &str) -> Option<PathBuf> {
        let requested = Path::new(path);
        if requested.is_absolute() || self.search_paths.is_empty() {
            return requested.is_file().then(|| requested.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|root| root.join(requested))
            .find(|candidate| candidate.is_file())
    }
}

#[async_trait]
impl FileSystem for NativeFileSystem {
    fn item_exists(&self, path: &str) -> bool {
        self.locate(path).is_some()
    }

    fn attributes_of_item(&self, path: &str) -> Result<FileAttributes> {
        let resolved = self
            .locate(path)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;
        let metadata = std::fs::metadata(&resolved)?;
        Ok(FileAttributes {
            modification_date: metadata.modified().ok().map(DateTime::<Utc>::from),
            creation_date: metadata.created().ok().map(DateTime::<Utc>::from),
        })
    }

    async fn read(&self, path: &str) -> std::result::Result<Vec<u8>, ResourceError> {
        let resolved = self
            .locate(path)
            .ok_or_else(|| ResourceError::failed_to_locate(format!("No file at \"{}\"", path)))?;
        Ok(tokio::fs::read(&resolved).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_in_search_paths() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("brick.png"), b"png").unwrap();

        let fs = NativeFileSystem::with_search_paths(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(fs.locate("brick.png"), Some(second.path().join("brick.png")));
        assert!(fs.item_exists("brick.png"));
        assert!(!fs.item_exists("stone.png"));
    }

    #[test]
    fn test_attributes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("map.tmj"), b"{}").unwrap();
        let fs = NativeFileSystem::with_search_paths(vec![dir.path().to_path_buf()]);

        let attributes = fs.attributes_of_item("map.tmj").unwrap();
        assert!(attributes.changed_at().is_some());
        assert!(matches!(fs.attributes_of_item("nope.tmj"), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("font.ttf"), b"glyphs").unwrap();
        let fs = NativeFileSystem::with_search_paths(vec![dir.path().to_path_buf()]);

        assert_eq!(fs.read("font.ttf").await.unwrap(), b"glyphs".to_vec());
        assert!(matches!(
            fs.read("missing.ttf").await,
            Err(ResourceError::FailedToLocate(_))
        ));
    }
}
