//! In-memory filesystem

use super::{FileAttributes, FileSystem};
use crate::error::ResourceError;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MemoryFile {
    data: Vec<u8>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

/// 메모리 파일 시스템
///
/// 파일 내용과 수정 시각을 직접 제어할 수 있어서 핫 리로드 테스트에 쓴다.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<String, MemoryFile>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일 쓰기 (수정 시각 = 지금)
    pub fn write(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.write_at(path, data, Utc::now());
    }

    /// 파일 쓰기 (수정 시각 지정)
    pub fn write_at(&self, path: impl Into<String>, data: impl Into<Vec<u8>>, modified: DateTime<Utc>) {
        let mut files = self.files.write();
        let data = data.into();
        files
            .entry(path.into())
            .and_modify(|file| {
                file.data = data.clone();
                file.modified = modified;
            })
            .or_insert_with(|| MemoryFile {
                data,
                created: modified,
                modified,
            });
    }

    /// 수정 시각만 변경
    pub fn touch(&self, path: &str, modified: DateTime<Utc>) -> bool {
        match self.files.write().get_mut(path) {
            Some(file) => {
                file.modified = modified;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, path: &str) -> bool {
        self.files.write().remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    fn item_exists(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }

    fn attributes_of_item(&self, path: &str) -> Result<FileAttributes> {
        let files = self.files.read();
        let file = files
            .get(path)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;
        Ok(FileAttributes {
            modification_date: Some(file.modified),
            creation_date: Some(file.created),
        })
    }

    async fn read(&self, path: &str) -> std::result::Result<Vec<u8>, ResourceError> {
        self.files
            .read()
            .get(path)
            .map(|file| file.data.clone())
            .ok_or_else(|| ResourceError::failed_to_locate(format!("No file at \"{}\"", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_write_and_read() {
        let fs = MemoryFileSystem::new();
        fs.write("brick.png", b"pixels".to_vec());

        assert!(fs.item_exists("brick.png"));
        assert_eq!(fs.read("brick.png").await.unwrap(), b"pixels".to_vec());
        assert!(fs.read("stone.png").await.is_err());
    }

    #[test]
    fn test_rewrite_keeps_creation_date() {
        let fs = MemoryFileSystem::new();
        let start = Utc::now();
        fs.write_at("brick.png", b"a".to_vec(), start);
        fs.write_at("brick.png", b"b".to_vec(), start + Duration::seconds(5));

        let attributes = fs.attributes_of_item("brick.png").unwrap();
        assert_eq!(attributes.creation_date, Some(start));
        assert_eq!(attributes.changed_at(), Some(start + Duration::seconds(5)));
    }

    #[test]
    fn test_touch_missing() {
        let fs = MemoryFileSystem::new();
        assert!(!fs.touch("missing.png", Utc::now()));
        assert!(fs.is_empty());
    }
}
