//! Importer Traits

use crate::kind::ResourceKind;
use async_trait::async_trait;
use gate_foundation::{FileSystem, ResourceError};
use std::sync::Arc;

// ============================================================================
// ImportSource - 임포터 입력
// ============================================================================

/// The file an importer is preparing from
#[derive(Debug, Clone)]
pub struct ImportSource {
    path: String,
    fs: Arc<dyn FileSystem>,
}

impl ImportSource {
    pub fn new(path: impl Into<String>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub async fn read(&self) -> Result<Vec<u8>, ResourceError> {
        self.fs.read(&self.path).await
    }

    pub async fn read_to_string(&self) -> Result<String, ResourceError> {
        let bytes = self.read().await?;
        String::from_utf8(bytes).map_err(|e| {
            ResourceError::failed_to_decode(format!("\"{}\" is not UTF-8: {}", self.path, e))
        })
    }

    /// 요청 경로의 디렉토리 부분 ("maps/level1.tmj" -> "maps")
    pub fn base_path(&self) -> &str {
        match self.path.rfind('/') {
            Some(index) => &self.path[..index],
            None => "",
        }
    }

    /// 요청 경로 기준 상대 경로 해석
    pub fn join(&self, relative: &str) -> String {
        match self.base_path() {
            "" => relative.to_string(),
            base => format!("{}/{}", base, relative),
        }
    }
}

// ============================================================================
// ResourceImporter - 종류와 무관한 부분
// ============================================================================

/// Kind-independent half of an importer
///
/// One prepared instance may serve several kinds (a model file feeding
/// geometry, skeleton and animation tables), so file parsing happens once in
/// [`prepare`](ResourceImporter::prepare) and the per-kind `load` calls read
/// from the parsed state.
#[async_trait]
pub trait ResourceImporter: Send + Sync + 'static {
    /// 처리 가능한 확장자 (점 없이, 소문자)
    fn supported_file_extensions() -> &'static [&'static str]
    where
        Self: Sized;

    /// 경로를 처리할 수 있는지 (기본: 확장자 비교, 대소문자 무시)
    fn can_process_file(path: &str) -> bool
    where
        Self: Sized,
    {
        let Some((_, extension)) = path.rsplit_once('.') else {
            return false;
        };
        if extension.contains('/') {
            return false;
        }
        Self::supported_file_extensions()
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(extension))
    }

    /// 파일을 읽고 파싱한다 (인스턴스당 한 번)
    async fn prepare(&mut self, source: &ImportSource) -> Result<(), ResourceError>;
}

// ============================================================================
// Importer<K> - 종류별 로드
// ============================================================================

/// Produces a decoded raw value of kind `K` from a prepared importer
#[async_trait]
pub trait Importer<K: ResourceKind>: ResourceImporter {
    async fn load(&self, options: &K::Options) -> Result<K::Raw, ResourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_foundation::MemoryFileSystem;

    struct PngLike;

    #[async_trait]
    impl ResourceImporter for PngLike {
        fn supported_file_extensions() -> &'static [&'static str] {
            &["png", "apng"]
        }

        async fn prepare(&mut self, _source: &ImportSource) -> Result<(), ResourceError> {
            Ok(())
        }
    }

    #[test]
    fn test_can_process_by_extension() {
        assert!(PngLike::can_process_file("brick.png"));
        assert!(PngLike::can_process_file("textures/Brick.PNG"));
        assert!(PngLike::can_process_file("anim.apng"));
        assert!(!PngLike::can_process_file("brick.jpg"));
        assert!(!PngLike::can_process_file("png"));
        assert!(!PngLike::can_process_file("dir.png/file"));
    }

    #[test]
    fn test_source_paths() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());

        let nested = ImportSource::new("maps/forest/level1.tmj", fs.clone());
        assert_eq!(nested.base_path(), "maps/forest");
        assert_eq!(nested.join("tiles.tsj"), "maps/forest/tiles.tsj");

        let flat = ImportSource::new("level1.tmj", fs);
        assert_eq!(flat.base_path(), "");
        assert_eq!(flat.join("tiles.tsj"), "tiles.tsj");
    }

    #[tokio::test]
    async fn test_read_to_string_rejects_binary() {
        let memory = Arc::new(MemoryFileSystem::new());
        memory.write("bad.tmj", vec![0xff, 0xfe]);
        let source = ImportSource::new("bad.tmj", memory);

        assert!(matches!(
            source.read_to_string().await,
            Err(ResourceError::FailedToDecode(_))
        ));
    }
}
