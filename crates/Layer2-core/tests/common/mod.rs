//! 통합 테스트 공용 도구: 메모리 파일 시스템 + 테스트 임포터

#![allow(dead_code)]

use async_trait::async_trait;
use gate_core::{
    ImportSource, Importer, RawTexture, ResourceConfig, ResourceError, ResourceImporter,
    ResourceManager, TextureKind, TextureOptions,
};
use gate_foundation::MemoryFileSystem;
use parking_lot::Mutex;
use std::sync::Arc;

static LOADS: Mutex<Vec<String>> = parking_lot::const_mutex(Vec::new());

/// `path`에 대해 임포터 `load`가 호출된 횟수
pub fn load_count(path: &str) -> usize {
    LOADS.lock().iter().filter(|p| p.as_str() == path).count()
}

fn record_load(path: &str) {
    LOADS.lock().push(path.to_string());
}

/// 테스트용 매니저 (핫 리로드 켬)
pub fn manager_with(fs: Arc<MemoryFileSystem>, config: ResourceConfig) -> ResourceManager {
    ResourceManager::builder()
        .config(config)
        .file_system(fs)
        .build()
        .expect("manager should build inside a tokio runtime")
}

pub fn manager(fs: Arc<MemoryFileSystem>) -> ResourceManager {
    manager_with(fs, ResourceConfig::new().hot_reload(true))
}

/// 이름 규칙으로 텍스처 크기를 정하는 파일 포맷: 내용이 "WxH"
#[derive(Default)]
pub struct SizeImporter {
    path: String,
    size: (u32, u32),
}

#[async_trait]
impl ResourceImporter for SizeImporter {
    fn supported_file_extensions() -> &'static [&'static str] {
        &["png"]
    }

    async fn prepare(&mut self, source: &ImportSource) -> Result<(), ResourceError> {
        let text = source.read_to_string().await?;
        let (width, height) = text
            .trim()
            .split_once('x')
            .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
            .ok_or_else(|| ResourceError::failed_to_decode(format!("bad size header {:?}", text)))?;
        self.path = source.path().to_string();
        self.size = (width, height);
        Ok(())
    }
}

#[async_trait]
impl Importer<TextureKind> for SizeImporter {
    async fn load(&self, _options: &TextureOptions) -> Result<RawTexture, ResourceError> {
        record_load(&self.path);
        let (width, height) = self.size;
        Ok(RawTexture {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }
}

/// `special/` 아래 png만 처리, 항상 1x1
#[derive(Default)]
pub struct SpecialImporter;

#[async_trait]
impl ResourceImporter for SpecialImporter {
    fn supported_file_extensions() -> &'static [&'static str] {
        &["png"]
    }

    fn can_process_file(path: &str) -> bool {
        path.starts_with("special/") && path.ends_with(".png")
    }

    async fn prepare(&mut self, _source: &ImportSource) -> Result<(), ResourceError> {
        Ok(())
    }
}

#[async_trait]
impl Importer<TextureKind> for SpecialImporter {
    async fn load(&self, _options: &TextureOptions) -> Result<RawTexture, ResourceError> {
        Ok(RawTexture {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        })
    }
}

/// 항상 패닉
#[derive(Default)]
pub struct ExplodingImporter;

#[async_trait]
impl ResourceImporter for ExplodingImporter {
    fn supported_file_extensions() -> &'static [&'static str] {
        &["boom"]
    }

    async fn prepare(&mut self, _source: &ImportSource) -> Result<(), ResourceError> {
        Ok(())
    }
}

#[async_trait]
impl Importer<TextureKind> for ExplodingImporter {
    async fn load(&self, _options: &TextureOptions) -> Result<RawTexture, ResourceError> {
        panic!("importer exploded")
    }
}

/// 대기 중인 이벤트 전부
pub fn drain_events(
    rx: &mut tokio::sync::broadcast::Receiver<gate_core::ResourceEvent>,
) -> Vec<gate_core::ResourceEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
