//! Resource Config - 리소스 캐시 설정
//!
//! 글로벌 설정과 프로젝트 설정을 병합해서 사용한다.

use crate::core::CacheHint;
use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 설정 파일명
pub const RESOURCE_CONFIG_FILE: &str = "resources.json";

// ============================================================================
// Resource Config (통합)
// ============================================================================

/// 리소스 캐시 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 요청 경로를 해석할 루트 디렉토리들 (순서대로 검색)
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// 스윕 설정
    #[serde(default)]
    pub sweep: SweepConfig,

    /// 핫 리로드 설정
    #[serde(default)]
    pub hot_reload: HotReloadConfig,

    /// 리소스 종류별 기본 캐시 정책 (key: 종류 이름, 예: "texture")
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub cache_hints: HashMap<String, CacheHint>,

    /// 이벤트 브로드캐스트 채널 용량
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            search_paths: Vec::new(),
            sweep: SweepConfig::default(),
            hot_reload: HotReloadConfig::default(),
            cache_hints: HashMap::new(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<ResourceConfig>(RESOURCE_CONFIG_FILE)? {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<ResourceConfig>(RESOURCE_CONFIG_FILE)?
            {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 파일 하나에서 로드
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        crate::storage::read_json(path.as_ref())
    }

    /// 프로젝트 설정 저장
    pub fn save_project(&self) -> Result<()> {
        let store = JsonStore::current_project()?;
        store.save(RESOURCE_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: ResourceConfig) {
        for path in other.search_paths {
            if !self.search_paths.contains(&path) {
                self.search_paths.push(path);
            }
        }
        self.sweep.merge(other.sweep);
        self.hot_reload.merge(other.hot_reload);
        self.cache_hints.extend(other.cache_hints);
        if other.event_capacity != default_event_capacity() {
            self.event_capacity = other.event_capacity;
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    pub fn hot_reload(mut self, enabled: bool) -> Self {
        self.hot_reload.enabled = enabled;
        self
    }

    pub fn cache_hint(mut self, kind: impl Into<String>, hint: CacheHint) -> Self {
        self.cache_hints.insert(kind.into(), hint);
        self
    }

    /// 종류별 캐시 정책 오버라이드 조회
    pub fn cache_hint_for(&self, kind: &str) -> Option<CacheHint> {
        self.cache_hints.get(kind).copied()
    }
}

// ============================================================================
// Sweep Config
// ============================================================================

/// 캐시 스윕 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepConfig {
    /// 스윕 간격 (초). 한 번의 스윕이 `CacheHint::Until`의 1분에 해당
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval(),
        }
    }
}

impl SweepConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }

    fn merge(&mut self, other: SweepConfig) {
        if other.interval_secs != default_sweep_interval() {
            self.interval_secs = other.interval_secs;
        }
    }
}

// ============================================================================
// Hot Reload Config
// ============================================================================

/// 핫 리로드 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotReloadConfig {
    /// 핫 리로드 활성화 (기본: 디버그 빌드에서만)
    #[serde(default = "default_hot_reload_enabled")]
    pub enabled: bool,

    /// 파일 변경 확인 간격 (ms)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for HotReloadConfig {
    fn default() -> Self {
        Self {
            enabled: default_hot_reload_enabled(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl HotReloadConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    fn merge(&mut self, other: HotReloadConfig) {
        self.enabled = other.enabled;
        if other.poll_interval_ms != default_poll_interval_ms() {
            self.poll_interval_ms = other.poll_interval_ms;
        }
    }
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_sweep_interval() -> u64 {
    60
} // 1 minute
fn default_hot_reload_enabled() -> bool {
    cfg!(debug_assertions)
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_event_capacity() -> usize {
    256
}
