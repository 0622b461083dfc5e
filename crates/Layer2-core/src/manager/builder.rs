//! ResourceManager Builder

use super::{Dispatcher, ResourceManager};
use gate_foundation::{Error, FileSystem, NativeFileSystem, ResourceConfig, Result};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

/// Builder for [`ResourceManager`]
///
/// ```ignore
/// let manager = ResourceManager::builder()
///     .config(ResourceConfig::load()?)
///     .file_system(Arc::new(MemoryFileSystem::new()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ResourceManagerBuilder {
    config: Option<ResourceConfig>,
    fs: Option<Arc<dyn FileSystem>>,
    runtime: Option<Handle>,
}

impl ResourceManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ResourceConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 파일 시스템 (기본: 설정의 `searchPaths`를 쓰는 NativeFileSystem)
    pub fn file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// 백그라운드 로드를 실행할 런타임 (기본: 현재 런타임)
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<ResourceManager> {
        let config = self.config.unwrap_or_default();

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| {
                Error::Config(format!("No tokio runtime available for resource loading: {}", e))
            })?,
        };

        let fs = self.fs.unwrap_or_else(|| {
            Arc::new(NativeFileSystem::with_search_paths(config.search_paths.clone()))
        });

        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(runtime, sender, fs);

        debug!(
            "Resource manager ready (sweep every {:?}, hot reload {})",
            config.sweep.interval(),
            if cfg!(feature = "hot-reload") && config.hot_reload.enabled { "on" } else { "off" }
        );
        Ok(ResourceManager::from_parts(config, dispatcher, receiver))
    }
}

impl std::fmt::Debug for ResourceManagerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceManagerBuilder")
            .field("config", &self.config)
            .field("fs", &self.fs)
            .field("runtime", &self.runtime.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_runtime_fails() {
        let result = ResourceManagerBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_build_with_explicit_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let manager = ResourceManager::builder()
            .runtime(runtime.handle().clone())
            .config(ResourceConfig::new().hot_reload(false))
            .build()
            .unwrap();

        assert!(!manager.hot_reload_enabled());
        assert_eq!(manager.loading_count(), 0);
    }
}
