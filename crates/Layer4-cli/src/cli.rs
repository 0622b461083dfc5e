//! Non-interactive commands (load, watch)

use crate::report;
use gate_core::{ResourceManager, ResourceState, TileMap, TileMapOptions, TileSet, TileSetOptions};
use gate_foundation::ResourceConfig;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::TryRecvError;

/// CLI에서 다룰 수 있는 리소스 핸들
pub enum Loaded {
    Map(TileMap),
    Set(TileSet),
}

impl Loaded {
    pub fn path(&self) -> &str {
        match self {
            Loaded::Map(map) => map.path(),
            Loaded::Set(set) => set.path(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Loaded::Map(_) => "tileMap",
            Loaded::Set(_) => "tileSet",
        }
    }

    pub fn state(&self) -> ResourceState {
        match self {
            Loaded::Map(map) => map.state(),
            Loaded::Set(set) => set.state(),
        }
    }

    pub fn receipt(&self) -> u8 {
        match self {
            Loaded::Map(map) => map.receipt(),
            Loaded::Set(set) => set.receipt(),
        }
    }

    /// 한 줄 요약
    pub fn summary(&self) -> Option<String> {
        match self {
            Loaded::Map(map) => map.backend().map(|backend| {
                let layers: Vec<String> = backend
                    .layers()
                    .iter()
                    .map(|layer| format!("{} {}x{}", layer.name, layer.size.0, layer.size.1))
                    .collect();
                format!("{} layer(s): {}", layers.len(), layers.join(", "))
            }),
            Loaded::Set(set) => set.backend().map(|backend| {
                format!(
                    "\"{}\" {} tile(s), {} column(s), image {}",
                    backend.name(),
                    backend.count(),
                    backend.columns(),
                    backend.texture_path()
                )
            }),
        }
    }
}

/// 확장자로 리소스 종류를 정해서 로드 시작
pub fn start_load(manager: &ResourceManager, path: &str) -> anyhow::Result<Loaded> {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("tmj") => Ok(Loaded::Map(manager.load(path, TileMapOptions))),
        Some("tsj") => Ok(Loaded::Set(manager.load(path, TileSetOptions))),
        _ => anyhow::bail!("Unsupported resource \"{}\" (expected .tmj or .tsj)", path),
    }
}

fn start_all(manager: &ResourceManager, paths: &[String]) -> anyhow::Result<Vec<Loaded>> {
    paths.iter().map(|path| start_load(manager, path)).collect()
}

/// Load every path, wait for the cache to settle and print the result
pub async fn run_load(config: ResourceConfig, paths: &[String], json: bool) -> anyhow::Result<()> {
    let manager = ResourceManager::builder().config(config).build()?;
    let handles = start_all(&manager, paths)?;

    let started = Instant::now();
    manager.settle().await;
    tracing::debug!("Settled in {:?}", started.elapsed());

    if json {
        println!("{}", serde_json::to_string_pretty(&report::snapshot(&handles, &manager.stats()))?);
    } else {
        report::print_states(&handles);
        report::print_stats(&manager.stats());
    }

    let failed = handles.iter().filter(|handle| handle.state().is_failed()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} resource(s) failed to load", failed, handles.len());
    }
    Ok(())
}

/// Keep the resources referenced and drive the game loop until stopped
pub async fn run_watch(
    config: ResourceConfig,
    paths: &[String],
    interval_ms: u64,
    duration_secs: Option<u64>,
) -> anyhow::Result<()> {
    let manager = ResourceManager::builder().config(config).build()?;
    if !manager.hot_reload_enabled() {
        tracing::warn!("Hot reload is disabled; only load events will be shown");
    }

    let mut events = manager.subscribe();
    let handles = start_all(&manager, paths)?;
    println!("Watching {} resource(s). Press Ctrl-C to stop.\n", handles.len());

    let tick = Duration::from_millis(interval_ms.max(1));
    let deadline = duration_secs.map(|secs| Instant::now() + Duration::from_secs(secs));
    let mut interval = tokio::time::interval(tick);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }

        let now = Instant::now();
        manager.update(now - last);
        last = now;

        loop {
            match events.try_recv() {
                Ok(event) => report::print_event(&event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} event(s)", skipped);
                }
                Err(_) => break,
            }
        }

        if deadline.is_some_and(|deadline| now >= deadline) {
            break;
        }
    }

    report::print_states(&handles);
    Ok(())
}
