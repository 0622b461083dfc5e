//! 핫 리로드 통합 테스트
//!
//! 파일 수정 시각을 직접 조정해서 리로드 동작을 검증
//!
//! `cargo test -p gate-core --test hot_reload -- --nocapture`

#![cfg(feature = "hot-reload")]

mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::{drain_events, load_count, manager_with, SizeImporter};
use gate_core::{
    ResourceConfig, ResourceError, ResourceEvent, ResourceManager, ResourceState, TextureKind,
    TextureOptions,
};
use gate_foundation::MemoryFileSystem;
use std::sync::Arc;
use std::time::Duration;

fn setup(enabled: bool) -> (Arc<MemoryFileSystem>, ResourceManager) {
    let fs = Arc::new(MemoryFileSystem::new());
    let past = Utc::now() - ChronoDuration::seconds(60);
    fs.write_at("brick.png", "2x2", past);
    fs.write_at("stone.png", "4x4", past);

    let manager = manager_with(Arc::clone(&fs), ResourceConfig::new().hot_reload(enabled));
    manager.add_importer::<TextureKind, SizeImporter>(false);
    (fs, manager)
}

fn future() -> chrono::DateTime<Utc> {
    Utc::now() + ChronoDuration::seconds(10)
}

#[tokio::test]
async fn test_unchanged_file_is_not_reloaded() {
    let (_fs, manager) = setup(true);

    let brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    manager.settle().await;

    assert!(!brick.reload_if_needed());
    assert_eq!(manager.check_for_changes(), 0);
}

#[tokio::test]
async fn test_changed_file_replaces_backend() {
    let (fs, manager) = setup(true);
    let mut events = manager.subscribe();

    let brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    let other = brick.clone();
    manager.settle().await;
    assert_eq!(brick.receipt(), 1);

    fs.write_at("brick.png", "4x4", future());
    assert!(brick.reload_if_needed());
    // 리로드 중에도 이전 백엔드는 계속 사용 가능
    assert!(brick.is_ready());
    assert_eq!(brick.backend().unwrap().size(), (2, 2));
    assert!(manager.is_loading("brick.png"));

    manager.settle().await;

    assert_eq!(brick.receipt(), 2);
    assert_eq!(other.backend().unwrap().size(), (4, 4));
    assert!(drain_events(&mut events).contains(&ResourceEvent::Reloaded {
        kind: "texture",
        path: "brick.png".to_string(),
        receipt: 2,
    }));
}

#[tokio::test]
async fn test_check_for_changes_covers_all_referenced() {
    let (fs, manager) = setup(true);

    let _brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    let _stone = manager.load::<TextureKind>("stone.png", TextureOptions::default());
    let unreferenced = manager.cache_key::<TextureKind>("stone.png", TextureOptions::mip_mapped());
    manager.settle().await;

    fs.touch("brick.png", future());
    fs.touch("stone.png", future());

    // 참조 없는 엔트리는 제외
    assert_eq!(manager.check_for_changes(), 2);
    manager.settle().await;
    assert_eq!(manager.receipt::<TextureKind>(&unreferenced), Some(1));
}

#[tokio::test]
async fn test_reload_to_broken_file_fails() {
    let (fs, manager) = setup(true);

    let brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    manager.settle().await;

    fs.write_at("brick.png", "garbage", future());
    assert!(brick.reload_if_needed());
    manager.settle().await;

    assert!(matches!(
        brick.state(),
        ResourceState::Failed(ResourceError::FailedToDecode(_))
    ));
    assert!(brick.backend().is_none());
}

#[tokio::test]
async fn test_deleted_file_is_ignored() {
    let (fs, manager) = setup(true);

    let brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    manager.settle().await;

    fs.remove("brick.png");
    assert!(!brick.reload_if_needed());
    assert!(brick.is_ready());
}

#[tokio::test]
async fn test_generated_resources_are_never_reloaded() {
    let (fs, manager) = setup(true);

    let generated = manager.insert_generated::<TextureKind>(gate_core::RawTexture {
        width: 1,
        height: 1,
        pixels: vec![0; 4],
    });
    // 같은 이름의 파일이 있어도 무시
    fs.write_at(generated.path(), "8x8", future());

    assert!(!generated.reload_if_needed());
    assert_eq!(manager.check_for_changes(), 0);
}

#[tokio::test]
async fn test_update_polls_only_when_enabled() {
    let (fs, manager) = setup(false);

    let brick = manager.load::<TextureKind>("brick.png", TextureOptions::default());
    manager.settle().await;
    fs.touch("brick.png", future());

    assert!(!manager.hot_reload_enabled());
    manager.update(Duration::from_secs(5));
    assert_eq!(manager.loading_count(), 0);

    let (fs, manager) = setup(true);
    let stone = manager.load::<TextureKind>("stone.png", TextureOptions::default());
    manager.settle().await;
    fs.touch("stone.png", future());

    // 기본 폴링 간격 1초
    manager.update(Duration::from_millis(500));
    assert_eq!(manager.loading_count(), 0);
    manager.update(Duration::from_millis(500));
    assert_eq!(manager.loading_count(), 1);

    manager.settle().await;
    assert_eq!(stone.receipt(), 2);
    drop(brick);
}

#[tokio::test]
async fn test_one_reload_in_flight_per_key() {
    let (fs, manager) = setup(true);
    fs.write_at("slow.png", "2x2", Utc::now() - ChronoDuration::seconds(60));

    let slow = manager.load::<TextureKind>("slow.png", TextureOptions::default());
    manager.settle().await;
    fs.touch("slow.png", future());

    // 결과가 반영되기 전에 여러 번 폴링
    for _ in 0..3 {
        manager.update(Duration::from_millis(1000));
    }
    assert_eq!(manager.loading_count(), 1);
    assert!(!slow.reload_if_needed());
    assert_eq!(manager.check_for_changes(), 0);

    manager.settle().await;
    assert_eq!(load_count("slow.png"), 2);
    assert_eq!(slow.receipt(), 2);
}

#[tokio::test]
async fn test_new_key_sees_file_changed_after_prepare() {
    let (fs, manager) = setup(true);
    fs.write_at("shift.png", "2x2", Utc::now() - ChronoDuration::seconds(60));

    let plain = manager.load::<TextureKind>("shift.png", TextureOptions::default());
    manager.settle().await;
    assert_eq!(plain.backend().unwrap().size(), (2, 2));

    // 다음 핫 리로드 전에 다른 옵션으로 같은 파일 요청
    fs.write_at("shift.png", "8x8", future());
    let mipped = manager.load::<TextureKind>("shift.png", TextureOptions::mip_mapped());
    manager.settle().await;
    assert_eq!(mipped.backend().unwrap().size(), (8, 8));

    manager.check_for_changes();
    manager.settle().await;
    assert_eq!(plain.backend().unwrap().size(), (8, 8));
    assert_eq!(mipped.backend().unwrap().size(), (8, 8));
}
