//! Tiled 맵/타일셋 로드 통합 테스트
//!
//! 기본 임포터(.tmj, .tsj)를 매니저를 통해 사용
//!
//! `cargo test -p gate-core --test tiled -- --nocapture`

mod common;

use common::manager;
use gate_core::{
    ResourceConfig, ResourceManager, TileMapKind, TileMapOptions, TileSetKind, TileSetOptions,
};
use gate_foundation::MemoryFileSystem;
use std::sync::Arc;

const FOREST_TSJ: &str = r#"{
    "name": "forest", "columns": 4, "image": "forest.png",
    "imagewidth": 64, "imageheight": 32, "tilecount": 8,
    "tilewidth": 16, "tileheight": 16, "type": "tileset",
    "tiles": [
        { "id": 5, "properties": [ { "name": "solid", "type": "bool", "value": true } ] }
    ]
}"#;

const LEVEL_TMJ: &str = r#"{
    "type": "map", "tilewidth": 16, "tileheight": 16, "width": 3, "height": 2,
    "tilesets": [ { "firstgid": 1, "source": "forest.tsj" } ],
    "layers": [
        { "id": 1, "name": "ground", "type": "tilelayer", "width": 3, "height": 2,
          "data": [1, 2, 3, 0, 1073741830, 6] },
        { "id": 2, "name": "decor", "type": "tilelayer", "width": 3, "height": 2,
          "data": [0, 0, 0, 0, 0, 8] },
        { "id": 3, "name": "spawns", "type": "objectgroup", "objects": [] }
    ]
}"#;

fn world() -> Arc<MemoryFileSystem> {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.write("maps/forest.tsj", FOREST_TSJ);
    fs.write("maps/level1.tmj", LEVEL_TMJ);
    fs
}

#[tokio::test]
async fn test_builtin_tiled_importers_registered() {
    let manager = manager(world());
    assert_eq!(manager.importer_names::<TileMapKind>(), vec!["TiledTmjImporter"]);
    assert_eq!(manager.importer_names::<TileSetKind>(), vec!["TiledTsjImporter"]);
}

#[tokio::test]
async fn test_load_tile_map() {
    let manager = manager(world());

    let map = manager.load::<TileMapKind>("maps/level1.tmj", TileMapOptions);
    manager.settle().await;

    let backend = map.backend().expect("map should load");
    // objectgroup 레이어는 제외
    assert_eq!(backend.layers().len(), 2);

    let ground = backend.layer_named("ground").unwrap();
    assert_eq!(ground.size, (3, 2));
    assert_eq!(ground.tile_size, (16, 16));
    assert_eq!(ground.tile_at(0, 0).and_then(|t| t.id), Some(0));
    assert_eq!(ground.tile_at(0, 1).and_then(|t| t.id), None);

    let flipped = ground.tile_at(1, 1).unwrap();
    assert_eq!(flipped.id, Some(5));
    assert!(flipped.flags.contains(gate_core::kinds::TileFlags::FLIPPED_VERTICAL));

    assert!(ground.tile_at(3, 0).is_none());
}

#[tokio::test]
async fn test_load_tile_set() {
    let manager = manager(world());

    let set = manager.load::<TileSetKind>("maps/forest.tsj", TileSetOptions);
    manager.settle().await;

    let backend = set.backend().expect("tile set should load");
    assert_eq!(backend.name(), "forest");
    assert_eq!(backend.texture_path(), "maps/forest.png");
    assert_eq!(backend.count(), 8);
    assert_eq!(backend.columns(), 4);
    assert_eq!(backend.rect_for_tile(5), Some((16, 16, 16, 16)));
    assert_eq!(
        backend.tile(5).and_then(|t| t.properties.get("solid")).map(String::as_str),
        Some("true")
    );
    assert!(backend.rect_for_tile(8).is_none());
}

#[tokio::test]
async fn test_wrong_extension_has_no_importer() {
    let manager = manager(world());

    let wrong = manager.load::<TileMapKind>("maps/forest.tsj", TileMapOptions);
    manager.settle().await;

    assert!(wrong.state().is_failed());
}

#[tokio::test]
async fn test_native_file_system_from_search_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("maps")).unwrap();
    std::fs::write(dir.path().join("maps/level1.tmj"), LEVEL_TMJ).unwrap();

    // 파일 시스템을 주지 않으면 설정의 검색 경로를 사용
    let manager = ResourceManager::builder()
        .config(ResourceConfig::new().search_path(dir.path()))
        .build()
        .unwrap();

    let map = manager.load::<TileMapKind>("maps/level1.tmj", TileMapOptions);
    let missing = manager.load::<TileMapKind>("maps/level2.tmj", TileMapOptions);
    manager.settle().await;

    assert!(map.is_ready());
    assert!(missing.state().is_failed());
}
