//! gate-core: Resource Cache for Gate
//!
//! Layer2 - 리소스 캐시/수명 관리 레이어
//!
//! # 주요 모듈
//!
//! - `manager`: [`ResourceManager`] (테이블, 로드, 스윕, 핫 리로드)
//! - `handle`: [`Resource`] 핸들 (참조 카운트)
//! - `cache`: [`CacheKey`], 엔트리, 종류별 테이블
//! - `importer`: 임포터 프로토콜, 레지스트리, Tiled 임포터
//! - `kinds`: 기본 리소스 종류 (Texture, Geometry, TileMap ...)
//! - `event`: 캐시 이벤트
//!
//! # 사용 예시
//!
//! ```ignore
//! use gate_core::{ResourceManager, TileMap, TileMapOptions};
//!
//! let manager = ResourceManager::builder()
//!     .config(ResourceConfig::load()?)
//!     .build()?;
//!
//! // 즉시 반환 (Pending), 백그라운드에서 로드
//! let map: TileMap = manager.load("maps/level1.tmj", TileMapOptions);
//!
//! // 게임 루프
//! loop {
//!     manager.update(delta);
//!     if let Some(backend) = map.backend() {
//!         // draw
//!     }
//! }
//! ```

pub mod cache;
pub mod event;
pub mod handle;
pub mod importer;
pub mod kind;
pub mod kinds;
pub mod manager;
pub mod stats;

// Re-exports: Manager
pub use manager::{ResourceManager, ResourceManagerBuilder};

// Re-exports: Cache
pub use cache::{CacheKey, GENERATED_PREFIX};
pub use handle::Resource;
pub use kind::ResourceKind;

// Re-exports: Importer
pub use importer::{
    ImportSource, Importer, ImporterCache, ImporterRegistry, ImporterType, ResourceImporter,
    TiledTmjImporter, TiledTsjImporter,
};

// Re-exports: Kinds
pub use kinds::{
    CollisionMesh, CollisionMeshKind, CollisionMeshOptions, Font, FontKind, FontOptions, Geometry,
    GeometryKind, GeometryOptions, RawCollisionMesh, RawFont, RawGeometry, RawSkeletalAnimation,
    RawSkeleton, RawTexture, RawTileMap, RawTileSet, SkeletalAnimation, SkeletalAnimationKind,
    SkeletalAnimationOptions, Skeleton, SkeletonKind, SkeletonOptions, Texture, TextureKind,
    TextureOptions, TileMap, TileMapKind, TileMapOptions, TileSet, TileSetKind, TileSetOptions,
};

// Re-exports: Events / Stats
pub use event::{EvictionReason, ResourceEvent};
pub use stats::{CacheStats, KindStats};

// Re-exports: Foundation
pub use gate_foundation::{CacheHint, FileSystem, ResourceConfig, ResourceError, ResourceState};
