//! Importer - 파일을 Raw 리소스로 디코딩
//!
//! - `traits.rs`: [`ResourceImporter`], [`Importer`], [`ImportSource`]
//! - `registry.rs`: 종류별 임포터 목록 (앞쪽이 우선)
//! - `cache.rs`: (임포터 타입, 경로)별 준비된 인스턴스 캐시
//! - `tiled.rs`: Tiled JSON 타일셋/타일맵 임포터

mod cache;
mod registry;
mod tiled;
mod traits;

pub use cache::ImporterCache;
pub use registry::{ImporterRegistry, ImporterType};
pub(crate) use registry::resolve;
pub use tiled::{TiledTmjImporter, TiledTsjImporter};
pub use traits::{ImportSource, Importer, ResourceImporter};
