//! Resource Kinds - 기본 제공 리소스 종류
//!
//! | Kind | Handle | Options |
//! |------|--------|---------|
//! | [`TextureKind`] | [`Texture`] | mip mapping |
//! | [`GeometryKind`] | [`Geometry`] | sub-object, root transform, instances |
//! | [`CollisionMeshKind`] | [`CollisionMesh`] | + collision attribute group |
//! | [`SkeletonKind`] | [`Skeleton`] | sub-object, root joint |
//! | [`SkeletalAnimationKind`] | [`SkeletalAnimation`] | animation name |
//! | [`TileSetKind`] | [`TileSet`] | - |
//! | [`TileMapKind`] | [`TileMap`] | - |
//! | [`FontKind`] | [`Font`] | style |

mod animation;
mod collision;
mod font;
mod geometry;
mod skeleton;
mod texture;
mod tile;

pub use animation::{
    JointChannel, Keyframe, RawSkeletalAnimation, SkeletalAnimation, SkeletalAnimationBackend,
    SkeletalAnimationKind, SkeletalAnimationOptions,
};
pub use collision::{
    CollisionMesh, CollisionMeshBackend, CollisionMeshKind, CollisionMeshOptions,
    CollisionTriangle, RawCollisionMesh,
};
pub use font::{Font, FontBackend, FontKind, FontOptions, FontStyle, RawFont};
pub use geometry::{Bounds, Geometry, GeometryBackend, GeometryKind, GeometryOptions, RawGeometry};
pub use skeleton::{Joint, RawSkeleton, Skeleton, SkeletonBackend, SkeletonKind, SkeletonOptions};
pub use texture::{MipMapping, RawTexture, Texture, TextureBackend, TextureKind, TextureOptions};
pub use tile::{
    RawTileMap, RawTileSet, Tile, TileFlags, TileLayer, TileMap, TileMapBackend, TileMapKind,
    TileMapOptions, TileSet, TileSetBackend, TileSetKind, TileSetOptions, TileSetTile,
};
