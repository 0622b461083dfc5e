//! Tile Set / Tile Map

use crate::handle::Resource;
use crate::importer::{ImporterType, TiledTmjImporter, TiledTsjImporter};
use crate::kind::ResourceKind;
use std::collections::HashMap;

// ============================================================================
// Tile Set
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSetOptions;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileSetTile {
    pub id: u32,
    pub properties: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTileSet {
    pub name: String,
    /// 타일셋 파일 기준으로 해석된 이미지 경로
    pub texture_path: String,
    pub image_size: (u32, u32),
    pub count: u32,
    pub columns: u32,
    pub tile_size: (u32, u32),
    pub tiles: Vec<TileSetTile>,
}

#[derive(Debug)]
pub struct TileSetBackend {
    raw: RawTileSet,
}

impl TileSetBackend {
    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn texture_path(&self) -> &str {
        &self.raw.texture_path
    }

    pub fn count(&self) -> u32 {
        self.raw.count
    }

    pub fn columns(&self) -> u32 {
        self.raw.columns
    }

    pub fn tile_size(&self) -> (u32, u32) {
        self.raw.tile_size
    }

    pub fn tile(&self, id: u32) -> Option<&TileSetTile> {
        self.raw.tiles.get(id as usize)
    }

    /// 이미지 안에서 타일의 픽셀 영역 (x, y, width, height)
    pub fn rect_for_tile(&self, id: u32) -> Option<(u32, u32, u32, u32)> {
        if id >= self.raw.count || self.raw.columns == 0 {
            return None;
        }
        let (width, height) = self.raw.tile_size;
        let column = id % self.raw.columns;
        let row = id / self.raw.columns;
        Some((column * width, row * height, width, height))
    }
}

pub struct TileSetKind;

impl ResourceKind for TileSetKind {
    const NAME: &'static str = "tileSet";
    type Options = TileSetOptions;
    type Raw = RawTileSet;
    type Backend = TileSetBackend;

    fn make_backend(raw: RawTileSet, _options: &TileSetOptions) -> TileSetBackend {
        TileSetBackend { raw }
    }

    fn builtin_importers() -> Vec<ImporterType<Self>> {
        vec![ImporterType::of::<TiledTsjImporter>()]
    }
}

pub type TileSet = Resource<TileSetKind>;

// ============================================================================
// Tile Map
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileMapOptions;

/// 타일 변환 플래그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileFlags(u8);

impl TileFlags {
    pub const FLIPPED_HORIZONTAL: Self = Self(1 << 0);
    pub const FLIPPED_VERTICAL: Self = Self(1 << 1);
    pub const FLIPPED_DIAGONAL: Self = Self(1 << 2);
    pub const ROTATED_HEXAGONAL_120: Self = Self(1 << 3);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    /// 타일셋 안의 타일 번호 (`None`이면 빈 칸)
    pub id: Option<u32>,
    pub flags: TileFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileLayer {
    pub name: String,
    pub size: (u32, u32),
    pub tile_size: (u32, u32),
    /// 행 우선 (`tiles[y][x]`)
    pub tiles: Vec<Vec<Tile>>,
}

impl TileLayer {
    pub fn tile_at(&self, x: u32, y: u32) -> Option<Tile> {
        self.tiles.get(y as usize)?.get(x as usize).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTileMap {
    pub layers: Vec<TileLayer>,
}

#[derive(Debug)]
pub struct TileMapBackend {
    layers: Vec<TileLayer>,
}

impl TileMapBackend {
    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn layer_named(&self, name: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

pub struct TileMapKind;

impl ResourceKind for TileMapKind {
    const NAME: &'static str = "tileMap";
    type Options = TileMapOptions;
    type Raw = RawTileMap;
    type Backend = TileMapBackend;

    fn make_backend(raw: RawTileMap, _options: &TileMapOptions) -> TileMapBackend {
        TileMapBackend { layers: raw.layers }
    }

    fn builtin_importers() -> Vec<ImporterType<Self>> {
        vec![ImporterType::of::<TiledTmjImporter>()]
    }
}

pub type TileMap = Resource<TileMapKind>;
