//! Tiled JSON Importers (`.tsj` tile sets, `.tmj` tile maps)

use super::traits::{ImportSource, Importer, ResourceImporter};
use crate::kinds::{
    RawTileMap, RawTileSet, Tile, TileFlags, TileLayer, TileMapKind, TileMapOptions, TileSetKind,
    TileSetOptions, TileSetTile,
};
use async_trait::async_trait;
use gate_foundation::ResourceError;
use serde::Deserialize;
use std::collections::HashMap;

// Global tile id flag bits
const FLIPPED_HORIZONTAL: u32 = 0x8000_0000;
const FLIPPED_VERTICAL: u32 = 0x4000_0000;
const FLIPPED_DIAGONAL: u32 = 0x2000_0000;
const ROTATED_HEXAGONAL_120: u32 = 0x1000_0000;
const FLAG_MASK: u32 = FLIPPED_HORIZONTAL | FLIPPED_VERTICAL | FLIPPED_DIAGONAL | ROTATED_HEXAGONAL_120;

fn not_prepared(path: &str) -> ResourceError {
    ResourceError::failed_to_load(format!("Importer for \"{}\" was not prepared", path))
}

// ============================================================================
// Tile Set (.tsj)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TsjFile {
    #[serde(default)]
    name: String,
    columns: u32,
    image: String,
    imagewidth: u32,
    imageheight: u32,
    tilecount: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    tiles: Vec<TsjTile>,
}

#[derive(Debug, Deserialize)]
struct TsjTile {
    id: u32,
    #[serde(default)]
    properties: Vec<TsjProperty>,
}

#[derive(Debug, Deserialize)]
struct TsjProperty {
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

fn property_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 타일 수는 이미지에 들어가는 타일 수를 넘을 수 없다
fn check_tile_count(file: &TsjFile, path: &str) -> Result<(), ResourceError> {
    if file.tilewidth == 0 || file.tileheight == 0 {
        return Err(ResourceError::failed_to_decode(format!(
            "Tile set \"{}\" has a zero tile size",
            path
        )));
    }
    let capacity = u64::from(file.columns) * u64::from(file.imageheight / file.tileheight);
    if u64::from(file.tilecount) > capacity {
        return Err(ResourceError::failed_to_decode(format!(
            "Tile set \"{}\" declares {} tiles but its image holds {}",
            path, file.tilecount, capacity
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct TiledTsjImporter {
    path: String,
    file: Option<TsjFile>,
    texture_path: String,
}

#[async_trait]
impl ResourceImporter for TiledTsjImporter {
    fn supported_file_extensions() -> &'static [&'static str] {
        &["tsj"]
    }

    async fn prepare(&mut self, source: &ImportSource) -> Result<(), ResourceError> {
        let text = source.read_to_string().await?;
        let file: TsjFile = serde_json::from_str(&text)?;
        check_tile_count(&file, source.path())?;
        self.texture_path = source.join(&file.image);
        self.path = source.path().to_string();
        self.file = Some(file);
        Ok(())
    }
}

#[async_trait]
impl Importer<TileSetKind> for TiledTsjImporter {
    async fn load(&self, _options: &TileSetOptions) -> Result<RawTileSet, ResourceError> {
        let file = self.file.as_ref().ok_or_else(|| not_prepared(&self.path))?;

        let mut properties: HashMap<u32, HashMap<String, String>> = file
            .tiles
            .iter()
            .map(|tile| {
                let values = tile
                    .properties
                    .iter()
                    .filter_map(|p| Some((p.name.clone(), property_string(&p.value)?)))
                    .collect();
                (tile.id, values)
            })
            .collect();

        let tiles = (0..file.tilecount)
            .map(|id| TileSetTile {
                id,
                properties: properties.remove(&id).unwrap_or_default(),
            })
            .collect();

        Ok(RawTileSet {
            name: file.name.clone(),
            texture_path: self.texture_path.clone(),
            image_size: (file.imagewidth, file.imageheight),
            count: file.tilecount,
            columns: file.columns,
            tile_size: (file.tilewidth, file.tileheight),
            tiles,
        })
    }
}

// ============================================================================
// Tile Map (.tmj)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmjFile {
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<TmjLayer>,
}

#[derive(Debug, Deserialize)]
struct TmjLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    data: Vec<u32>,
}

fn decode_tile(gid: u32) -> Tile {
    let mut flags = TileFlags::empty();
    for (bit, flag) in [
        (FLIPPED_HORIZONTAL, TileFlags::FLIPPED_HORIZONTAL),
        (FLIPPED_VERTICAL, TileFlags::FLIPPED_VERTICAL),
        (FLIPPED_DIAGONAL, TileFlags::FLIPPED_DIAGONAL),
        (ROTATED_HEXAGONAL_120, TileFlags::ROTATED_HEXAGONAL_120),
    ] {
        if gid & bit != 0 {
            flags.insert(flag);
        }
    }
    // 0 is an empty cell, everything else is 1-based
    let id = (gid & !FLAG_MASK).checked_sub(1);
    Tile { id, flags }
}

#[derive(Debug, Default)]
pub struct TiledTmjImporter {
    path: String,
    file: Option<TmjFile>,
}

#[async_trait]
impl ResourceImporter for TiledTmjImporter {
    fn supported_file_extensions() -> &'static [&'static str] {
        &["tmj"]
    }

    async fn prepare(&mut self, source: &ImportSource) -> Result<(), ResourceError> {
        let text = source.read_to_string().await?;
        self.file = Some(serde_json::from_str(&text)?);
        self.path = source.path().to_string();
        Ok(())
    }
}

#[async_trait]
impl Importer<TileMapKind> for TiledTmjImporter {
    async fn load(&self, _options: &TileMapOptions) -> Result<RawTileMap, ResourceError> {
        let file = self.file.as_ref().ok_or_else(|| not_prepared(&self.path))?;

        let mut layers = Vec::with_capacity(file.layers.len());
        for layer in file.layers.iter().filter(|layer| layer.kind == "tilelayer") {
            let expected = layer.width as usize * layer.height as usize;
            if layer.data.len() != expected {
                return Err(ResourceError::failed_to_decode(format!(
                    "Layer \"{}\" has {} tiles, expected {}x{}",
                    layer.name,
                    layer.data.len(),
                    layer.width,
                    layer.height
                )));
            }
            let tiles = if layer.width == 0 {
                Vec::new()
            } else {
                layer
                    .data
                    .chunks(layer.width as usize)
                    .map(|row| row.iter().copied().map(decode_tile).collect())
                    .collect()
            };
            layers.push(TileLayer {
                name: layer.name.clone(),
                size: (layer.width, layer.height),
                tile_size: (file.tilewidth, file.tileheight),
                tiles,
            });
        }

        Ok(RawTileMap { layers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_foundation::{FileSystem, MemoryFileSystem};
    use std::sync::Arc;

    const TILESET: &str = r#"{
        "name": "forest", "columns": 2, "image": "forest.png",
        "imagewidth": 32, "imageheight": 32, "tilecount": 4,
        "tilewidth": 16, "tileheight": 16, "type": "tileset",
        "tiles": [
            { "id": 1, "properties": [
                { "name": "solid", "type": "bool", "value": true },
                { "name": "label", "type": "string", "value": "tree" }
            ] }
        ]
    }"#;

    const TILEMAP: &str = r#"{
        "type": "map", "tilewidth": 16, "tileheight": 16, "width": 2, "height": 2,
        "layers": [
            { "id": 1, "name": "ground", "type": "tilelayer", "width": 2, "height": 2,
              "data": [1, 0, 2147483650, 3] },
            { "id": 2, "name": "spawns", "type": "objectgroup", "objects": [] }
        ]
    }"#;

    fn source(path: &str, contents: &str) -> ImportSource {
        let memory = Arc::new(MemoryFileSystem::new());
        memory.write(path, contents);
        let fs: Arc<dyn FileSystem> = memory;
        ImportSource::new(path, fs)
    }

    #[tokio::test]
    async fn test_tsj_import() {
        let mut importer = TiledTsjImporter::default();
        importer.prepare(&source("tiles/forest.tsj", TILESET)).await.unwrap();
        let raw = importer.load(&TileSetOptions).await.unwrap();

        assert_eq!(raw.name, "forest");
        assert_eq!(raw.texture_path, "tiles/forest.png");
        assert_eq!(raw.tiles.len(), 4);
        assert_eq!(raw.tiles[1].properties.get("solid").map(String::as_str), Some("true"));
        assert_eq!(raw.tiles[1].properties.get("label").map(String::as_str), Some("tree"));
        assert!(raw.tiles[0].properties.is_empty());
    }

    #[tokio::test]
    async fn test_tmj_import() {
        let mut importer = TiledTmjImporter::default();
        importer.prepare(&source("level1.tmj", TILEMAP)).await.unwrap();
        let raw = importer.load(&TileMapOptions).await.unwrap();

        assert_eq!(raw.layers.len(), 1);
        let ground = &raw.layers[0];
        assert_eq!(ground.size, (2, 2));
        assert_eq!(ground.tile_at(0, 0).and_then(|t| t.id), Some(0));
        assert_eq!(ground.tile_at(1, 0).and_then(|t| t.id), None);

        let flipped = ground.tile_at(0, 1).unwrap();
        assert_eq!(flipped.id, Some(1));
        assert!(flipped.flags.contains(TileFlags::FLIPPED_HORIZONTAL));
    }

    #[tokio::test]
    async fn test_tmj_bad_layer_size() {
        let bad = r#"{ "tilewidth": 8, "tileheight": 8,
            "layers": [ { "name": "g", "type": "tilelayer", "width": 3, "height": 1, "data": [1] } ] }"#;
        let mut importer = TiledTmjImporter::default();
        importer.prepare(&source("bad.tmj", bad)).await.unwrap();

        assert!(matches!(
            importer.load(&TileMapOptions).await,
            Err(ResourceError::FailedToDecode(_))
        ));
    }

    #[tokio::test]
    async fn test_tsj_tile_count_beyond_image() {
        let huge = TILESET.replace(r#""tilecount": 4"#, r#""tilecount": 4294967295"#);
        let mut importer = TiledTsjImporter::default();
        let result = importer.prepare(&source("huge.tsj", &huge)).await;
        assert!(matches!(result, Err(ResourceError::FailedToDecode(_))));

        let flat = TILESET.replace(r#""tileheight": 16"#, r#""tileheight": 0"#);
        let result = importer.prepare(&source("flat.tsj", &flat)).await;
        assert!(matches!(result, Err(ResourceError::FailedToDecode(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let mut importer = TiledTsjImporter::default();
        let result = importer.prepare(&source("broken.tsj", "{ not json")).await;
        assert!(matches!(result, Err(ResourceError::FailedToDecode(_))));
    }

    #[test]
    fn test_load_before_prepare() {
        let importer = TiledTmjImporter::default();
        let result = futures::executor::block_on(importer.load(&TileMapOptions));
        assert!(matches!(result, Err(ResourceError::FailedToLoad(_))));
    }
}
