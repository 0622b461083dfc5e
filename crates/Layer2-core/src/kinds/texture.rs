//! Texture

use crate::handle::Resource;
use crate::kind::ResourceKind;

/// 밉맵 생성 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MipMapping {
    #[default]
    None,
    /// `levels`가 없으면 1x1까지 전부
    Auto { levels: Option<u32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureOptions {
    pub mip_mapping: MipMapping,
}

impl TextureOptions {
    pub fn mip_mapped() -> Self {
        Self {
            mip_mapping: MipMapping::Auto { levels: None },
        }
    }
}

/// 디코딩된 RGBA8 이미지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug)]
pub struct TextureBackend {
    width: u32,
    height: u32,
    mip_levels: u32,
    pixels: Vec<u8>,
}

impl TextureBackend {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mip_level_count(&self) -> u32 {
        self.mip_levels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

fn mip_level_count(width: u32, height: u32, mip_mapping: MipMapping) -> u32 {
    let full = u32::BITS - width.max(height).max(1).leading_zeros();
    match mip_mapping {
        MipMapping::None => 1,
        MipMapping::Auto { levels: None } => full,
        MipMapping::Auto { levels: Some(levels) } => levels.clamp(1, full),
    }
}

pub struct TextureKind;

impl ResourceKind for TextureKind {
    const NAME: &'static str = "texture";
    type Options = TextureOptions;
    type Raw = RawTexture;
    type Backend = TextureBackend;

    fn make_backend(raw: RawTexture, options: &TextureOptions) -> TextureBackend {
        TextureBackend {
            mip_levels: mip_level_count(raw.width, raw.height, options.mip_mapping),
            width: raw.width,
            height: raw.height,
            pixels: raw.pixels,
        }
    }
}

pub type Texture = Resource<TextureKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_levels() {
        assert_eq!(mip_level_count(256, 64, MipMapping::None), 1);
        assert_eq!(mip_level_count(256, 64, MipMapping::Auto { levels: None }), 9);
        assert_eq!(mip_level_count(1, 1, MipMapping::Auto { levels: None }), 1);
        assert_eq!(mip_level_count(300, 2, MipMapping::Auto { levels: None }), 9);
        assert_eq!(mip_level_count(256, 256, MipMapping::Auto { levels: Some(4) }), 4);
        assert_eq!(mip_level_count(4, 4, MipMapping::Auto { levels: Some(10) }), 3);
    }

    #[test]
    fn test_backend_keeps_pixels() {
        let raw = RawTexture {
            width: 2,
            height: 1,
            pixels: vec![255; 8],
        };
        let backend = TextureKind::make_backend(raw, &TextureOptions::mip_mapped());
        assert_eq!(backend.size(), (2, 1));
        assert_eq!(backend.mip_level_count(), 2);
        assert_eq!(backend.pixels().len(), 8);
    }
}
