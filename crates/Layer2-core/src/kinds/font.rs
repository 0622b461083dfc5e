//! Font

use crate::handle::Resource;
use crate::kind::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontOptions {
    pub style: FontStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFont {
    pub family: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct FontBackend {
    family: String,
    style: FontStyle,
    data: Vec<u8>,
}

impl FontBackend {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

pub struct FontKind;

impl ResourceKind for FontKind {
    const NAME: &'static str = "font";
    type Options = FontOptions;
    type Raw = RawFont;
    type Backend = FontBackend;

    fn make_backend(raw: RawFont, options: &FontOptions) -> FontBackend {
        FontBackend {
            family: raw.family,
            style: options.style,
            data: raw.data,
        }
    }
}

pub type Font = Resource<FontKind>;
