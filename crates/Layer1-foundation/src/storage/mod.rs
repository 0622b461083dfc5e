//! Storage module for Gate
//!
//! - `json`: JSON - 설정 파일 저장/로드

mod json;

pub use json::{JsonStore, GATE_DIR};
pub(crate) use json::read_json;
