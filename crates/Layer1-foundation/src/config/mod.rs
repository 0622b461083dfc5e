//! Config - 리소스 시스템 설정 관리
//!
//! - `resources.rs` - ResourceConfig (스윕, 핫 리로드, 캐시 정책)

mod resources;

pub use resources::{HotReloadConfig, ResourceConfig, SweepConfig, RESOURCE_CONFIG_FILE};
