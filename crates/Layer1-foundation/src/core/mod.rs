//! Core Module - 공용 타입
//!
//! 모든 레이어에서 공통으로 사용하는 리소스 상태/캐시 정책 타입.
//!
//! - `types.rs`: [`CacheHint`], [`ResourceState`]
//! - `id.rs`: 생성 리소스용 단조 증가 ID

mod id;
mod types;

pub use id::IdGenerator;
pub use types::{CacheHint, ResourceState};
