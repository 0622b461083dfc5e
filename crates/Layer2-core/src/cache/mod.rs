//! Cache - 키, 엔트리, 종류별 테이블
//!
//! - `key.rs`: [`CacheKey`] (경로 + 옵션)
//! - `entry.rs`: 키 하나의 상태 레코드
//! - `table.rs`: 종류별 테이블 + 로딩 추적

mod entry;
mod key;
mod table;

pub use key::{CacheKey, GENERATED_PREFIX};

pub(crate) use entry::CacheEntry;
pub(crate) use table::CacheState;
