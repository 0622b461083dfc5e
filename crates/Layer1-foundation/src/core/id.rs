//! 생성 리소스 ID

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing id source
///
/// Ids start at 1 and are never reused for the lifetime of the generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}
