//! # gate-foundation
//!
//! Foundation layer for Gate:
//! - Core: 공용 타입 (CacheHint, ResourceState, ID 생성)
//! - Error: 리소스 에러 + 일반 에러
//! - Config: 리소스 시스템 설정 (ResourceConfig)
//! - Fs: 파일 시스템 추상화 (Native, Memory)
//! - Storage: JsonStore (설정 파일)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  gate-core (ResourceManager)                            │
//! │       │                                                 │
//! │       ├── ResourceConfig ── JsonStore (resources.json)  │
//! │       │                                                 │
//! │       └── FileSystem                                    │
//! │            ├── NativeFileSystem (search paths)          │
//! │            └── MemoryFileSystem (tests, tooling)        │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, ResourceError, Result};

// ============================================================================
// Core (공용 타입)
// ============================================================================
pub use core::{CacheHint, IdGenerator, ResourceState};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{HotReloadConfig, ResourceConfig, SweepConfig, RESOURCE_CONFIG_FILE};

// ============================================================================
// Filesystem
// ============================================================================
pub use fs::{FileAttributes, FileSystem, MemoryFileSystem, NativeFileSystem};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{JsonStore, GATE_DIR};
