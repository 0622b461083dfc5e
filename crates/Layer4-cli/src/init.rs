//! Gate init command
//!
//! Creates a project-level `.gate/resources.json`.

use gate_foundation::{CacheHint, JsonStore, ResourceConfig, RESOURCE_CONFIG_FILE};
use std::path::Path;

/// 프로젝트 기본 설정
fn default_project_config(root: &Path) -> ResourceConfig {
    let mut config = ResourceConfig::new()
        .cache_hint("texture", CacheHint::until(5))
        .cache_hint("tileSet", CacheHint::Forever);
    if root.join("assets").is_dir() {
        config = config.search_path("assets");
    }
    config
}

/// Initialize the resource config in `root`
pub fn init_in(root: &Path, force: bool) -> anyhow::Result<bool> {
    let store = JsonStore::project(root);
    if store.exists(RESOURCE_CONFIG_FILE) && !force {
        return Ok(false);
    }
    store.save(RESOURCE_CONFIG_FILE, &default_project_config(root))?;
    Ok(true)
}

/// Initialize the resource config in the current directory
pub fn init_project(force: bool) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;

    if !init_in(&root, force)? {
        println!("✓ Gate already initialized in this directory.");
        println!("  Use --force to reinitialize.");
        return Ok(());
    }

    println!("  Created .gate/{}", RESOURCE_CONFIG_FILE);
    println!("\n✓ Gate initialized successfully!");
    println!("\nNext steps:");
    println!("  1. Add asset roots to \"searchPaths\"");
    println!("  2. Run 'gate load <map.tmj>' to check your resources");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();

        assert!(init_in(dir.path(), false).unwrap());
        assert!(!init_in(dir.path(), false).unwrap());
        assert!(init_in(dir.path(), true).unwrap());

        let config = ResourceConfig::load_from(dir.path().join(".gate").join(RESOURCE_CONFIG_FILE)).unwrap();
        assert_eq!(config.search_paths, vec![std::path::PathBuf::from("assets")]);
        assert_eq!(config.cache_hint_for("tileSet"), Some(CacheHint::Forever));
    }
}
