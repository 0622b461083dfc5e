//! 터미널 출력 (상태 표, 통계, 이벤트)

use crate::cli::Loaded;
use gate_core::{CacheStats, ResourceEvent, ResourceState};
use serde::Serialize;

/// `load --json` 출력
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub resources: Vec<ResourceLine>,
    pub stats: &'a CacheStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLine {
    pub path: String,
    pub kind: &'static str,
    pub state: String,
    pub receipt: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

pub fn snapshot<'a>(handles: &[Loaded], stats: &'a CacheStats) -> Snapshot<'a> {
    Snapshot {
        resources: handles.iter().map(line).collect(),
        stats,
    }
}

fn line(handle: &Loaded) -> ResourceLine {
    ResourceLine {
        path: handle.path().to_string(),
        kind: handle.kind(),
        state: handle.state().to_string(),
        receipt: handle.receipt(),
        summary: handle.summary(),
    }
}

fn state_mark(state: &ResourceState) -> &'static str {
    match state {
        ResourceState::Pending => "…",
        ResourceState::Ready => "✓",
        ResourceState::Failed(_) => "✗",
    }
}

pub fn print_states(handles: &[Loaded]) {
    println!("\n📦 Resources\n");
    println!("{:<3} {:<10} {:<40} {:<8}", "", "Kind", "Path", "Receipt");
    println!("{}", "-".repeat(64));

    for handle in handles {
        let state = handle.state();
        println!(
            "{:<3} {:<10} {:<40} {:<8}",
            state_mark(&state),
            handle.kind(),
            truncate(handle.path(), 40),
            handle.receipt()
        );
        match (&state, handle.summary()) {
            (ResourceState::Failed(error), _) => println!("    {}", error),
            (_, Some(summary)) => println!("    {}", summary),
            _ => {}
        }
    }
    println!();
}

pub fn print_stats(stats: &CacheStats) {
    println!(
        "{} entr{} cached, {} loading, {} prepared importer(s)",
        stats.total_entries(),
        if stats.total_entries() == 1 { "y" } else { "ies" },
        stats.loading,
        stats.importer_instances
    );
    for kind in &stats.kinds {
        println!(
            "  {:<18} {} ready, {} pending, {} failed, {} reference(s)",
            kind.kind, kind.ready, kind.pending, kind.failed, kind.references
        );
    }
}

pub fn print_event(event: &ResourceEvent) {
    let mark = match event {
        ResourceEvent::Loaded { .. } | ResourceEvent::Reloaded { .. } => "✓",
        ResourceEvent::Failed { .. } => "✗",
        ResourceEvent::Evicted { .. } | ResourceEvent::Discarded { .. } => "-",
    };
    println!("[{}] {}", mark, event);
}

/// 표시용 경로 자르기 (앞부분 생략)
fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_file_name() {
        assert_eq!(truncate("maps/a.tmj", 40), "maps/a.tmj");
        let long = format!("{}/level1.tmj", "deep".repeat(20));
        let short = truncate(&long, 20);
        assert_eq!(short.chars().count(), 20);
        assert!(short.ends_with("level1.tmj"));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let stats = CacheStats::default();
        let snapshot = Snapshot {
            resources: vec![ResourceLine {
                path: "a.tmj".to_string(),
                kind: "tileMap",
                state: "ready".to_string(),
                receipt: 1,
                summary: None,
            }],
            stats: &stats,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["resources"][0]["kind"], "tileMap");
        assert!(json["stats"].get("importerInstances").is_some());
        assert!(json["resources"][0].get("summary").is_none());
    }
}
