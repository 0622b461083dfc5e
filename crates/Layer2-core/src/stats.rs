//! Cache Statistics

use serde::Serialize;

/// 리소스 종류 하나의 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindStats {
    pub kind: &'static str,
    pub entries: usize,
    pub pending: usize,
    pub ready: usize,
    pub failed: usize,
    /// 살아있는 핸들 수 합계
    pub references: u64,
    /// 참조가 없어서 스윕 대상인 엔트리 수
    pub unreferenced: usize,
    pub importers: usize,
}

/// 전체 캐시 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub kinds: Vec<KindStats>,
    pub loading: usize,
    pub importer_instances: usize,
}

impl CacheStats {
    pub fn total_entries(&self) -> usize {
        self.kinds.iter().map(|k| k.entries).sum()
    }

    pub fn kind(&self, name: &str) -> Option<&KindStats> {
        self.kinds.iter().find(|k| k.kind == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let stats = CacheStats {
            kinds: vec![
                KindStats {
                    kind: "texture",
                    entries: 3,
                    ..Default::default()
                },
                KindStats {
                    kind: "tileMap",
                    entries: 1,
                    ..Default::default()
                },
            ],
            loading: 0,
            importer_instances: 0,
        };

        assert_eq!(stats.total_entries(), 4);
        assert_eq!(stats.kind("tileMap").map(|k| k.entries), Some(1));
        assert!(stats.kind("font").is_none());
    }
}
