//! 점수표 캐시 모듈
//!
//! 파일 내용의 SHA-256을 키로 적재된 점수표를 보관하여
//! 같은 데이터의 재해석을 건너뛴다. 캐시는 호출자가 소유한다.

use super::SourceFormat;
use crate::error::Result;
use pairing_common::PairingTable;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CACHE_FILE_NAME: &str = ".pairing-cache.json";

/// 캐시 구조
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCache {
    /// 버전 (호환성 확인용)
    version: u32,
    /// 내용 해시 + 해석 방식 → 점수표
    entries: HashMap<String, CacheEntry>,
    /// 읽은 뒤 항목이 추가되었는지
    #[serde(skip)]
    dirty: bool,
}

/// 캐시 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    pub table: Arc<PairingTable>,
}

impl TableCache {
    const CURRENT_VERSION: u32 = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// 캐시 파일을 읽는다 (없거나 손상됐거나 버전이 다르면 빈 캐시)
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "캐시 파일 열기 실패");
                return Self::default();
            }
        };

        match serde_json::from_reader::<_, TableCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(cache) => {
                tracing::warn!(found = cache.version, "캐시 버전 불일치, 새로 만듭니다");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "손상된 캐시 파일 무시");
                Self::default()
            }
        }
    }

    /// 캐시 파일 저장
    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// 캐시 파일 삭제 (삭제했으면 true)
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<Arc<PairingTable>> {
        self.entries.get(key).map(|e| Arc::clone(&e.table))
    }

    pub fn insert(&mut self, key: String, file_name: String, file_size: u64, table: Arc<PairingTable>) {
        self.entries.insert(key, CacheEntry {
            file_name,
            file_size,
            table,
        });
        self.dirty = true;
    }

    /// 저장할 변경이 있는지
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
            dirty: false,
        }
    }
}

/// 파일의 식별 키 (내용 SHA-256 hex + 해석 방식)
///
/// 해석 방식(구분자/리더)이 다르면 같은 바이트도 다른 키가 된다.
pub fn source_key(bytes: &[u8], format: SourceFormat) -> String {
    let parser = match format {
        SourceFormat::Csv { delimiter } => format!("csv:{:#04x}", delimiter),
        SourceFormat::Spreadsheet => "sheet".to_string(),
    };
    format!("{}:{}", hex::encode(Sha256::digest(bytes)), parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_key_is_stable_and_content_based() {
        let csv = SourceFormat::Csv { delimiter: b',' };
        let a = source_key(b"food,soju\n", csv);
        assert_eq!(a, source_key(b"food,soju\n", csv));
        assert_ne!(a, source_key(b"food,beer\n", csv));
        assert!(a.ends_with(":csv:0x2c"));
    }

    #[test]
    fn test_source_key_separates_parsers() {
        let bytes = b"food\tsoju\n";
        let comma = source_key(bytes, SourceFormat::Csv { delimiter: b',' });
        let tab = source_key(bytes, SourceFormat::Csv { delimiter: b'\t' });
        let sheet = source_key(bytes, SourceFormat::Spreadsheet);
        assert_ne!(comma, tab);
        assert_ne!(comma, sheet);
        assert_ne!(tab, sheet);
        assert!(tab.ends_with(":csv:0x09"));
    }

    #[test]
    fn test_insert_marks_dirty() {
        let mut cache = TableCache::new();
        assert!(!cache.is_dirty());

        let raw = pairing_common::RawTable::new(
            vec!["food".into(), "soju".into()],
            vec![vec![
                pairing_common::CellValue::text("회"),
                pairing_common::CellValue::Number(0.8),
            ]],
        );
        let table = Arc::new(PairingTable::from_raw(raw).unwrap());
        cache.insert("k".into(), "a.csv".into(), 10, table);
        assert!(cache.is_dirty());
    }
}
