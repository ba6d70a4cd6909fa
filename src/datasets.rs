//! 데이터 파일 탐색
//!
//! 폴더 안의 CSV/스프레드시트를 찾아 각각의 추론 결과를 보고한다.

use crate::error::{PairingAppError, Result};
use crate::loader::{self, cache::TableCache};
use pairing_common::{InferenceStrategy, ScoreUnit};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 발견된 데이터 파일 하나
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// 적재 시도 결과
#[derive(Debug, Clone)]
pub enum DatasetSummary {
    Loaded {
        food_column: String,
        score_columns: Vec<String>,
        strategy: InferenceStrategy,
        unit: ScoreUnit,
        food_count: usize,
    },
    /// 적재 실패 (메시지)
    Failed(String),
}

/// 폴더 바로 아래의 데이터 파일 목록 (이름순)
pub fn scan_folder(folder: &Path) -> Result<Vec<DatasetInfo>> {
    if !folder.exists() {
        return Err(PairingAppError::FolderNotFound(folder.display().to_string()));
    }

    let mut datasets: Vec<DatasetInfo> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| loader::is_supported(e.path()))
        .map(|e| DatasetInfo {
            path: e.path().to_path_buf(),
            file_name: e.file_name().to_string_lossy().to_string(),
        })
        .collect();

    datasets.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(datasets)
}

/// 데이터 파일 하나를 적재해 요약한다
pub fn summarize(dataset: &DatasetInfo, cache: &mut TableCache) -> DatasetSummary {
    use pairing_common::PairingSource;

    match loader::load_table(&dataset.path, cache) {
        Ok(table) => DatasetSummary::Loaded {
            food_column: table.food_column().to_string(),
            score_columns: table.score_columns().iter().map(|s| s.to_string()).collect(),
            strategy: table.strategy(),
            unit: table.scale().unit,
            food_count: table.list_foods().len(),
        },
        Err(e) => DatasetSummary::Failed(e.to_string()),
    }
}
