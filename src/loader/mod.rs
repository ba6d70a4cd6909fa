//! 데이터 파일 적재
//!
//! CSV(csv 크레이트)와 스프레드시트(calamine)를 RawTable로 읽고,
//! 점수표는 내용 해시 기준 캐시를 거쳐 적재한다.

pub mod cache;

use crate::error::{PairingAppError, Result};
use cache::{source_key, TableCache};
use calamine::{open_workbook_auto, Data, Reader};
use pairing_common::{CellValue, PairingMode, PairingResolver, PairingTable, RawTable, VectorPairing};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 지원 확장자
pub const CSV_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// 입력 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv { delimiter: u8 },
    Spreadsheet,
}

impl SourceFormat {
    /// 확장자로 형식을 판정
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext == "tsv" {
            Ok(SourceFormat::Csv { delimiter: b'\t' })
        } else if CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceFormat::Csv { delimiter: b',' })
        } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
            Ok(SourceFormat::Spreadsheet)
        } else {
            Err(PairingAppError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// 지원하는 데이터 파일인지
pub fn is_supported(path: &Path) -> bool {
    SourceFormat::from_path(path).is_ok()
}

/// CSV 바이트를 읽는다 (UTF-8, BOM 허용)
///
/// 첫 행은 헤더. 완전히 빈 행은 건너뛰고, 길이가 다른 행은 헤더에 맞춘다.
pub fn parse_csv(bytes: &[u8], delimiter: u8) -> Result<RawTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(CellValue::text).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// 스프레드시트의 첫 번째 시트를 읽는다
pub fn read_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PairingAppError::Spreadsheet(format!("시트가 없습니다: {}", path.display())))??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();

    let rows = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(CellValue::is_empty))
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Empty | Data::Error(_) => CellValue::Empty,
        other => CellValue::text(other.to_string()),
    }
}

/// 파일을 RawTable로 읽는다
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(PairingAppError::FileNotFound(path.display().to_string()));
    }

    match SourceFormat::from_path(path)? {
        SourceFormat::Csv { delimiter } => parse_csv(&std::fs::read(path)?, delimiter),
        SourceFormat::Spreadsheet => read_spreadsheet(path),
    }
}

/// 점수표를 적재한다
///
/// 같은 내용의 파일은 캐시에서 같은 `Arc`를 돌려준다.
pub fn load_table(path: &Path, cache: &mut TableCache) -> Result<Arc<PairingTable>> {
    if !path.exists() {
        return Err(PairingAppError::FileNotFound(path.display().to_string()));
    }
    let format = SourceFormat::from_path(path)?;

    let bytes = std::fs::read(path)?;
    let key = source_key(&bytes, format);

    if let Some(table) = cache.get(&key) {
        tracing::info!(path = %path.display(), "캐시 적중");
        return Ok(table);
    }
    tracing::info!(path = %path.display(), "캐시 없음, 파일 해석");

    let raw = match format {
        SourceFormat::Csv { delimiter } => parse_csv(&bytes, delimiter)?,
        SourceFormat::Spreadsheet => read_spreadsheet(path)?,
    };
    let table = Arc::new(PairingTable::from_raw(raw)?);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    cache.insert(key, file_name, bytes.len() as u64, Arc::clone(&table));

    Ok(table)
}

/// 조회기 적재 옵션
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub mode: PairingMode,
    /// 점수표 또는 음식 영양표
    pub dataset: PathBuf,
    /// 음료 맛 프로필 (벡터 모드)
    pub drinks: Option<PathBuf>,
}

/// 모드에 맞는 조회기를 만든다
pub fn load_resolver(options: &LoadOptions, cache: &mut TableCache) -> Result<PairingResolver> {
    match options.mode {
        PairingMode::Table => Ok(load_table(&options.dataset, cache)?.into()),
        PairingMode::Vector => {
            let drinks = options.drinks.as_deref().ok_or_else(|| {
                PairingAppError::Config("벡터 모드에는 음료 프로필 파일이 필요합니다".into())
            })?;
            let food_raw = read_raw_table(&options.dataset)?;
            let drink_raw = read_raw_table(drinks)?;
            Ok(VectorPairing::from_raw(&food_raw, &drink_raw)?.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("pairs.CSV")).unwrap(),
            SourceFormat::Csv { delimiter: b',' }
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("pairs.tsv")).unwrap(),
            SourceFormat::Csv { delimiter: b'\t' }
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("pairs.xlsx")).unwrap(),
            SourceFormat::Spreadsheet
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("pairs.json")),
            Err(PairingAppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_csv_strips_bom_and_blank_rows() {
        let bytes = "\u{FEFF}대표음식,소주,맥주\n삼겹살,0.9,0.7\n,,\n치킨,0.4\n".as_bytes();
        let raw = parse_csv(bytes, b',').unwrap();
        assert_eq!(raw.headers, vec!["대표음식", "소주", "맥주"]);
        assert_eq!(raw.row_count(), 2);
        assert!(raw.rows[1][2].is_empty());
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let bytes = b"food,wine\n\"mac, cheese\",0.8\n";
        let raw = parse_csv(bytes, b',').unwrap();
        assert_eq!(raw.rows[0][0], CellValue::text("mac, cheese"));
    }
}
