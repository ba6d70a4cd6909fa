pub mod json;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use pairing_common::{PairingMode, PairingResult};
use std::path::{Path, PathBuf};

/// 파일명에 쓸 수 없는 문자를 치환
fn file_stem_for(food: &str) -> String {
    let cleaned: String = food
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "pairing".to_string()
    } else {
        format!("{}_궁합", cleaned)
    }
}

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.with_extension(extension)
    }
}

/// 조회 결과를 내보낸다
///
/// 생성된 파일 경로를 반환한다.
pub fn export_result(
    result: &PairingResult,
    mode: PairingMode,
    format: &ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }
    let stem = file_stem_for(&result.food_name);
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Json | ExportFormat::Both) {
        let path = output_path_for_format(output, &stem, "json");
        println!("- JSON 생성 중...");
        json::write_json(result, mode, &path)?;
        println!("✔ JSON 출력: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for_format(output, &stem, "xlsx");
        println!("- Excel 생성 중...");
        excel::generate_excel(result, &path)?;
        println!("✔ Excel 출력: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
