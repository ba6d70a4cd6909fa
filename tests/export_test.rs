//! JSON/Excel 출력 통합 테스트

use food_pairing::cli::ExportFormat;
use food_pairing::export::{self, excel, json};
use pairing_common::{PairingMode, PairingResult, RankedPair, ScoreScale};
use tempfile::tempdir;

fn create_test_result() -> PairingResult {
    let scale = ScoreScale::from_max(0.9);
    let ranked_pairs = [("소주", 0.9), ("맥주", 0.7), ("와인", 0.3)]
        .iter()
        .map(|&(drink, raw)| RankedPair {
            drink: drink.to_string(),
            raw_score: raw,
            display_score: scale.display(raw),
        })
        .collect();

    PairingResult {
        food_name: "삼겹살".to_string(),
        ranked_pairs,
        scale,
    }
}

#[test]
fn test_json_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("result.json");

    json::write_json(&create_test_result(), PairingMode::Table, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["mode"], "table");
    assert_eq!(value["foodName"], "삼겹살");
    assert_eq!(value["rankedPairs"][0]["drink"], "소주");
    assert_eq!(value["rankedPairs"][0]["displayScore"], 90.0);
    assert_eq!(value["scale"]["unit"], "percentage");
    assert!(value["generatedAt"].is_string());
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("result.xlsx");

    excel::generate_excel(&create_test_result(), &path).unwrap();

    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_excel_generation_empty_result() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.xlsx");

    let mut result = create_test_result();
    result.truncate(0);
    excel::generate_excel(&result, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_export_both_into_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("out");

    let written =
        export::export_result(&create_test_result(), PairingMode::Table, &ExportFormat::Both, &out)
            .unwrap();

    assert_eq!(written.len(), 2);
    assert!(out.join("삼겹살_궁합.json").exists());
    assert!(out.join("삼겹살_궁합.xlsx").exists());
}

#[test]
fn test_export_single_file_target() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("report.json");

    let written =
        export::export_result(&create_test_result(), PairingMode::Vector, &ExportFormat::Json, &target)
            .unwrap();

    assert_eq!(written, vec![target.clone()]);
    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("\"vector\""));
}
