//! 데이터 적재 통합 테스트
//!
//! CSV 파일 → 점수표/벡터 조회기, 캐시 재사용을 검증

use food_pairing::error::PairingAppError;
use food_pairing::loader::cache::TableCache;
use food_pairing::loader::{self, LoadOptions};
use pairing_common::{InferenceStrategy, PairingMode, PairingSource, ScoreUnit};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const SCORE_CSV: &str = "대표음식,소주,맥주,와인\n삼겹살,0.9,0.7,0.3\n치킨,0.5,0.95,0.2\n";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("파일 쓰기 실패");
    path
}

/// 한글 헤더 CSV 적재와 조회
#[test]
fn test_load_korean_score_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.csv", SCORE_CSV);

    let table = loader::load_table(&path, &mut TableCache::new()).unwrap();
    assert_eq!(table.food_column(), "대표음식");
    assert_eq!(table.strategy(), InferenceStrategy::HeaderKeyword);
    assert_eq!(table.score_columns(), vec!["소주", "맥주", "와인"]);
    assert_eq!(table.scale().unit, ScoreUnit::Percentage);

    let result = table.query(" 치킨 ").unwrap();
    assert_eq!(result.food_name, "치킨");
    let best = result.best().unwrap();
    assert_eq!(best.drink, "맥주");
    assert_eq!(best.display_score, 95.0);
}

/// 같은 캐시로 두 번 적재하면 같은 Arc
#[test]
fn test_cache_hit_returns_same_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.csv", SCORE_CSV);
    let copy = write(dir.path(), "copy.csv", SCORE_CSV);

    let mut cache = TableCache::new();
    let first = loader::load_table(&path, &mut cache).unwrap();
    let second = loader::load_table(&copy, &mut cache).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

/// 캐시 파일 저장 후 재적재
#[test]
fn test_persisted_cache_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.csv", SCORE_CSV);

    let mut cache = TableCache::load(dir.path());
    assert!(cache.is_empty());
    let table = loader::load_table(&path, &mut cache).unwrap();
    cache.save(dir.path()).expect("캐시 저장 실패");

    let reloaded = TableCache::load(dir.path());
    assert_eq!(reloaded.len(), 1);
    let (_, entry) = reloaded.entries().next().unwrap();
    assert_eq!(entry.file_name, "pairs.csv");
    assert_eq!(entry.file_size, SCORE_CSV.len() as u64);
    assert_eq!(*entry.table, *table);

    assert!(TableCache::clear(dir.path()).unwrap());
    assert!(!TableCache::clear(dir.path()).unwrap());
}

/// 손상된 캐시 파일은 빈 캐시로 취급
#[test]
fn test_corrupted_cache_is_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), ".pairing-cache.json", "{ not json");

    let cache = TableCache::load(dir.path());
    assert!(cache.is_empty());
}

/// 버전이 다른 캐시 파일도 빈 캐시
#[test]
fn test_cache_version_mismatch_is_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    write(dir.path(), ".pairing-cache.json", r#"{"version": 999, "entries": {}}"#);

    assert!(TableCache::load(dir.path()).is_empty());
}

#[test]
fn test_missing_and_unsupported_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = TableCache::new();

    let missing = loader::load_table(&dir.path().join("none.csv"), &mut cache).unwrap_err();
    assert!(matches!(missing, PairingAppError::FileNotFound(_)));

    let json = write(dir.path(), "pairs.json", "{}");
    let unsupported = loader::load_table(&json, &mut cache).unwrap_err();
    assert!(matches!(unsupported, PairingAppError::UnsupportedFormat(_)));
}

/// 추론 실패는 Common 에러로 전달되고 캐시에 남지 않는다
#[test]
fn test_schema_failure_is_not_cached() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "numbers.csv", "a,b\n1,2\n3,4\n");

    let mut cache = TableCache::new();
    let err = loader::load_table(&path, &mut cache).unwrap_err();
    match err {
        PairingAppError::Common(inner) => assert!(inner.is_load_error()),
        other => panic!("Common 에러여야 합니다: {:?}", other),
    }
    assert!(cache.is_empty());
}

/// TSV는 탭 구분
#[test]
fn test_load_tsv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.tsv", "food\tsake\tcider\n회\t4.5\t2\n");

    let table = loader::load_table(&path, &mut TableCache::new()).unwrap();
    assert_eq!(table.scale().unit, ScoreUnit::Raw);
    assert_eq!(table.scale().display_max, 4.5);
    assert_eq!(table.query("회").unwrap().best().unwrap().drink, "sake");
}

/// 벡터 모드 조회기
#[test]
fn test_load_vector_resolver() {
    let dir = tempdir().expect("Failed to create temp dir");
    let foods = write(
        dir.path(),
        "foods.csv",
        "음식,단백질,지방,탄수화물\n삼겹살,17,28,0\n샐러드,2,1,8\n",
    );
    let drinks = write(
        dir.path(),
        "drinks.csv",
        "drink,sweetness,acidity,body\n소주,1,1,1\n화이트와인,3,8,2\n",
    );

    let options = LoadOptions {
        mode: PairingMode::Vector,
        dataset: foods,
        drinks: Some(drinks),
    };
    let resolver = loader::load_resolver(&options, &mut TableCache::new()).unwrap();
    assert_eq!(resolver.mode(), PairingMode::Vector);
    assert_eq!(resolver.list_foods(), vec!["삼겹살", "샐러드"]);

    let result = resolver.query("삼겹살").unwrap();
    assert_eq!(result.best().unwrap().drink, "화이트와인");
    assert_eq!(result.scale.display_max, 100.0);
    assert!(result.ranked_pairs.iter().all(|p| (0.0..=100.0).contains(&p.raw_score)));
}

#[test]
fn test_vector_mode_requires_drinks() {
    let dir = tempdir().expect("Failed to create temp dir");
    let foods = write(dir.path(), "foods.csv", "food,protein,fat,carbs\n두부,8,5,2\n");

    let options = LoadOptions {
        mode: PairingMode::Vector,
        dataset: foods,
        drinks: None,
    };
    let err = loader::load_resolver(&options, &mut TableCache::new()).unwrap_err();
    assert!(matches!(err, PairingAppError::Config(_)));
}

/// 점수표 모드 조회기는 캐시를 거친다
#[test]
fn test_table_resolver_uses_cache() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.csv", SCORE_CSV);

    let options = LoadOptions {
        mode: PairingMode::Table,
        dataset: path,
        drinks: None,
    };
    let mut cache = TableCache::new();
    let resolver = loader::load_resolver(&options, &mut cache).unwrap();
    assert_eq!(resolver.mode(), PairingMode::Table);
    assert_eq!(cache.len(), 1);
    assert!(resolver.as_table().is_some());
}

/// 같은 바이트라도 확장자(구분자)가 다르면 캐시를 공유하지 않는다
#[test]
fn test_same_bytes_different_delimiter_not_shared() {
    let dir = tempdir().expect("Failed to create temp dir");
    let content = "food\tsoju\n회\t4.5\n";
    let tsv = write(dir.path(), "a.tsv", content);
    let csv = write(dir.path(), "a.csv", content);

    let mut cache = TableCache::new();
    let table = loader::load_table(&tsv, &mut cache).unwrap();
    assert_eq!(table.score_columns(), vec!["soju"]);

    // 쉼표로 읽으면 열이 하나뿐이라 추론 실패
    let err = loader::load_table(&csv, &mut cache).unwrap_err();
    assert!(matches!(err, PairingAppError::Common(_)));
    assert_eq!(cache.len(), 1);

    // 저장된 캐시를 다시 읽어도 같다
    cache.save(dir.path()).expect("캐시 저장 실패");
    let mut reloaded = TableCache::load(dir.path());
    assert!(loader::load_table(&csv, &mut reloaded).is_err());
    assert!(loader::load_table(&tsv, &mut reloaded).is_ok());
}

/// 캐시 적중만 있으면 저장할 변경이 없다
#[test]
fn test_cache_hit_does_not_mark_dirty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write(dir.path(), "pairs.csv", SCORE_CSV);

    let mut cache = TableCache::new();
    loader::load_table(&path, &mut cache).unwrap();
    assert!(cache.is_dirty());
    cache.save(dir.path()).expect("캐시 저장 실패");

    let mut reloaded = TableCache::load(dir.path());
    assert!(!reloaded.is_dirty());
    loader::load_table(&path, &mut reloaded).unwrap();
    assert!(!reloaded.is_dirty());
}

/// 맛 성분이 모두 0인 음료는 적재 단계에서 실패
#[test]
fn test_zero_taste_drink_fails_vector_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let foods = write(
        dir.path(),
        "foods.csv",
        "food,protein,fat,carbs\n삼겹살,17,28,0\n샐러드,2,1,8\n",
    );
    let drinks = write(
        dir.path(),
        "drinks.csv",
        "drink,sweetness,acidity,body\n소주,1,1,1\n물,0,0,0\n",
    );

    let options = LoadOptions {
        mode: PairingMode::Vector,
        dataset: foods,
        drinks: Some(drinks),
    };
    let err = loader::load_resolver(&options, &mut TableCache::new()).unwrap_err();
    match err {
        PairingAppError::Common(pairing_common::Error::DegenerateVector { name }) => {
            assert_eq!(name, "물")
        }
        other => panic!("DegenerateVector 여야 합니다: {:?}", other),
    }
}
