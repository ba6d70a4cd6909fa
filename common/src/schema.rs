//! 스키마 추론
//!
//! 열 의미가 정해지지 않은 표에서 음식 열과 점수 열을 찾는다.
//!
//! ## 추론 순서 (먼저 성공한 전략을 사용)
//! 1. 헤더 키워드 (food/dish/menu/음식/요리/메뉴)
//! 2. 분류+이름 패턴 `[분류, 음식, 점수...]`
//! 3. 이름 우선 패턴 `[음식, 점수...]`
//! 4. 휴리스틱 (문자형 + 고유값 비율 + 평균 길이)

use crate::error::{Error, Result};
use crate::text::header_key;
use crate::types::RawTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 음식 열 헤더로 인정하는 키워드 (부분 일치)
pub const FOOD_HEADER_KEYWORDS: &[&str] = &["food", "dish", "menu", "음식", "요리", "메뉴"];

/// 숫자형 열 판정 비율
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.9;

/// 휴리스틱: 고유값 비율 하한
pub const UNIQUE_RATIO_THRESHOLD: f64 = 0.3;

/// 휴리스틱: 평균 문자열 길이 하한
pub const MIN_MEAN_TEXT_LEN: f64 = 2.0;

/// 채택된 추론 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceStrategy {
    HeaderKeyword,
    CategoryName,
    NameFirst,
    Fallback,
}

impl std::fmt::Display for InferenceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceStrategy::HeaderKeyword => write!(f, "헤더 키워드"),
            InferenceStrategy::CategoryName => write!(f, "분류+이름"),
            InferenceStrategy::NameFirst => write!(f, "이름 우선"),
            InferenceStrategy::Fallback => write!(f, "휴리스틱"),
        }
    }
}

/// 열 하나의 통계
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// 실수로 파싱되는 셀 비율 (빈 셀 포함 전체 행 기준)
    pub numeric_ratio: f64,
    /// 비어 있지 않은 고유값 수 / 행 수
    pub unique_ratio: f64,
    /// 정규화된 문자열의 평균 글자 수
    pub mean_text_len: f64,
}

impl ColumnProfile {
    pub fn is_numeric_like(&self) -> bool {
        self.numeric_ratio >= NUMERIC_RATIO_THRESHOLD
    }

    /// 휴리스틱 음식 열 후보인지
    fn is_name_candidate(&self) -> bool {
        !self.is_numeric_like()
            && self.unique_ratio >= UNIQUE_RATIO_THRESHOLD
            && self.mean_text_len >= MIN_MEAN_TEXT_LEN
    }
}

/// 추론 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaInference {
    pub food_column: usize,
    /// 원본 열 순서 유지
    pub score_columns: Vec<usize>,
    pub strategy: InferenceStrategy,
}

/// 모든 열의 통계를 계산
pub fn profile_columns(raw: &RawTable) -> Vec<ColumnProfile> {
    let rows = raw.row_count().max(1) as f64;

    (0..raw.column_count())
        .map(|index| {
            let mut numeric = 0usize;
            let mut text_len = 0usize;
            let mut unique = HashSet::new();

            for cell in raw.column(index) {
                if cell.as_number().is_some() {
                    numeric += 1;
                }
                let text = cell.as_clean_text();
                text_len += text.chars().count();
                if !text.is_empty() {
                    unique.insert(text);
                }
            }

            ColumnProfile {
                numeric_ratio: numeric as f64 / rows,
                unique_ratio: unique.len() as f64 / rows,
                mean_text_len: text_len as f64 / rows,
            }
        })
        .collect()
}

type Strategy = fn(&RawTable, &[ColumnProfile]) -> Option<(usize, Vec<usize>)>;

const STRATEGIES: [(InferenceStrategy, Strategy); 4] = [
    (InferenceStrategy::HeaderKeyword, by_header_keyword),
    (InferenceStrategy::CategoryName, by_category_name),
    (InferenceStrategy::NameFirst, by_name_first),
    (InferenceStrategy::Fallback, by_fallback),
];

/// 음식 열과 점수 열을 추론한다
///
/// 전략을 순서대로 시도하여 처음 성공한 결과만 반환한다.
/// 전략 간 부분 결과를 섞지 않는다.
pub fn infer_schema(raw: &RawTable) -> Result<SchemaInference> {
    if raw.column_count() < 2 {
        return Err(Error::schema(format!(
            "열이 2개 이상 필요합니다 (현재 {}개)",
            raw.column_count()
        )));
    }
    if raw.row_count() == 0 {
        return Err(Error::schema("데이터 행이 없습니다"));
    }

    let profiles = profile_columns(raw);

    if profiles.iter().all(ColumnProfile::is_numeric_like) {
        return Err(Error::schema(format!(
            "문자형 열이 없습니다 (열: {})",
            raw.headers.join(", ")
        )));
    }

    for (strategy, attempt) in STRATEGIES {
        if let Some((food_column, score_columns)) = attempt(raw, &profiles) {
            tracing::debug!(
                %strategy,
                food_column = raw.header(food_column),
                score_columns = score_columns.len(),
                "스키마 추론 완료"
            );
            return Ok(SchemaInference {
                food_column,
                score_columns,
                strategy,
            });
        }
    }

    if !profiles.iter().any(ColumnProfile::is_numeric_like) {
        return Err(Error::schema(format!(
            "숫자형 점수 열이 없습니다 (열: {})",
            raw.headers.join(", ")
        )));
    }

    Err(Error::schema(format!(
        "음식 열을 추론할 수 없습니다 (열: {})",
        raw.headers.join(", ")
    )))
}

/// start.. 의 모든 열이 숫자형이면 그 인덱스 목록
fn numeric_tail(profiles: &[ColumnProfile], start: usize) -> Option<Vec<usize>> {
    if start >= profiles.len() {
        return None;
    }
    profiles[start..]
        .iter()
        .all(ColumnProfile::is_numeric_like)
        .then(|| (start..profiles.len()).collect())
}

fn by_header_keyword(raw: &RawTable, profiles: &[ColumnProfile]) -> Option<(usize, Vec<usize>)> {
    raw.headers.iter().enumerate().find_map(|(index, header)| {
        let key = header_key(header);
        if !FOOD_HEADER_KEYWORDS.iter().any(|k| key.contains(k)) {
            return None;
        }
        numeric_tail(profiles, index + 1).map(|scores| (index, scores))
    })
}

fn by_category_name(_raw: &RawTable, profiles: &[ColumnProfile]) -> Option<(usize, Vec<usize>)> {
    if profiles.len() < 3 || profiles[0].is_numeric_like() || profiles[1].is_numeric_like() {
        return None;
    }
    numeric_tail(profiles, 2).map(|scores| (1, scores))
}

fn by_name_first(_raw: &RawTable, profiles: &[ColumnProfile]) -> Option<(usize, Vec<usize>)> {
    if profiles[0].is_numeric_like() {
        return None;
    }
    numeric_tail(profiles, 1).map(|scores| (0, scores))
}

fn by_fallback(_raw: &RawTable, profiles: &[ColumnProfile]) -> Option<(usize, Vec<usize>)> {
    let food = profiles.iter().position(ColumnProfile::is_name_candidate)?;

    let right: Vec<usize> = (food + 1..profiles.len())
        .filter(|&i| profiles[i].is_numeric_like())
        .collect();
    let scores = if right.is_empty() {
        (0..profiles.len())
            .filter(|&i| profiles[i].is_numeric_like())
            .collect()
    } else {
        right
    };

    if scores.is_empty() {
        None
    } else {
        Some((food, scores))
    }
}
