//! 궁합 데이터 타입 정의
//!
//! 로더(CLI)와 조회 로직이 공유하는 타입:
//! - CellValue: 원본 파일의 셀 값
//! - ScoreScale: 점수 스케일(0~1 비율 / 원점수)
//! - RankedPair / PairingResult: 조회 결과

use serde::{Deserialize, Serialize};

/// 원본 셀 값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// 문자열 셀을 만든다 (빈 문자열은 Empty)
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// 정규화된 문자열 표현
    pub fn as_clean_text(&self) -> String {
        match self {
            CellValue::Text(s) => crate::text::normalize_text(s),
            CellValue::Number(n) => format_number(*n),
            CellValue::Empty => String::new(),
        }
    }

    /// 유한한 실수로 변환 (불가능하면 None)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::Text(s) => crate::text::parse_number(s),
            CellValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// 정수값은 소수점 없이 표시 (스프레드시트에서 읽은 숫자형 음식명 대응)
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 파일에서 읽은 그대로의 표 (헤더 + 행)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// 각 행은 headers와 같은 길이
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// 헤더를 정규화하고 행 길이를 헤더에 맞춘다 (부족하면 Empty로 채우고 넘치면 자른다)
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<String> = headers
            .iter()
            .map(|h| crate::text::normalize_text(h))
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 열 하나의 셀을 순서대로 순회
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }

    pub fn header(&self, index: usize) -> &str {
        &self.headers[index]
    }
}

/// 점수 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreUnit {
    /// 0~1 비율 → ×100 표시
    Percentage,
    /// 원점수 그대로 표시
    Raw,
}

/// 점수 스케일
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreScale {
    pub unit: ScoreUnit,
    /// 표시 배율 (Percentage=100, Raw=1)
    pub display_factor: f64,
    /// 차트 상한
    pub display_max: f64,
}

impl ScoreScale {
    pub const PERCENTAGE_FACTOR: f64 = 100.0;

    /// 관측된 최대 원점수로부터 스케일을 결정한다
    ///
    /// 최대값이 1.0 이하이면 비율, 그 외에는 원점수.
    pub fn from_max(max_observed: f64) -> Self {
        if max_observed <= 1.0 {
            Self {
                unit: ScoreUnit::Percentage,
                display_factor: Self::PERCENTAGE_FACTOR,
                display_max: 100.0,
            }
        } else {
            Self {
                unit: ScoreUnit::Raw,
                display_factor: 1.0,
                display_max: max_observed,
            }
        }
    }

    /// 0~100 고정 점수 (벡터 유사도 모드)
    pub fn hundred_point() -> Self {
        Self {
            unit: ScoreUnit::Raw,
            display_factor: 1.0,
            display_max: 100.0,
        }
    }

    /// 표시용 점수 (소수점 2자리 반올림)
    pub fn display(&self, raw: f64) -> f64 {
        round2(raw * self.display_factor)
    }
}

/// 소수점 2자리 반올림
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 순위가 매겨진 음료 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPair {
    pub drink: String,
    pub raw_score: f64,
    pub display_score: f64,
}

/// 조회 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingResult {
    /// 정규화된 음식명
    pub food_name: String,
    /// 원점수 내림차순
    pub ranked_pairs: Vec<RankedPair>,
    pub scale: ScoreScale,
}

impl PairingResult {
    /// 가장 잘 어울리는 음료
    pub fn best(&self) -> Option<&RankedPair> {
        self.ranked_pairs.first()
    }

    /// 상위 n개만 남긴다
    pub fn truncate(&mut self, n: usize) {
        self.ranked_pairs.truncate(n);
    }
}
