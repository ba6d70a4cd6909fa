//! 점수표 (음식 × 음료)
//!
//! 적재 시 한 번만 스키마를 추론하고 점수를 변환해 두며,
//! 이후 조회는 원본 행을 다시 검사하지 않는다.

use crate::error::Result;
use crate::scale::{coerce_scores, detect_scale};
use crate::schema::{infer_schema, InferenceStrategy};
use crate::source::{rank_scores, PairingSource};
use crate::types::{CellValue, PairingResult, RawTable, ScoreScale};
use serde::{Deserialize, Serialize};

/// 적재가 끝난 불변 점수표
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingTable {
    /// 헤더 (정규화됨)
    columns: Vec<String>,
    /// 원본 행 (파일 순서)
    rows: Vec<Vec<CellValue>>,
    food_column: usize,
    score_columns: Vec<usize>,
    strategy: InferenceStrategy,
    /// 행별 정규화 음식명
    foods: Vec<String>,
    /// 행 × 점수 열
    scores: Vec<Vec<Option<f64>>>,
    scale: ScoreScale,
}

impl PairingTable {
    /// 원본 표에서 점수표를 만든다
    ///
    /// 실패 시 부분 결과는 반환하지 않는다.
    pub fn from_raw(raw: RawTable) -> Result<Self> {
        let schema = infer_schema(&raw)?;
        let scores = coerce_scores(&raw, &schema.score_columns);

        let score_names: Vec<&str> = schema
            .score_columns
            .iter()
            .map(|&i| raw.header(i))
            .collect();
        let scale = detect_scale(&scores, &score_names)?;

        let foods = raw
            .column(schema.food_column)
            .map(CellValue::as_clean_text)
            .collect();

        let RawTable { headers, rows } = raw;

        Ok(Self {
            columns: headers,
            rows,
            food_column: schema.food_column,
            score_columns: schema.score_columns,
            strategy: schema.strategy,
            foods,
            scores,
            scale,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn food_column(&self) -> &str {
        &self.columns[self.food_column]
    }

    pub fn food_column_index(&self) -> usize {
        self.food_column
    }

    /// 점수 열 이름 (원본 순서)
    pub fn score_columns(&self) -> Vec<&str> {
        self.score_columns
            .iter()
            .map(|&i| self.columns[i].as_str())
            .collect()
    }

    pub fn score_column_indices(&self) -> &[usize] {
        &self.score_columns
    }

    pub fn strategy(&self) -> InferenceStrategy {
        self.strategy
    }

    pub fn scale(&self) -> ScoreScale {
        self.scale
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 행 하나의 변환된 점수
    pub fn row_scores(&self, row: usize) -> &[Option<f64>] {
        &self.scores[row]
    }
}

impl PairingSource for PairingTable {
    fn row_foods(&self) -> &[String] {
        &self.foods
    }

    fn rank_row(&self, row: usize) -> Result<PairingResult> {
        let names = self.score_columns.iter().map(|&i| self.columns[i].as_str());
        let pairs = names.zip(self.scores[row].iter().copied());
        rank_scores(&self.foods[row], pairs, self.scale)
    }
}
