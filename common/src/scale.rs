//! 점수 변환과 스케일 판정

use crate::error::{Error, Result};
use crate::types::{RawTable, ScoreScale};

/// 점수 열을 실수로 변환한다
///
/// 반환값은 행 × 점수 열 순서. 파싱 불가 셀은 None(결측)이며 0으로 채우지 않는다.
pub fn coerce_scores(raw: &RawTable, score_columns: &[usize]) -> Vec<Vec<Option<f64>>> {
    raw.rows
        .iter()
        .map(|row| {
            score_columns
                .iter()
                .map(|&column| row[column].as_number())
                .collect()
        })
        .collect()
}

/// 모든 점수의 최대값으로 스케일을 결정한다
///
/// 숫자가 하나도 없으면 `EmptyScoreData`.
pub fn detect_scale(scores: &[Vec<Option<f64>>], column_names: &[&str]) -> Result<ScoreScale> {
    let max_observed = scores
        .iter()
        .flatten()
        .flatten()
        .copied()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    let Some(max_observed) = max_observed else {
        return Err(Error::EmptyScoreData {
            columns: column_names.join(", "),
        });
    };

    let scale = ScoreScale::from_max(max_observed);
    tracing::debug!(max_observed, unit = ?scale.unit, "점수 스케일 판정");
    Ok(scale)
}
