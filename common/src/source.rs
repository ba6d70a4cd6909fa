//! 조회 인터페이스
//!
//! 점수표 모드와 벡터 유사도 모드가 같은 조회 규칙(정규화 일치, 첫 행 우선,
//! 무작위 행 선택)을 공유하도록 행 단위 순위 계산만 구현체에 맡긴다.

use crate::error::{Error, Result};
use crate::text::normalize_text;
use crate::types::{PairingResult, RankedPair, ScoreScale};
use rand::Rng;
use std::collections::HashSet;

/// 궁합 데이터 소스
pub trait PairingSource {
    /// 행별 정규화 음식명 (원본 순서)
    fn row_foods(&self) -> &[String];

    /// 행 하나의 음료 순위
    fn rank_row(&self, row: usize) -> Result<PairingResult>;

    /// 중복을 제거한 음식 목록 (첫 등장 순서)
    fn list_foods(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.row_foods()
            .iter()
            .map(String::as_str)
            .filter(|food| !food.is_empty() && seen.insert(*food))
            .collect()
    }

    /// 음식명으로 행을 찾는다
    ///
    /// 같은 이름이 여러 행이면 첫 행을 사용한다.
    fn find_row(&self, food: &str) -> Result<usize> {
        let key = normalize_text(food);
        if key.is_empty() {
            return Err(Error::FoodNotFound {
                food: food.to_string(),
            });
        }
        self.row_foods()
            .iter()
            .position(|name| *name == key)
            .ok_or(Error::FoodNotFound { food: key })
    }

    /// 음식명으로 조회
    fn query(&self, food: &str) -> Result<PairingResult> {
        let row = self.find_row(food)?;
        self.rank_row(row)
    }

    /// 전체 행 중 하나를 균등 확률로 골라 조회
    fn query_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PairingResult> {
        let row = random_row(self.row_foods().len(), rng)?;
        self.rank_row(row)
    }

    /// 무작위 음식 + 그 음식의 점수가 있는 음료 중 무작위 하나
    fn random_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(String, RankedPair)> {
        let result = self.query_random(rng)?;
        let index = rng.gen_range(0..result.ranked_pairs.len());
        let PairingResult {
            food_name,
            mut ranked_pairs,
            ..
        } = result;
        Ok((food_name, ranked_pairs.swap_remove(index)))
    }
}

fn random_row<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> Result<usize> {
    if rows == 0 {
        return Err(Error::schema("조회할 행이 없습니다"));
    }
    Ok(rng.gen_range(0..rows))
}

/// 음료 점수를 원점수 내림차순으로 정렬한다
///
/// 결측 점수는 정렬 전에 제외한다. 동점은 원래 열 순서를 유지한다.
/// 남는 점수가 없으면 `NoScoresAvailable`.
pub fn rank_scores<'a>(
    food_name: &str,
    scores: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    scale: ScoreScale,
) -> Result<PairingResult> {
    let mut ranked_pairs: Vec<RankedPair> = scores
        .into_iter()
        .filter_map(|(drink, score)| {
            score.map(|raw_score| RankedPair {
                drink: drink.to_string(),
                raw_score,
                display_score: scale.display(raw_score),
            })
        })
        .collect();

    if ranked_pairs.is_empty() {
        return Err(Error::NoScoresAvailable {
            food: food_name.to_string(),
        });
    }

    // sort_by는 안정 정렬
    ranked_pairs.sort_by(|a, b| b.raw_score.total_cmp(&a.raw_score));

    Ok(PairingResult {
        food_name: food_name.to_string(),
        ranked_pairs,
        scale,
    })
}
